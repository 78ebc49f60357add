//! Interactive practice session.
//!
//! Drives the core session engine from stdin: print a question, read an
//! answer, show feedback, repeat until the target is reached, then fold the
//! results into the active profile.

use chrono::Utc;
use clap::Args;
use std::io::{BufRead, Write};

use tablequest_core::events::{Event, FeedbackSink};
use tablequest_core::{parse_answer, DifficultyTier, ProfileStore, SessionEngine};

use super::common;

#[derive(Args)]
pub struct PlayArgs {
    /// Practice a single times table (1-10)
    #[arg(long, conflicts_with = "numbers")]
    pub table: Option<u8>,

    /// Practice a custom set of numbers, e.g. 3,6,8
    #[arg(long)]
    pub numbers: Option<String>,

    /// beginner, intermediate, advanced or adaptive (defaults to the
    /// profile setting)
    #[arg(long)]
    pub difficulty: Option<DifficultyTier>,

    /// Number of questions (defaults to the profile setting)
    #[arg(long)]
    pub count: Option<u32>,
}

/// Audio cues degrade to the terminal bell.
struct TerminalFeedback {
    sound: bool,
}

impl FeedbackSink for TerminalFeedback {
    fn notify(&mut self, event: &Event) {
        if !self.sound {
            return;
        }
        if matches!(
            event,
            Event::AnswerCorrect { .. } | Event::BadgeUnlocked { .. }
        ) {
            print!("\x07");
        }
    }
}

pub fn run(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = ProfileStore::open()?;
    let (profile_id, mut record) = common::active_progress(&store)?;

    if let Some(table) = args.table {
        if !(1..=10).contains(&table) {
            return Err(format!("table must be between 1 and 10, got {table}").into());
        }
    }
    let chosen = args
        .numbers
        .as_deref()
        .map(common::parse_numbers)
        .transpose()?;
    let tier = args.difficulty.unwrap_or(record.settings.difficulty);
    let target = args.count.unwrap_or(record.settings.question_count).max(1);

    let mut rng = rand::thread_rng();
    let mut sink = TerminalFeedback {
        sound: record.settings.sound_enabled,
    };
    let mut engine = SessionEngine::new();
    engine.start(args.table, tier, target, chosen);
    sink.notify(&Event::SessionStarted {
        table: args.table,
        tier,
        target,
        at: Utc::now(),
    });

    match args.table {
        Some(table) => println!("Table of {table} — {target} questions. Go, {}!", record.player.name),
        None => println!("{target} questions at {tier} difficulty. Go, {}!", record.player.name),
    }

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let question = engine.next_question(&mut rng)?;
        println!();
        println!("  {question}");

        let value = loop {
            print!("> ");
            std::io::stdout().flush()?;
            let line = match lines.next() {
                Some(line) => line?,
                None => {
                    // Abandoning mid-session leaves no trace, by design of
                    // the single-session model: nothing was folded yet.
                    println!();
                    println!("Session abandoned.");
                    return Ok(());
                }
            };
            match parse_answer(&line) {
                Ok(value) => break value,
                Err(e) => println!("{e} — give me a number!"),
            }
        };

        let feedback = engine.submit_answer(value, &mut rng)?;
        if feedback.correct {
            sink.notify(&Event::AnswerCorrect {
                product: feedback.product,
                stars_earned: feedback.stars_earned,
                at: Utc::now(),
            });
            println!("{} +{} ⭐", feedback.message, feedback.stars_earned);
        } else {
            sink.notify(&Event::AnswerIncorrect {
                product: feedback.product,
                at: Utc::now(),
            });
            println!(
                "{} {} × {} = {}",
                feedback.message, feedback.operand_a, feedback.operand_b, feedback.product
            );
            if let Some(hint) = &feedback.hint {
                println!("{hint}");
            }
        }

        if let Some(change) = engine.check_difficulty_adjustment() {
            sink.notify(&Event::DifficultyChanged {
                from: change.from,
                to: change.to,
                at: Utc::now(),
            });
            println!("⚖️  Difficulty adjusted: {} → {}", change.from, change.to);
        }

        if feedback.session_complete {
            break;
        }
    }

    let summary = engine.finish()?;
    let newly_earned = record.apply_session(&summary);

    println!();
    println!("─── Session over ───");
    println!(
        "  {}/{} correct ({}%)",
        summary.correct, summary.answered, summary.success_percent
    );
    println!("  ⭐ {} stars earned ({} total)", summary.stars, record.total_stars);
    println!(
        "  ⏱  {}s, {:.1}s per correct answer",
        summary.duration_secs, summary.mean_response_secs
    );
    for badge in &newly_earned {
        sink.notify(&Event::BadgeUnlocked {
            badge_id: badge.id(),
            at: Utc::now(),
        });
        println!("  🏅 Badge unlocked: {badge}");
    }
    sink.notify(&Event::SessionCompleted {
        answered: summary.answered,
        correct: summary.correct,
        stars: summary.stars,
        success_percent: summary.success_percent,
        duration_secs: summary.duration_secs,
        at: Utc::now(),
    });

    // A failed save is degraded behavior, not a failed session.
    if let Err(e) = store.save_progress(&profile_id, &record) {
        eprintln!("warning: progress not saved: {e}");
    }
    Ok(())
}
