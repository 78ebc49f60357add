//! Session engine implementation.
//!
//! The engine is a state machine owning one practice session. It holds no
//! timers and runs no threads - the caller drives it: ask for a question,
//! submit the learner's answer, optionally check for a difficulty
//! adjustment, and finish when the feedback says the session is complete.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> InProgress -> Completed
//! ```
//!
//! `start()` is always allowed and discards any prior session. `finish()`
//! must be called once per session; the engine does not defend against a
//! second call beyond having already left `InProgress`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::difficulty::{AnswerHistory, WindowStats};
use super::messages;
use super::question::{DifficultyTier, Question};
use crate::error::SessionError;
use crate::progression::badges::{session_badges, BadgeKind};
use rand::Rng;

/// Stars for a correct answer.
const STARS_CORRECT: u32 = 10;
/// Stars for a correct answer while the rolling window is perfect.
const STARS_STREAK: u32 = 15;
/// Correct answers the window must hold before the streak bonus applies.
const STREAK_MINIMUM: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    InProgress,
    Completed,
}

/// One answer's record in the session log.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResponseEntry {
    pub elapsed_secs: f64,
    pub correct: bool,
}

/// Progress snapshot returned with every answer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionProgress {
    pub answered: u32,
    pub correct: u32,
    pub target: u32,
    pub stars: u32,
}

/// Everything the presentation layer needs to react to one answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub product: u16,
    pub operand_a: u8,
    pub operand_b: u8,
    pub submitted: u16,
    pub message: String,
    /// Pedagogical hint, present only for incorrect answers.
    pub hint: Option<String>,
    pub stars_earned: u32,
    pub session_complete: bool,
    pub elapsed_secs: f64,
    pub progress: SessionProgress,
}

/// Effective tier change applied in adaptive mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierChange {
    pub from: DifficultyTier,
    pub to: DifficultyTier,
}

/// Results of a finished session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub table: Option<u8>,
    pub chosen_numbers: Option<Vec<u8>>,
    pub answered: u32,
    pub correct: u32,
    pub stars: u32,
    pub success_percent: u8,
    pub duration_secs: u64,
    /// Mean response time over correct answers only; 0 when none.
    pub mean_response_secs: f64,
    pub badges: Vec<BadgeKind>,
}

impl SessionSummary {
    pub fn success_rate(&self) -> f64 {
        if self.answered == 0 {
            return 0.0;
        }
        self.correct as f64 / self.answered as f64
    }
}

/// Core session engine.
///
/// Single-writer, single-session: starting a new session discards the
/// previous one without side effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEngine {
    state: SessionState,
    table: Option<u8>,
    chosen_numbers: Option<Vec<u8>>,
    /// Tier the session was configured with.
    tier: DifficultyTier,
    /// Tier questions are actually generated from. Starts at Beginner in
    /// adaptive mode and moves with the tracker.
    effective_tier: DifficultyTier,
    target: u32,
    answered: u32,
    correct: u32,
    stars: u32,
    current_question: Option<Question>,
    started_at: Option<DateTime<Utc>>,
    question_started_at: Option<DateTime<Utc>>,
    response_log: Vec<ResponseEntry>,
    history: AnswerHistory,
}

impl Default for SessionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionEngine {
    /// Create an idle engine. Nothing happens until `start()`.
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            table: None,
            chosen_numbers: None,
            tier: DifficultyTier::Beginner,
            effective_tier: DifficultyTier::Beginner,
            target: 0,
            answered: 0,
            correct: 0,
            stars: 0,
            current_question: None,
            started_at: None,
            question_started_at: None,
            response_log: Vec::new(),
            history: AnswerHistory::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn tier(&self) -> DifficultyTier {
        self.tier
    }

    pub fn effective_tier(&self) -> DifficultyTier {
        self.effective_tier
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            answered: self.answered,
            correct: self.correct,
            target: self.target,
            stars: self.stars,
        }
    }

    pub fn response_log(&self) -> &[ResponseEntry] {
        &self.response_log
    }

    pub fn window_stats(&self) -> WindowStats {
        self.history.window_stats()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a new session, discarding any previous one.
    ///
    /// Exactly one of `table` / `chosen_numbers` is meaningful; a session
    /// built from chosen numbers never updates per-table statistics.
    pub fn start(
        &mut self,
        table: Option<u8>,
        tier: DifficultyTier,
        target: u32,
        chosen_numbers: Option<Vec<u8>>,
    ) {
        let effective_tier = match tier {
            DifficultyTier::Adaptive => DifficultyTier::Beginner,
            fixed => fixed,
        };
        *self = Self {
            state: SessionState::InProgress,
            table,
            chosen_numbers,
            tier,
            effective_tier,
            target,
            started_at: Some(Utc::now()),
            ..Self::new()
        };
    }

    /// Generate and store the next question.
    pub fn next_question<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Question, SessionError> {
        if self.state != SessionState::InProgress {
            return Err(SessionError::NotInProgress);
        }
        let question = Question::generate(
            rng,
            self.table,
            self.effective_tier,
            self.chosen_numbers.as_deref(),
        );
        self.current_question = Some(question);
        self.question_started_at = Some(Utc::now());
        Ok(question)
    }

    /// Verify a submitted answer against the pending question.
    ///
    /// The question is consumed: a second submission without an intervening
    /// `next_question()` reports `NoActiveQuestion`.
    pub fn submit_answer<R: Rng + ?Sized>(
        &mut self,
        value: u16,
        rng: &mut R,
    ) -> Result<AnswerFeedback, SessionError> {
        let question = self
            .current_question
            .take()
            .ok_or(SessionError::NoActiveQuestion)?;

        let correct = value == question.product;
        let elapsed_secs = self
            .question_started_at
            .take()
            .map(|t| (Utc::now() - t).num_milliseconds().max(0) as f64 / 1000.0)
            .unwrap_or(0.0);

        self.response_log.push(ResponseEntry {
            elapsed_secs,
            correct,
        });
        self.answered += 1;
        self.history.record_answer(correct);

        let mut stars_earned = 0;
        if correct {
            self.correct += 1;
            stars_earned = self.reward_stars();
            self.stars += stars_earned;
        }

        let session_complete = self.answered >= self.target;

        Ok(AnswerFeedback {
            correct,
            product: question.product,
            operand_a: question.operand_a,
            operand_b: question.operand_b,
            submitted: value,
            message: if correct {
                messages::success_message(rng).to_string()
            } else {
                messages::retry_message(rng).to_string()
            },
            hint: if correct {
                None
            } else {
                Some(hint_for(question.operand_a, question.operand_b))
            },
            stars_earned,
            session_complete,
            elapsed_secs,
            progress: self.progress(),
        })
    }

    /// Stars for the answer just recorded. The streak bonus rides on the
    /// rolling window, not on all-time accuracy.
    fn reward_stars(&self) -> u32 {
        if self.history.correct_count() >= STREAK_MINIMUM && self.history.success_rate() == 1.0 {
            STARS_STREAK
        } else {
            STARS_CORRECT
        }
    }

    /// In adaptive mode, apply the tracker's verdict to the effective tier.
    /// Returns the change so the caller can tell the learner. No-op in the
    /// fixed tiers.
    pub fn check_difficulty_adjustment(&mut self) -> Option<TierChange> {
        if self.tier != DifficultyTier::Adaptive {
            return None;
        }
        let adjustment = self.history.evaluate_adjustment(self.effective_tier);
        if adjustment.should_change && adjustment.new_tier != self.effective_tier {
            let change = TierChange {
                from: self.effective_tier,
                to: adjustment.new_tier,
            };
            self.effective_tier = adjustment.new_tier;
            return Some(change);
        }
        None
    }

    /// Close the session and compute its results.
    pub fn finish(&mut self) -> Result<SessionSummary, SessionError> {
        if self.state != SessionState::InProgress {
            return Err(SessionError::NotInProgress);
        }
        self.state = SessionState::Completed;

        let duration_secs = self
            .started_at
            .map(|t| (Utc::now() - t).num_seconds().max(0) as u64)
            .unwrap_or(0);

        let correct_times: Vec<f64> = self
            .response_log
            .iter()
            .filter(|entry| entry.correct)
            .map(|entry| entry.elapsed_secs)
            .collect();
        let mean_response_secs = if correct_times.is_empty() {
            0.0
        } else {
            correct_times.iter().sum::<f64>() / correct_times.len() as f64
        };

        let success_rate = if self.answered > 0 {
            self.correct as f64 / self.answered as f64
        } else {
            0.0
        };

        let badges = session_badges(
            self.table,
            self.answered,
            self.target,
            success_rate,
            duration_secs,
        );

        Ok(SessionSummary {
            table: self.table,
            chosen_numbers: self.chosen_numbers.clone(),
            answered: self.answered,
            correct: self.correct,
            stars: self.stars,
            success_percent: (success_rate * 100.0).round() as u8,
            duration_secs,
            mean_response_secs,
            badges,
        })
    }
}

/// Pedagogical hint for a missed question.
///
/// Trick selection looks at the operands as displayed, after the random
/// swap, so a swap can hide the x5/x9 trick even when it applies. That
/// mirrors the long-standing behavior learners already see.
pub fn hint_for(operand_a: u8, operand_b: u8) -> String {
    let product = operand_a as u16 * operand_b as u16;
    let lo = operand_a.min(operand_b);
    let hi = operand_a.max(operand_b);

    if lo <= 3 {
        let additions = vec![hi.to_string(); lo as usize].join(" + ");
        return format!("💡 {lo} times {hi} is like {additions} = {product}");
    }

    if operand_b == 5 {
        return format!(
            "💡 To multiply by 5, halve it and add a zero! {operand_a} ÷ 2 × 10 = {product}"
        );
    }

    if operand_b == 9 {
        return format!(
            "💡 To multiply by 9, take ten times and remove one! {operand_a} × 10 - {operand_a} = {product}"
        );
    }

    format!("💡 Think it through... that's {lo} groups of {hi}!")
}
