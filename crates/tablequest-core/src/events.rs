//! Discrete notifications for the feedback collaborator.
//!
//! The engine itself stays pure; the driving layer turns its results into
//! events and hands them to a [`FeedbackSink`] (sound cues, animations, a
//! terminal bell). Fire-and-forget: nothing is read back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::question::DifficultyTier;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        table: Option<u8>,
        tier: DifficultyTier,
        target: u32,
        at: DateTime<Utc>,
    },
    AnswerCorrect {
        product: u16,
        stars_earned: u32,
        at: DateTime<Utc>,
    },
    AnswerIncorrect {
        product: u16,
        at: DateTime<Utc>,
    },
    DifficultyChanged {
        from: DifficultyTier,
        to: DifficultyTier,
        at: DateTime<Utc>,
    },
    BadgeUnlocked {
        badge_id: String,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        answered: u32,
        correct: u32,
        stars: u32,
        success_percent: u8,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
}

/// Receiver for feedback events. No return value is consumed.
pub trait FeedbackSink {
    fn notify(&mut self, event: &Event);
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn notify(&mut self, _event: &Event) {}
}
