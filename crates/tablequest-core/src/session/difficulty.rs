//! Rolling-window difficulty adaptation.
//!
//! The tracker keeps the last [`HISTORY_CAPACITY`] answer outcomes of the
//! current session and derives a success rate from them. In adaptive mode
//! the session asks [`AnswerHistory::evaluate_adjustment`] between questions
//! whether the effective tier should move.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::question::DifficultyTier;

/// Answers considered for adaptation.
pub const HISTORY_CAPACITY: usize = 10;

/// Success rate at or above which the tier is promoted.
const PROMOTE_THRESHOLD: f64 = 0.8;
/// Success rate at or below which the tier is demoted.
const DEMOTE_THRESHOLD: f64 = 0.5;
/// Minimum answers before any adjustment fires.
const MIN_SAMPLE: usize = 5;

/// Bounded FIFO of recent answer outcomes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerHistory {
    entries: VecDeque<bool>,
}

/// Outcome of an adjustment check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjustment {
    pub should_change: bool,
    pub new_tier: DifficultyTier,
}

/// Snapshot of the current window for reporting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WindowStats {
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub rate: f64,
    pub percent: u8,
}

impl AnswerHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an outcome, evicting the oldest entry past capacity.
    pub fn record_answer(&mut self, correct: bool) {
        self.entries.push_back(correct);
        if self.entries.len() > HISTORY_CAPACITY {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn correct_count(&self) -> usize {
        self.entries.iter().filter(|c| **c).count()
    }

    /// Success rate over the window. An empty history counts as 1.0 so the
    /// learner is not penalized before any data exists.
    pub fn success_rate(&self) -> f64 {
        if self.entries.is_empty() {
            return 1.0;
        }
        self.correct_count() as f64 / self.entries.len() as f64
    }

    /// Decide whether the tier should change.
    ///
    /// Fewer than [`MIN_SAMPLE`] answers is insufficient signal. Promotion
    /// is checked before demotion; at most one fires since the rate cannot
    /// satisfy both thresholds at once.
    pub fn evaluate_adjustment(&self, current: DifficultyTier) -> Adjustment {
        if self.entries.len() < MIN_SAMPLE {
            return Adjustment {
                should_change: false,
                new_tier: current,
            };
        }

        let rate = self.success_rate();

        if rate >= PROMOTE_THRESHOLD {
            if let Some(next) = current.promoted() {
                return Adjustment {
                    should_change: true,
                    new_tier: next,
                };
            }
        }

        if rate <= DEMOTE_THRESHOLD {
            if let Some(next) = current.demoted() {
                return Adjustment {
                    should_change: true,
                    new_tier: next,
                };
            }
        }

        Adjustment {
            should_change: false,
            new_tier: current,
        }
    }

    /// Clear the window. Called at session start and nowhere else.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn window_stats(&self) -> WindowStats {
        let total = self.entries.len();
        let correct = self.correct_count();
        let rate = self.success_rate();
        WindowStats {
            total,
            correct,
            incorrect: total - correct,
            rate,
            percent: (rate * 100.0).round() as u8,
        }
    }
}
