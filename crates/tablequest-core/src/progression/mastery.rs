//! Long-term per-table mastery.
//!
//! Cumulative statistics per times table feed a 1..=5 mastery tier. The tier
//! is always recomputed from the accumulated ratio and attempt count, never
//! incremented directly, so it can move down if accuracy drops.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tables shown on the overview grid.
pub const GRID_TABLES: std::ops::RangeInclusive<u8> = 2..=9;

/// Cumulative statistics for one times table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableStats {
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub attempts: u32,
    #[serde(default = "default_tier")]
    pub tier: u8,
    #[serde(default)]
    pub last_session_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub mean_response_secs: f64,
}

fn default_tier() -> u8 {
    1
}

impl Default for TableStats {
    fn default() -> Self {
        Self {
            correct: 0,
            attempts: 0,
            tier: 1,
            last_session_at: None,
            mean_response_secs: 0.0,
        }
    }
}

/// Mastery tier for a cumulative record, highest rule first.
/// An input meeting the tier-5 thresholds must not fall through lower.
pub fn mastery_tier(correct: u32, attempts: u32) -> u8 {
    if attempts == 0 {
        return 1;
    }
    let ratio = correct as f64 / attempts as f64;

    if ratio >= 0.95 && attempts >= 50 {
        5
    } else if ratio >= 0.85 && attempts >= 30 {
        4
    } else if ratio >= 0.75 && attempts >= 20 {
        3
    } else if ratio >= 0.60 && attempts >= 10 {
        2
    } else {
        1
    }
}

pub fn tier_label(tier: u8) -> &'static str {
    match tier {
        2 => "Apprentice",
        3 => "Skilled",
        4 => "Expert",
        5 => "Master",
        _ => "Novice",
    }
}

impl TableStats {
    /// Fold one session's deltas in and recompute the tier.
    ///
    /// `session_mean_secs` is the session's mean response time over correct
    /// answers; it is blended into the running mean weighted by correct
    /// counts.
    pub fn fold_session(&mut self, correct_delta: u32, attempts_delta: u32, session_mean_secs: f64) {
        let prior_correct = self.correct;
        self.correct += correct_delta;
        self.attempts += attempts_delta;

        if self.correct > 0 && correct_delta > 0 {
            self.mean_response_secs = (self.mean_response_secs * prior_correct as f64
                + session_mean_secs * correct_delta as f64)
                / self.correct as f64;
        }

        self.tier = mastery_tier(self.correct, self.attempts);
        self.last_session_at = Some(Utc::now());
    }

    pub fn success_percent(&self) -> u8 {
        if self.attempts == 0 {
            return 0;
        }
        ((self.correct as f64 / self.attempts as f64) * 100.0).round() as u8
    }

    pub fn is_mastered(&self) -> bool {
        self.tier >= 4
    }
}

/// Aggregates across the grid tables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_correct: u32,
    pub total_attempts: u32,
    pub success_percent: u8,
    pub tables_mastered: u32,
}

pub fn global_stats(statistics: &BTreeMap<u8, TableStats>) -> GlobalStats {
    let mut total_correct = 0;
    let mut total_attempts = 0;
    let mut tables_mastered = 0;

    for table in GRID_TABLES {
        if let Some(stats) = statistics.get(&table) {
            total_correct += stats.correct;
            total_attempts += stats.attempts;
            if stats.is_mastered() {
                tables_mastered += 1;
            }
        }
    }

    let success_percent = if total_attempts > 0 {
        ((total_correct as f64 / total_attempts as f64) * 100.0).round() as u8
    } else {
        0
    };

    GlobalStats {
        total_correct,
        total_attempts,
        success_percent,
        tables_mastered,
    }
}

/// One row of the table overview grid.
#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    pub table: u8,
    pub tier: u8,
    pub attempts: u32,
    pub success_percent: u8,
    pub mastered: bool,
    pub label: &'static str,
}

pub fn table_grid(statistics: &BTreeMap<u8, TableStats>) -> Vec<TableRow> {
    GRID_TABLES
        .map(|table| {
            let stats = statistics.get(&table).cloned().unwrap_or_default();
            TableRow {
                table,
                tier: stats.tier,
                attempts: stats.attempts,
                success_percent: stats.success_percent(),
                mastered: stats.is_mastered(),
                label: tier_label(stats.tier),
            }
        })
        .collect()
}
