//! The per-profile progress record.
//!
//! One JSON document per profile holds the player identity, cumulative
//! per-table statistics, the owned badge set, settings, and the star total.
//! Every field carries a serde default so loading an older record fills the
//! gaps instead of failing; `schema_version` marks where future structural
//! upgrades hook in.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::SettingsError;
use crate::progression::badges::BadgeKind;
use crate::progression::mastery::TableStats;
use crate::session::engine::SessionSummary;
use crate::session::question::DifficultyTier;

/// Current record layout version.
pub const SCHEMA_VERSION: u32 = 1;

/// Player identity shown in the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_avatar")]
    pub avatar: String,
}

fn default_avatar() -> String {
    "dragon".to_string()
}

impl Default for PlayerInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            avatar: default_avatar(),
        }
    }
}

/// Per-profile preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default = "default_difficulty")]
    pub difficulty: DifficultyTier,
    /// Pause before advancing to the next question after a correct answer.
    #[serde(default = "default_validation_delay")]
    pub validation_delay_ms: u32,
    /// Questions per session.
    #[serde(default = "default_question_count")]
    pub question_count: u32,
}

fn default_true() -> bool {
    true
}
fn default_difficulty() -> DifficultyTier {
    DifficultyTier::Adaptive
}
fn default_validation_delay() -> u32 {
    1500
}
fn default_question_count() -> u32 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            difficulty: DifficultyTier::Adaptive,
            validation_delay_ms: 1500,
            question_count: 10,
        }
    }
}

impl Settings {
    /// Get a settings value as a string by key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let value = json.get(key)?;
        match value {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a settings value by key, parsing the string for the field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| SettingsError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        let obj = json
            .as_object_mut()
            .ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;
        let existing = obj
            .get(key)
            .ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => {
                let parsed = value.parse::<bool>().map_err(|_| SettingsError::InvalidValue {
                    key: key.to_string(),
                    message: format!("cannot parse '{value}' as a boolean"),
                })?;
                serde_json::Value::Bool(parsed)
            }
            serde_json::Value::Number(_) => {
                let parsed = value.parse::<u64>().map_err(|_| SettingsError::InvalidValue {
                    key: key.to_string(),
                    message: format!("cannot parse '{value}' as a number"),
                })?;
                serde_json::Value::Number(parsed.into())
            }
            _ => serde_json::Value::String(value.to_string()),
        };

        obj.insert(key.to_string(), new_value);
        *self = serde_json::from_value(json).map_err(|e| SettingsError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Reset one key to its default.
    pub fn reset(&mut self, key: &str) -> Result<(), SettingsError> {
        let defaults = Settings::default();
        let default_value = defaults
            .get(key)
            .ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;
        self.set(key, &default_value)
    }

    pub fn keys() -> &'static [&'static str] {
        &[
            "sound_enabled",
            "difficulty",
            "validation_delay_ms",
            "question_count",
        ]
    }
}

/// Everything persisted for one profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(default)]
    pub schema_version: u32,
    #[serde(default)]
    pub player: PlayerInfo,
    /// Cumulative statistics keyed by times table.
    #[serde(default)]
    pub statistics: BTreeMap<u8, TableStats>,
    /// Owned badge ids. Append-only set; unknown ids from newer builds are
    /// kept as-is.
    #[serde(default)]
    pub badges: BTreeSet<String>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub total_stars: u64,
}

impl ProgressRecord {
    pub fn new(player: PlayerInfo) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            player,
            ..Default::default()
        }
    }

    /// Bring a loaded record up to the current schema.
    ///
    /// Version 0 records (written before versioning existed) only need
    /// their missing fields defaulted, which serde already did; future
    /// structural changes get an explicit migration arm here.
    pub fn upgrade(&mut self) {
        if self.schema_version < SCHEMA_VERSION {
            self.schema_version = SCHEMA_VERSION;
        }
    }

    pub fn table_stats(&self, table: u8) -> TableStats {
        self.statistics.get(&table).cloned().unwrap_or_default()
    }

    /// Award a badge. Returns true when it was newly earned; re-earning an
    /// owned badge is a no-op.
    pub fn award(&mut self, badge: BadgeKind) -> bool {
        self.badges.insert(badge.id())
    }

    pub fn has_badge(&self, badge: BadgeKind) -> bool {
        self.badges.contains(&badge.id())
    }

    /// Fold a finished session into long-term progress.
    ///
    /// Table statistics only accumulate for table-filtered sessions; stars
    /// and badges always land. Returns the badges that were newly earned.
    pub fn apply_session(&mut self, summary: &SessionSummary) -> Vec<BadgeKind> {
        if let Some(table) = summary.table {
            self.statistics.entry(table).or_default().fold_session(
                summary.correct,
                summary.answered,
                summary.mean_response_secs,
            );
        }

        self.total_stars += summary.stars as u64;

        summary
            .badges
            .iter()
            .copied()
            .filter(|badge| self.award(*badge))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::badges::BadgeKind;

    fn summary(table: Option<u8>, correct: u32, answered: u32, stars: u32) -> SessionSummary {
        SessionSummary {
            table,
            chosen_numbers: None,
            answered,
            correct,
            stars,
            success_percent: if answered > 0 {
                ((correct as f64 / answered as f64) * 100.0).round() as u8
            } else {
                0
            },
            duration_secs: 120,
            mean_response_secs: 3.0,
            badges: vec![BadgeKind::FirstSteps],
        }
    }

    #[test]
    fn table_sessions_fold_statistics() {
        let mut record = ProgressRecord::default();
        record.apply_session(&summary(Some(7), 9, 10, 100));
        let stats = record.table_stats(7);
        assert_eq!(stats.correct, 9);
        assert_eq!(stats.attempts, 10);
        assert_eq!(record.total_stars, 100);
    }

    #[test]
    fn chosen_number_sessions_only_add_stars() {
        let mut record = ProgressRecord::default();
        record.apply_session(&summary(None, 8, 10, 80));
        assert!(record.statistics.is_empty());
        assert_eq!(record.total_stars, 80);
        assert!(record.has_badge(BadgeKind::FirstSteps));
    }

    #[test]
    fn badge_awards_are_idempotent() {
        let mut record = ProgressRecord::default();
        let first = record.apply_session(&summary(Some(3), 10, 10, 100));
        assert_eq!(first, vec![BadgeKind::FirstSteps]);

        let second = record.apply_session(&summary(Some(3), 10, 10, 100));
        assert!(second.is_empty());
        assert_eq!(record.badges.len(), 1);
    }

    #[test]
    fn old_records_load_with_defaults() {
        // A minimal record from before schema versioning.
        let json = r#"{"player": {"name": "Zoé"}}"#;
        let mut record: ProgressRecord = serde_json::from_str(json).unwrap();
        record.upgrade();
        assert_eq!(record.schema_version, SCHEMA_VERSION);
        assert_eq!(record.player.name, "Zoé");
        assert_eq!(record.player.avatar, "dragon");
        assert_eq!(record.settings, Settings::default());
        assert_eq!(record.total_stars, 0);
    }

    #[test]
    fn unknown_badge_ids_survive_a_round_trip() {
        let json = r#"{"badges": ["parfait", "from_the_future"]}"#;
        let record: ProgressRecord = serde_json::from_str(json).unwrap();
        assert!(record.has_badge(BadgeKind::Perfection));
        let out = serde_json::to_string(&record).unwrap();
        assert!(out.contains("from_the_future"));
    }

    #[test]
    fn settings_get_returns_strings() {
        let settings = Settings::default();
        assert_eq!(settings.get("sound_enabled").as_deref(), Some("true"));
        assert_eq!(settings.get("difficulty").as_deref(), Some("adaptive"));
        assert_eq!(settings.get("question_count").as_deref(), Some("10"));
        assert!(settings.get("missing").is_none());
    }

    #[test]
    fn settings_set_parses_for_the_field_type() {
        let mut settings = Settings::default();
        settings.set("sound_enabled", "false").unwrap();
        assert!(!settings.sound_enabled);

        settings.set("question_count", "20").unwrap();
        assert_eq!(settings.question_count, 20);

        settings.set("difficulty", "advanced").unwrap();
        assert_eq!(settings.difficulty, DifficultyTier::Advanced);
    }

    #[test]
    fn settings_set_rejects_bad_input() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.set("nonexistent", "1"),
            Err(SettingsError::UnknownKey(_))
        ));
        assert!(matches!(
            settings.set("sound_enabled", "loud"),
            Err(SettingsError::InvalidValue { .. })
        ));
        assert!(settings.set("difficulty", "impossible").is_err());
        // Nothing changed.
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn settings_reset_restores_the_default() {
        let mut settings = Settings::default();
        settings.set("question_count", "25").unwrap();
        settings.reset("question_count").unwrap();
        assert_eq!(settings.question_count, 10);
    }
}
