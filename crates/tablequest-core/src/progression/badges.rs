//! Badge catalog and session award rules.
//!
//! Badges are parameterized rather than pre-enumerated: one
//! `TableMastery(n)` variant covers every "master of table n" badge while
//! keeping the flat string ids used by the persisted record.

use std::fmt;

/// A badge definition. `TableMastery` carries the table it certifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BadgeKind {
    FirstSteps,
    Perfection,
    Speed,
    TableMastery(u8),
}

impl BadgeKind {
    /// Stable id used in the persisted badge set.
    pub fn id(self) -> String {
        match self {
            BadgeKind::FirstSteps => "debutant".to_string(),
            BadgeKind::Perfection => "parfait".to_string(),
            BadgeKind::Speed => "rapide".to_string(),
            BadgeKind::TableMastery(table) => format!("table_{table}_master"),
        }
    }

    /// Parse a persisted id back to a badge. Unknown ids are `None` so a
    /// record written by a newer version still loads.
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "debutant" => Some(BadgeKind::FirstSteps),
            "parfait" => Some(BadgeKind::Perfection),
            "rapide" => Some(BadgeKind::Speed),
            _ => {
                let table: u8 = id.strip_prefix("table_")?.strip_suffix("_master")?.parse().ok()?;
                Some(BadgeKind::TableMastery(table))
            }
        }
    }

    pub fn name(self) -> String {
        match self {
            BadgeKind::FirstSteps => "First steps".to_string(),
            BadgeKind::Perfection => "Perfection".to_string(),
            BadgeKind::Speed => "Lightning".to_string(),
            BadgeKind::TableMastery(table) => format!("Master of {table}"),
        }
    }

    pub fn description(self) -> String {
        match self {
            BadgeKind::FirstSteps => "Finish your first challenge".to_string(),
            BadgeKind::Perfection => "Answer 10 questions without a mistake".to_string(),
            BadgeKind::Speed => "Finish a challenge in under 5 minutes".to_string(),
            BadgeKind::TableMastery(table) => format!("Master the {table} times table"),
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            BadgeKind::FirstSteps => "🎯",
            BadgeKind::Perfection => "💯",
            BadgeKind::Speed => "⚡",
            BadgeKind::TableMastery(_) => "🥇",
        }
    }

    /// Full catalog: the three session badges plus mastery for tables 2..=9.
    pub fn catalog() -> Vec<BadgeKind> {
        let mut all = vec![BadgeKind::FirstSteps, BadgeKind::Perfection, BadgeKind::Speed];
        all.extend((2..=9).map(BadgeKind::TableMastery));
        all
    }
}

impl fmt::Display for BadgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon(), self.name())
    }
}

impl serde::Serialize for BadgeKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.id())
    }
}

impl<'de> serde::Deserialize<'de> for BadgeKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = String::deserialize(deserializer)?;
        BadgeKind::parse(&id)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown badge id '{id}'")))
    }
}

/// Badges earned by a finished session.
///
/// `success_rate` is the overall session rate (correct / answered).
pub fn session_badges(
    table: Option<u8>,
    answered: u32,
    target: u32,
    success_rate: f64,
    duration_secs: u64,
) -> Vec<BadgeKind> {
    let mut earned = Vec::new();

    if answered >= target {
        earned.push(BadgeKind::FirstSteps);
    }

    if success_rate == 1.0 && answered >= 10 {
        earned.push(BadgeKind::Perfection);
    }

    if let Some(table) = table {
        if success_rate >= 0.9 {
            earned.push(BadgeKind::TableMastery(table));
        }
    }

    if duration_secs < 300 && answered >= 10 {
        earned.push(BadgeKind::Speed);
    }

    earned
}
