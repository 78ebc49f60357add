//! Long-term progression: per-table mastery and the badge catalog.

pub mod badges;
pub mod mastery;

pub use badges::{session_badges, BadgeKind};
pub use mastery::{
    global_stats, mastery_tier, table_grid, tier_label, GlobalStats, TableRow, TableStats,
};
