//! Player statistics.

use serde::Serialize;
use tablequest_core::progression::mastery::{global_stats, table_grid, GlobalStats, TableRow};
use tablequest_core::ProfileStore;

use super::common;

#[derive(Serialize)]
struct StatsReport {
    player: String,
    avatar: String,
    total_stars: u64,
    badges_owned: usize,
    global: GlobalStats,
    tables: Vec<TableRow>,
}

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = ProfileStore::open()?;
    let (_, record) = common::active_progress(&store)?;

    let report = StatsReport {
        player: record.player.name.clone(),
        avatar: record.player.avatar.clone(),
        total_stars: record.total_stars,
        badges_owned: record.badges.len(),
        global: global_stats(&record.statistics),
        tables: table_grid(&record.statistics),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} ({})", report.player, report.avatar);
    println!("  ⭐ {} stars   🏅 {} badges", report.total_stars, report.badges_owned);
    println!(
        "  {}/{} correct all-time ({}%)",
        report.global.total_correct, report.global.total_attempts, report.global.success_percent
    );
    println!("  {} table(s) mastered", report.global.tables_mastered);
    Ok(())
}
