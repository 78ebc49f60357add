//! Mastery grid for the times tables.

use tablequest_core::progression::mastery::table_grid;
use tablequest_core::ProfileStore;

use super::common;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = ProfileStore::open()?;
    let (_, record) = common::active_progress(&store)?;

    println!("Table  Level       Attempts  Success");
    for row in table_grid(&record.statistics) {
        let stars: String = (1..=5)
            .map(|i| if i <= row.tier { '★' } else { '☆' })
            .collect();
        let mark = if row.mastered { " 🥇" } else { "" };
        println!(
            "  ×{:<3} {} {:<10} {:>5} {:>7}%{}",
            row.table, stars, row.label, row.attempts, row.success_percent, mark
        );
    }
    Ok(())
}
