//! Badge collection display.

use tablequest_core::{BadgeKind, ProfileStore};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = ProfileStore::open()?;
    // No active profile still shows the catalog, just with nothing owned.
    let owned = match store.active() {
        Some(profile) => store.load_progress(&profile.id)?.badges,
        None => Default::default(),
    };

    for badge in BadgeKind::catalog() {
        let mark = if owned.contains(&badge.id()) { "✔" } else { "·" };
        println!("{mark} {badge} — {}", badge.description());
    }
    Ok(())
}
