//! Shared helpers for the command modules.

use tablequest_core::{ProfileStore, ProgressRecord};

/// Load the active profile's progress, or explain how to get one.
pub fn active_progress(
    store: &ProfileStore,
) -> Result<(String, ProgressRecord), Box<dyn std::error::Error>> {
    let profile = store.active().ok_or(
        "no active profile; create one with `tablequest profile create <name>` \
         then select it with `tablequest profile use <id>`",
    )?;
    let id = profile.id.clone();
    let record = store.load_progress(&id)?;
    Ok((id, record))
}

/// Parse a `--numbers` spec like `3,6,8` into a deduplicated set.
pub fn parse_numbers(spec: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut numbers: Vec<u8> = Vec::new();
    for part in spec.split(',') {
        let part = part.trim();
        let n: u8 = part
            .parse()
            .map_err(|_| format!("'{part}' is not a number"))?;
        if !(1..=10).contains(&n) {
            return Err(format!("chosen numbers must be between 1 and 10, got {n}").into());
        }
        if !numbers.contains(&n) {
            numbers.push(n);
        }
    }
    if numbers.len() < 2 {
        return Err("pick at least two distinct numbers, e.g. --numbers 3,6,8".into());
    }
    Ok(numbers)
}
