//! Settings for the active profile.

use clap::Subcommand;
use tablequest_core::{ProfileStore, Settings};

use super::common;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show all settings
    Show,
    /// Get a single value
    Get { key: String },
    /// Set a value
    Set { key: String, value: String },
    /// Reset a key to its default
    Reset { key: String },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = ProfileStore::open()?;
    let (profile_id, mut record) = common::active_progress(&store)?;

    match action {
        ConfigAction::Show => {
            for key in Settings::keys() {
                if let Some(value) = record.settings.get(key) {
                    println!("{key} = {value}");
                }
            }
        }
        ConfigAction::Get { key } => match record.settings.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown settings key: {key}").into()),
        },
        ConfigAction::Set { key, value } => {
            record.settings.set(&key, &value)?;
            store.save_progress(&profile_id, &record)?;
            println!("{key} = {value}");
        }
        ConfigAction::Reset { key } => {
            record.settings.reset(&key)?;
            store.save_progress(&profile_id, &record)?;
            println!(
                "{key} = {}",
                record.settings.get(&key).unwrap_or_default()
            );
        }
    }
    Ok(())
}
