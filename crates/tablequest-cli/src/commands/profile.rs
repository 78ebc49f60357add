//! Profile management commands.

use clap::Subcommand;
use tablequest_core::ProfileStore;

use super::common;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// List saved profiles
    List,
    /// Create a new profile
    Create {
        /// Display name
        name: String,
        /// Avatar id
        #[arg(long, default_value = "dragon")]
        avatar: String,
    },
    /// Switch the active profile
    Use {
        /// Profile id (a unique prefix is enough)
        id: String,
    },
    /// Rename a profile or change its avatar
    Rename {
        /// Profile id (a unique prefix is enough)
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Delete a profile and its progress
    Delete {
        /// Profile id (a unique prefix is enough)
        id: String,
    },
    /// Show the active profile
    Show,
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = ProfileStore::open()?;
    match action {
        ProfileAction::List => {
            if store.profiles().is_empty() {
                println!("No profiles yet. Create one with `tablequest profile create <name>`.");
                return Ok(());
            }
            let active_id = store.active().map(|p| p.id.clone());
            for profile in store.profiles() {
                let marker = if Some(&profile.id) == active_id.as_ref() {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{} {}  {} ({})  last seen {}",
                    marker,
                    profile.id,
                    profile.name,
                    profile.avatar,
                    profile.last_seen_at.format("%Y-%m-%d")
                );
            }
        }
        ProfileAction::Create { name, avatar } => {
            let first = store.profiles().is_empty();
            let profile = store.create(&name, &avatar)?;
            // The first profile becomes active right away.
            if first {
                store.set_active(Some(&profile.id))?;
            }
            println!("Profile created: {} ({})", profile.name, profile.id);
        }
        ProfileAction::Use { id } => {
            let id = resolve(&store, &id)?;
            store.set_active(Some(&id))?;
            println!("Active profile: {}", store.active().map(|p| p.name.as_str()).unwrap_or(""));
        }
        ProfileAction::Rename { id, name, avatar } => {
            let id = resolve(&store, &id)?;
            store.update(&id, name.as_deref(), avatar.as_deref())?;
            println!("Profile updated.");
        }
        ProfileAction::Delete { id } => {
            let id = resolve(&store, &id)?;
            store.delete(&id)?;
            println!("Profile deleted.");
        }
        ProfileAction::Show => {
            let (_, record) = common::active_progress(&store)?;
            println!("{} ({})", record.player.name, record.player.avatar);
            println!("  ⭐ {} stars, {} badges", record.total_stars, record.badges.len());
        }
    }
    Ok(())
}

/// Accept a full id or a unique prefix.
fn resolve(store: &ProfileStore, id: &str) -> Result<String, Box<dyn std::error::Error>> {
    let matches: Vec<&str> = store
        .profiles()
        .iter()
        .filter(|p| p.id.starts_with(id))
        .map(|p| p.id.as_str())
        .collect();
    match matches.as_slice() {
        [only] => Ok(only.to_string()),
        [] => Err(format!("no profile matches '{id}'").into()),
        _ => Err(format!("'{id}' is ambiguous, give more of the id").into()),
    }
}
