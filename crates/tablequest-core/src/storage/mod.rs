//! Local persistence: per-profile progress records and the profile index.
//!
//! Everything is plain JSON on disk. Records merge with defaults on load so
//! a file written by an older build never errors, and write failures are
//! reported but non-fatal - the session continues on in-memory state.

pub mod profiles;
pub mod progress;

pub use profiles::{Profile, ProfileStore};
pub use progress::{PlayerInfo, ProgressRecord, Settings, SCHEMA_VERSION};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/tablequest[-dev]/` based on TABLEQUEST_ENV.
///
/// Set TABLEQUEST_ENV=dev to use a development data directory.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TABLEQUEST_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("tablequest-dev")
    } else {
        base_dir.join("tablequest")
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
