//! Multi-profile store.
//!
//! A `profiles.json` index lists the saved profiles and which one is
//! active; each profile owns one `progress_<id>.json` record. At most one
//! profile is active at a time, referenced by id.
//!
//! Reads are forgiving: a missing or unreadable progress file yields a
//! fresh default record seeded with the profile's identity. Only writes
//! surface errors, and callers are expected to keep going on in-memory
//! state when one fails.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::progress::{PlayerInfo, ProgressRecord};
use crate::error::StorageError;

/// Profile index file name.
const PROFILES_FILE: &str = "profiles.json";

/// One saved learner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ProfileIndex {
    #[serde(default)]
    profiles: Vec<Profile>,
    #[serde(default)]
    active_id: Option<String>,
}

/// Store managing the profile index and per-profile progress files.
#[derive(Debug)]
pub struct ProfileStore {
    dir: PathBuf,
    index: ProfileIndex,
}

impl ProfileStore {
    /// Open the store in the default data directory.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self::open_at(super::data_dir()?))
    }

    /// Open the store rooted at an explicit directory.
    pub fn open_at(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let index = match std::fs::read_to_string(dir.join(PROFILES_FILE)) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => ProfileIndex::default(),
        };
        Self { dir, index }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.index.profiles
    }

    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.index.profiles.iter().find(|p| p.id == id)
    }

    /// The active profile, if one is set and still exists.
    pub fn active(&self) -> Option<&Profile> {
        let id = self.index.active_id.as_deref()?;
        self.get(id)
    }

    /// Create a profile with an empty progress record and persist both.
    pub fn create(&mut self, name: &str, avatar: &str) -> Result<Profile, StorageError> {
        let now = Utc::now();
        let profile = Profile {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            avatar: avatar.to_string(),
            created_at: now,
            last_seen_at: now,
        };

        let record = ProgressRecord::new(PlayerInfo {
            name: name.to_string(),
            avatar: avatar.to_string(),
        });
        self.save_progress(&profile.id, &record)?;

        self.index.profiles.push(profile.clone());
        self.save_index()?;
        Ok(profile)
    }

    /// Update a profile's display identity, mirroring it into the record.
    pub fn update(
        &mut self,
        id: &str,
        name: Option<&str>,
        avatar: Option<&str>,
    ) -> Result<(), StorageError> {
        let profile = self
            .index
            .profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StorageError::ProfileNotFound(id.to_string()))?;

        if let Some(name) = name {
            profile.name = name.to_string();
        }
        if let Some(avatar) = avatar {
            profile.avatar = avatar.to_string();
        }
        self.save_index()?;

        let mut record = self.load_progress(id)?;
        if let Some(name) = name {
            record.player.name = name.to_string();
        }
        if let Some(avatar) = avatar {
            record.player.avatar = avatar.to_string();
        }
        self.save_progress(id, &record)
    }

    /// Delete a profile and its progress. Clears the active marker when the
    /// active profile is the one removed.
    pub fn delete(&mut self, id: &str) -> Result<(), StorageError> {
        let position = self
            .index
            .profiles
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StorageError::ProfileNotFound(id.to_string()))?;
        self.index.profiles.remove(position);

        if self.index.active_id.as_deref() == Some(id) {
            self.index.active_id = None;
        }

        // The record file may already be gone; that is fine.
        let _ = std::fs::remove_file(self.progress_path(id));

        self.save_index()
    }

    /// Switch the active profile (or clear it with `None`), stamping
    /// `last_seen_at` on activation.
    pub fn set_active(&mut self, id: Option<&str>) -> Result<(), StorageError> {
        match id {
            Some(id) => {
                let profile = self
                    .index
                    .profiles
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| StorageError::ProfileNotFound(id.to_string()))?;
                profile.last_seen_at = Utc::now();
                self.index.active_id = Some(id.to_string());
            }
            None => self.index.active_id = None,
        }
        self.save_index()
    }

    /// Load a profile's progress, merged with defaults.
    ///
    /// A missing or corrupt file yields a fresh record carrying the
    /// profile's identity - losing a record must never block play.
    pub fn load_progress(&self, id: &str) -> Result<ProgressRecord, StorageError> {
        let profile = self
            .get(id)
            .ok_or_else(|| StorageError::ProfileNotFound(id.to_string()))?;

        let mut record = match std::fs::read_to_string(self.progress_path(id)) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|_| {
                ProgressRecord::new(PlayerInfo {
                    name: profile.name.clone(),
                    avatar: profile.avatar.clone(),
                })
            }),
            Err(_) => ProgressRecord::new(PlayerInfo {
                name: profile.name.clone(),
                avatar: profile.avatar.clone(),
            }),
        };
        record.upgrade();
        Ok(record)
    }

    /// Persist a profile's progress record.
    pub fn save_progress(&self, id: &str, record: &ProgressRecord) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(record)?;
        write_file(&self.progress_path(id), &content)
    }

    fn save_index(&self) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(&self.index)?;
        write_file(&self.dir.join(PROFILES_FILE), &content)
    }

    fn progress_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("progress_{id}.json"))
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), StorageError> {
    std::fs::write(path, content).map_err(|source| StorageError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })
}
