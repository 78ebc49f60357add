//! Core error types for tablequest-core.
//!
//! Everything here is recoverable: a failed answer submission or a storage
//! write that cannot complete leaves the session usable. Callers report the
//! error and carry on with in-memory state.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tablequest-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Session lifecycle errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Persistence errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Settings access errors
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Session-specific errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// An answer was submitted while no question was pending
    #[error("No question is currently active")]
    NoActiveQuestion,

    /// An operation that requires a running session was called outside one
    #[error("No session is in progress")]
    NotInProgress,

    /// The submitted answer could not be read as a number
    #[error("'{0}' is not a number")]
    InvalidAnswerInput(String),
}

/// Persistence errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Referenced profile does not exist
    #[error("Profile '{0}' not found")]
    ProfileNotFound(String),

    /// A record could not be written to disk
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be serialized
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The data directory could not be created
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Settings access errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Unknown settings key
    #[error("Unknown settings key: {0}")]
    UnknownKey(String),

    /// Value cannot be parsed for the key's type
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
