//! # TableQuest Core Library
//!
//! This library provides the core logic for TableQuest, a multiplication
//! practice app for young learners. It is CLI-first: everything is driven
//! through a standalone binary, with any richer front end expected to be a
//! thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Session Engine**: a caller-driven state machine that sequences
//!   questions, verifies answers, awards stars, and evaluates badges
//! - **Difficulty**: a rolling window of recent outcomes that promotes or
//!   demotes the effective tier in adaptive mode
//! - **Progression**: cumulative per-table statistics folded into a 1..=5
//!   mastery tier, plus the badge catalog
//! - **Storage**: JSON-on-disk profiles and progress records with
//!   merge-with-defaults loading
//!
//! ## Key Components
//!
//! - [`SessionEngine`]: core session state machine
//! - [`AnswerHistory`]: rolling-window difficulty tracker
//! - [`ProfileStore`]: profile index and progress persistence
//! - [`Event`]: notifications for the feedback layer

pub mod error;
pub mod events;
pub mod progression;
pub mod session;
pub mod storage;

pub use error::{CoreError, Result, SessionError, SettingsError, StorageError};
pub use events::{Event, FeedbackSink, NullFeedback};
pub use progression::{BadgeKind, GlobalStats, TableRow, TableStats};
pub use session::{
    parse_answer, AnswerFeedback, AnswerHistory, DifficultyTier, Question, SessionEngine,
    SessionState, SessionSummary, TierChange,
};
pub use storage::{Profile, ProfileStore, ProgressRecord, Settings};
