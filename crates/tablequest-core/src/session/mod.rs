//! One practice session: question generation, difficulty adaptation, and
//! the engine state machine that ties them together.

pub mod difficulty;
pub mod engine;
pub mod messages;
pub mod question;

pub use difficulty::{Adjustment, AnswerHistory, WindowStats, HISTORY_CAPACITY};
pub use engine::{
    hint_for, AnswerFeedback, ResponseEntry, SessionEngine, SessionProgress, SessionState,
    SessionSummary, TierChange,
};
pub use question::{DifficultyTier, Question};

use crate::error::SessionError;

/// Parse a learner's raw input as an answer value.
///
/// Non-numeric input is a retry prompt, not a failure: the caller reports
/// the error and asks again without touching session state.
pub fn parse_answer(input: &str) -> Result<u16, SessionError> {
    input
        .trim()
        .parse::<u16>()
        .map_err(|_| SessionError::InvalidAnswerInput(input.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_answer_accepts_numbers_and_whitespace() {
        assert_eq!(parse_answer("42").unwrap(), 42);
        assert_eq!(parse_answer("  7 \n").unwrap(), 7);
    }

    #[test]
    fn parse_answer_rejects_garbage() {
        assert!(matches!(
            parse_answer("twelve"),
            Err(SessionError::InvalidAnswerInput(_))
        ));
        assert!(parse_answer("").is_err());
        assert!(parse_answer("-3").is_err());
    }
}
