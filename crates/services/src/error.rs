//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{HistoryError, TokenError};
use quiz_core::{GenerateError, GradeError, SettingsError};

/// Errors emitted by `QuizSession`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no quiz has been started")]
    NotStarted,
    #[error("this question has no part at index {part}")]
    NoSuchPart { part: usize },
    #[error("part {part} has no sub-part at index {sub}")]
    NoSuchSubPart { part: usize, sub: usize },
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Grade(#[from] GradeError),
    #[error("session could not be saved or restored: {0}")]
    Persist(#[from] serde_json::Error),
}

/// Errors emitted while reading `SessionConfig` from the environment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{var} is not a valid {expected}: {raw:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        raw: String,
    },
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
