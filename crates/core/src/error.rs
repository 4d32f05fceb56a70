use thiserror::Error;

use crate::generator::GenerateError;
use crate::grader::GradeError;
use crate::model::{HistoryError, QuestionError, TokenError};
use crate::settings::SettingsError;

/// Any failure raised by the engine, for callers that don't care which step failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Grade(#[from] GradeError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
