//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::OptionLabel;
use storage::{LoadError, ReportWriteError};

/// Errors emitted by `QuizSession`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions loaded")]
    Empty,
    #[error("select an answer first")]
    NoSelection,
    #[error("option {label} is not available for this question")]
    OptionUnavailable { label: OptionLabel },
    #[error("exam already submitted; start a new attempt")]
    Finished,
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Export(#[from] ReportWriteError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
