use std::io;
use thiserror::Error;

use crate::actors::messages::ActorError;

/// Crate-wide error type, consolidating every failure the mood core can report.
#[derive(Debug, Error)]
pub enum AppError {
    /// An event referenced a mood outside the supported enumeration.
    #[error("Invalid mood: {0}")]
    InvalidMood(String),

    /// Represents standard input/output errors from the file store.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents data validation errors (bad JSON, out-of-range journal values, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., unparseable environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents errors from the profile actor, such as a closed channel.
    #[error("Actor error: {0}")]
    Actor(#[from] ActorError),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::InvalidMood(s) => AppError::InvalidMood(s.clone()),
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Actor(e) => AppError::Actor(e.clone()),
            AppError::Internal(s) => AppError::Internal(s.clone()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Validation(format!("Date parse error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
