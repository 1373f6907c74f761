use std::io;
use thiserror::Error;

/// Application-wide error type for everything outside a single analysis round-trip.
///
/// Failures of the analysis itself are [`crate::actors::messages::AnalysisError`]s and
/// end up as a message in the controller state instead of propagating.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents standard input/output errors (console, HTTP client setup).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents failures talking to the controller actor, such as a closed channel.
    #[error("Actor error: {0}")]
    Actor(String),

    /// Represents configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(format!("URL parse error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Config(format!("Validation errors: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Io(io::Error::other(format!("HTTP error: {}", err)))
    }
}
