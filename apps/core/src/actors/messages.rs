use crate::controller::{Action, ControllerSnapshot};
use serde::Serialize;
use tokio::sync::oneshot;

/// Shown when Submit is pressed with blank input.
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some text to analyze.";
/// Shown for every transport-level failure; the underlying cause is only logged.
pub const CONNECTION_FAILURE_MESSAGE: &str = "Failed to connect to the server. Please try again.";
/// Shown when the service reports a failure without a message of its own.
pub const GENERIC_SERVICE_MESSAGE: &str = "An error occurred during analysis.";

/// Defines errors that can end a single analysis attempt.
#[derive(Debug, thiserror::Error, Serialize, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The input was empty or whitespace-only; no request was sent.
    #[error("Validation failed: empty input")]
    Validation,
    /// The service answered with `success: false` or a non-2xx status.
    #[error("Analysis service error: {0}")]
    Service(String),
    /// The request never completed, or the body did not match the contract.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl AnalysisError {
    /// The message the user sees for this error.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Validation => EMPTY_INPUT_MESSAGE.to_string(),
            AnalysisError::Service(message) => message.clone(),
            AnalysisError::Transport(_) => CONNECTION_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        AnalysisError::Transport(err.to_string())
    }
}

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Messages that can be sent to the controller actor.
#[derive(Debug)]
pub enum ControllerMessage {
    /// Applies an action to the state machine.
    Dispatch {
        action: Action,
        /// A channel to send the resulting snapshot back.
        responder: oneshot::Sender<ControllerSnapshot>,
    },
    /// Reads the current snapshot without changing anything.
    Snapshot {
        responder: oneshot::Sender<ControllerSnapshot>,
    },
    /// A command to stop the actor. In-flight work is dropped.
    Shutdown,
}
