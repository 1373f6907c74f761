//! # Analysis Controller
//!
//! Synchronous state machine for one analysis at a time. Every mutation goes through
//! [`AnalysisController::dispatch`], which returns the [`Effect`]s the runtime must
//! carry out. The controller never performs I/O itself, so it can be driven headlessly.
//!
//! ## Lifecycle
//! `Idle -> Loading -> ResultsShown | Error`, with `Error` falling back to `Idle` when
//! its dismiss timer fires and `ResultsShown` falling back to `Idle` when closed.

use crate::actors::messages::AnalysisError;
use crate::models::{AnalysisRequest, AnalysisResult};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Identifier attached to each submitted request.
pub type RequestId = u64;
/// Identifier attached to each scheduled error-dismiss timer.
pub type TimerId = u64;

/// What the user currently sees.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ControllerState {
    Idle,
    Loading,
    Error(String),
    ResultsShown(AnalysisResult),
}

/// Inputs to the state machine.
///
/// The first six variants are user actions. `ServiceResponded` and
/// `ErrorTimeoutElapsed` are posted by the runtime when an effect completes.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    EditText(String),
    PickExample(String),
    Clear,
    Submit,
    DismissError,
    CloseResults,
    ServiceResponded {
        request_id: RequestId,
        outcome: Result<AnalysisResult, AnalysisError>,
    },
    ErrorTimeoutElapsed {
        timer_id: TimerId,
    },
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Send `request` to the analysis service and report back with `request_id`.
    SendRequest {
        request_id: RequestId,
        request: AnalysisRequest,
    },
    /// Start the dismiss timer for the current error, replacing any running one.
    ScheduleErrorDismiss { timer_id: TimerId, after: Duration },
    /// Stop the running dismiss timer, if any.
    CancelErrorDismiss,
}

/// Observable copy of the controller, published after every transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerSnapshot {
    pub state: ControllerState,
    pub input_text: String,
    pub input_len: usize,
    pub submit_enabled: bool,
    pub in_flight: Option<RequestId>,
    /// The most recent successful result, kept after the panel is closed.
    pub last_result: Option<AnalysisResult>,
}

pub struct AnalysisController {
    state: ControllerState,
    input_text: String,
    input_len: usize,
    last_result: Option<AnalysisResult>,
    in_flight: Option<RequestId>,
    next_request_id: RequestId,
    error_timer: TimerId,
    error_dismiss_after: Duration,
}

impl AnalysisController {
    pub fn new(error_dismiss_after: Duration) -> Self {
        Self {
            state: ControllerState::Idle,
            input_text: String::new(),
            input_len: 0,
            last_result: None,
            in_flight: None,
            next_request_id: 1,
            error_timer: 0,
            error_dismiss_after,
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn input_len(&self) -> usize {
        self.input_len
    }

    /// The most recent successful result, kept after the panel is closed and
    /// dropped by Clear.
    pub fn last_result(&self) -> Option<&AnalysisResult> {
        self.last_result.as_ref()
    }

    /// Submit is disabled while a request is in flight.
    pub fn is_submit_enabled(&self) -> bool {
        self.state != ControllerState::Loading
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            state: self.state.clone(),
            input_text: self.input_text.clone(),
            input_len: self.input_len,
            submit_enabled: self.is_submit_enabled(),
            in_flight: self.in_flight,
            last_result: self.last_result.clone(),
        }
    }

    /// Applies one action and returns the effects the caller must run.
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::EditText(text) | Action::PickExample(text) => {
                self.set_input(text);
                Vec::new()
            }
            Action::Clear => self.clear(),
            Action::Submit => self.submit(),
            Action::DismissError => {
                if matches!(self.state, ControllerState::Error(_)) {
                    self.state = ControllerState::Idle;
                    vec![Effect::CancelErrorDismiss]
                } else {
                    Vec::new()
                }
            }
            Action::CloseResults => {
                if matches!(self.state, ControllerState::ResultsShown(_)) {
                    self.state = ControllerState::Idle;
                }
                Vec::new()
            }
            Action::ServiceResponded {
                request_id,
                outcome,
            } => self.apply_response(request_id, outcome),
            Action::ErrorTimeoutElapsed { timer_id } => {
                if timer_id == self.error_timer && matches!(self.state, ControllerState::Error(_)) {
                    debug!("Error auto-dismissed (timer {})", timer_id);
                    self.state = ControllerState::Idle;
                }
                Vec::new()
            }
        }
    }

    fn set_input(&mut self, text: String) {
        self.input_len = text.chars().count();
        self.input_text = text;
    }

    fn clear(&mut self) -> Vec<Effect> {
        self.set_input(String::new());
        self.last_result = None;
        match self.state {
            // The request keeps running and its response is still applied.
            ControllerState::Loading => Vec::new(),
            ControllerState::Error(_) => {
                self.state = ControllerState::Idle;
                vec![Effect::CancelErrorDismiss]
            }
            _ => {
                self.state = ControllerState::Idle;
                Vec::new()
            }
        }
    }

    fn submit(&mut self) -> Vec<Effect> {
        if self.state == ControllerState::Loading {
            debug!("Submit ignored: request {:?} still in flight", self.in_flight);
            return Vec::new();
        }

        let Some(request) = AnalysisRequest::from_input(&self.input_text) else {
            return self.show_error(AnalysisError::Validation.user_message());
        };

        let was_error = matches!(self.state, ControllerState::Error(_));
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight = Some(request_id);
        self.state = ControllerState::Loading;
        info!("Submitting request {} ({} chars)", request_id, request.text.chars().count());

        let mut effects = Vec::with_capacity(2);
        if was_error {
            effects.push(Effect::CancelErrorDismiss);
        }
        effects.push(Effect::SendRequest {
            request_id,
            request,
        });
        effects
    }

    fn apply_response(
        &mut self,
        request_id: RequestId,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Vec<Effect> {
        if self.in_flight != Some(request_id) || self.state != ControllerState::Loading {
            warn!(
                "Discarding stale response for request {} (in flight: {:?})",
                request_id, self.in_flight
            );
            return Vec::new();
        }
        self.in_flight = None;

        match outcome {
            Ok(result) => {
                info!("Request {} succeeded", request_id);
                self.last_result = Some(result.clone());
                self.state = ControllerState::ResultsShown(result);
                Vec::new()
            }
            Err(e) => {
                warn!("Request {} failed: {}", request_id, e);
                self.show_error(e.user_message())
            }
        }
    }

    fn show_error(&mut self, message: String) -> Vec<Effect> {
        self.error_timer += 1;
        self.state = ControllerState::Error(message);
        vec![Effect::ScheduleErrorDismiss {
            timer_id: self.error_timer,
            after: self.error_dismiss_after,
        }]
    }
}
