use crate::actors::messages::{AppError, ControllerMessage};
use crate::actors::traits::AnalysisService;
use crate::controller::{Action, AnalysisController, ControllerSnapshot, Effect, RequestId, TimerId};
use crate::models::AnalysisRequest;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

/// A handle to the controller actor.
///
/// This is the entry point for the front-end: user actions go in through
/// [`ControllerHandle::dispatch`], state comes out through [`ControllerHandle::subscribe`].
#[derive(Clone)]
pub struct ControllerHandle {
    sender: mpsc::Sender<ControllerMessage>,
    updates: watch::Receiver<ControllerSnapshot>,
}

impl ControllerHandle {
    /// Spawns the controller actor on the current Tokio runtime.
    ///
    /// # Arguments
    ///
    /// * `service` - The analysis backend the actor submits requests to.
    /// * `error_dismiss_after` - How long an error stays visible before it hides itself.
    pub fn spawn<S: AnalysisService>(service: Arc<S>, error_dismiss_after: Duration) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let controller = AnalysisController::new(error_dismiss_after);
        let (updates_tx, updates) = watch::channel(controller.snapshot());
        let actor = ControllerRunner::new(receiver, service, controller, updates_tx);
        tokio::spawn(async move { actor.run().await });
        Self { sender, updates }
    }

    /// Applies a user action and returns the snapshot right after the transition.
    #[instrument(skip(self))]
    pub async fn dispatch(&self, action: Action) -> Result<ControllerSnapshot, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(ControllerMessage::Dispatch {
                action,
                responder: send,
            })
            .await
            .map_err(|e| AppError::Actor(e.to_string()))?;
        recv.await.map_err(|e| AppError::Actor(e.to_string()))
    }

    /// Returns the current snapshot.
    pub async fn snapshot(&self) -> Result<ControllerSnapshot, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(ControllerMessage::Snapshot { responder: send })
            .await
            .map_err(|e| AppError::Actor(e.to_string()))?;
        recv.await.map_err(|e| AppError::Actor(e.to_string()))
    }

    /// A receiver that sees every snapshot, including transitions driven by
    /// service responses and timers.
    pub fn subscribe(&self) -> watch::Receiver<ControllerSnapshot> {
        self.updates.clone()
    }

    /// Stops the actor.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.sender
            .send(ControllerMessage::Shutdown)
            .await
            .map_err(|e| AppError::Actor(e.to_string()))
    }
}

// --- Actor Runner ---
struct ControllerRunner<S>
where
    S: AnalysisService,
{
    receiver: mpsc::Receiver<ControllerMessage>,
    // Completions of spawned work (service calls, timers) come back here.
    internal_tx: mpsc::Sender<Action>,
    internal_rx: mpsc::Receiver<Action>,
    service: Arc<S>,
    controller: AnalysisController,
    updates: watch::Sender<ControllerSnapshot>,
    error_timer: Option<JoinHandle<()>>,
}

impl<S> ControllerRunner<S>
where
    S: AnalysisService,
{
    fn new(
        receiver: mpsc::Receiver<ControllerMessage>,
        service: Arc<S>,
        controller: AnalysisController,
        updates: watch::Sender<ControllerSnapshot>,
    ) -> Self {
        let (internal_tx, internal_rx) = mpsc::channel(32);
        Self {
            receiver,
            internal_tx,
            internal_rx,
            service,
            controller,
            updates,
            error_timer: None,
        }
    }

    async fn run(mut self) {
        info!("Controller started");
        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(ControllerMessage::Dispatch { action, responder }) => {
                        self.apply(action);
                        let _ = responder.send(self.controller.snapshot());
                    }
                    Some(ControllerMessage::Snapshot { responder }) => {
                        let _ = responder.send(self.controller.snapshot());
                    }
                    Some(ControllerMessage::Shutdown) => {
                        info!("Controller shutting down...");
                        break;
                    }
                    None => break,
                },
                Some(action) = self.internal_rx.recv() => self.apply(action),
            }
        }
        self.cancel_error_timer();
        info!("Controller stopped");
    }

    fn apply(&mut self, action: Action) {
        for effect in self.controller.dispatch(action) {
            self.execute(effect);
        }
        self.updates.send_replace(self.controller.snapshot());
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::SendRequest {
                request_id,
                request,
            } => self.spawn_request(request_id, request),
            Effect::ScheduleErrorDismiss { timer_id, after } => {
                self.schedule_error_dismiss(timer_id, after)
            }
            Effect::CancelErrorDismiss => self.cancel_error_timer(),
        }
    }

    fn spawn_request(&self, request_id: RequestId, request: AnalysisRequest) {
        let service = Arc::clone(&self.service);
        let reply = self.internal_tx.clone();
        tokio::spawn(async move {
            let outcome = service.analyze(request).await;
            if let Err(e) = &outcome {
                debug!("Request {} failed: {}", request_id, e);
            }
            if reply
                .send(Action::ServiceResponded {
                    request_id,
                    outcome,
                })
                .await
                .is_err()
            {
                error!("Controller gone before request {} completed", request_id);
            }
        });
    }

    fn schedule_error_dismiss(&mut self, timer_id: TimerId, after: Duration) {
        self.cancel_error_timer();
        let reply = self.internal_tx.clone();
        self.error_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = reply.send(Action::ErrorTimeoutElapsed { timer_id }).await;
        }));
    }

    fn cancel_error_timer(&mut self) {
        if let Some(timer) = self.error_timer.take() {
            timer.abort();
        }
    }
}
