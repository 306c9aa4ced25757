//! @acp:module "Generation Controller"
//! @acp:summary "Runs generation calls as tasks keyed by request id"
//! @acp:domain client
//! @acp:layer service
//!
//! Each trigger spawns one task. Results come back over a channel tagged
//! with their [`RequestId`] and go through [`ScenarioViewModel::resolve`],
//! which drops anything that is no longer authoritative. The superseded
//! task is aborted as well, but a result it already queued is still
//! filtered by id.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinHandle};
use tracing::debug;

use super::{RequestId, RequestOutcome, ScenarioView, ScenarioViewModel};
use crate::api::{ScenarioBackend, ScenarioResponse};
use crate::error::{ApiError, SelectionError};
use crate::selection::Selection;

type Delivery = (RequestId, Result<ScenarioResponse, ApiError>);

enum Wake {
    Delivered(Option<Delivery>),
    Joined(Result<(), JoinError>),
}

/// Failure recorded for an attempt whose task stopped without reporting
fn task_lost(reason: String) -> ApiError {
    ApiError::Network {
        message: format!("generation task failed: {}", reason),
        timed_out: false,
    }
}

/// @acp:summary "Drives the view model against a backend"
pub struct ScenarioController {
    view_model: ScenarioViewModel,
    backend: Arc<dyn ScenarioBackend>,
    results_tx: mpsc::UnboundedSender<Delivery>,
    results_rx: mpsc::UnboundedReceiver<Delivery>,
    in_flight: Option<(RequestId, JoinHandle<()>)>,
}

impl ScenarioController {
    pub fn new(backend: Arc<dyn ScenarioBackend>) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            view_model: ScenarioViewModel::new(),
            backend,
            results_tx,
            results_rx,
            in_flight: None,
        }
    }

    pub fn outcome(&self) -> &RequestOutcome {
        self.view_model.outcome()
    }

    pub fn view(&self) -> ScenarioView<'_> {
        self.view_model.view()
    }

    pub fn subscribe(&self) -> watch::Receiver<RequestOutcome> {
        self.view_model.subscribe()
    }

    /// @acp:summary "Start a generation attempt in the background"
    ///
    /// Must be called from within a tokio runtime.
    pub fn trigger(&mut self, selection: &Selection) -> Result<RequestId, SelectionError> {
        let attempt = self.view_model.begin(selection)?;

        if let Some((previous, handle)) = self.in_flight.take() {
            if !handle.is_finished() {
                debug!("aborting superseded attempt {}", previous);
                handle.abort();
            }
        }

        let backend = Arc::clone(&self.backend);
        let tx = self.results_tx.clone();
        let id = attempt.id;
        let handle = tokio::spawn(async move {
            let result = backend.generate_scenario(&attempt.request).await;
            // Receiver lives as long as the controller
            let _ = tx.send((id, result));
        });

        self.in_flight = Some((id, handle));
        Ok(id)
    }

    /// @acp:summary "Wait until the current attempt reaches a terminal state"
    ///
    /// A task that dies without reporting (a panicking backend) fails the
    /// attempt instead of leaving it pending.
    pub async fn settle(&mut self) -> &RequestOutcome {
        while let Some(current) = self.view_model.outcome().pending_id() {
            let wake = match self.in_flight.as_mut() {
                Some((id, handle)) if *id == current => {
                    tokio::select! {
                        biased;
                        delivery = self.results_rx.recv() => Wake::Delivered(delivery),
                        joined = handle => Wake::Joined(joined),
                    }
                }
                _ => Wake::Delivered(self.results_rx.recv().await),
            };

            match wake {
                Wake::Delivered(Some((id, result))) => {
                    self.view_model.resolve(id, result);
                }
                Wake::Delivered(None) => break,
                // Result was sent before the task ended; next recv picks it up
                Wake::Joined(Ok(())) => self.in_flight = None,
                Wake::Joined(Err(err)) => {
                    self.in_flight = None;
                    self.view_model.resolve(current, Err(task_lost(err.to_string())));
                }
            }
        }
        self.clear_finished();
        self.view_model.outcome()
    }

    /// Apply whatever results have already arrived without waiting.
    /// Returns true if the outcome changed.
    pub fn poll(&mut self) -> bool {
        // Checked before draining: a task that finished with nothing queued never reported
        let current_finished = match (&self.in_flight, self.view_model.outcome().pending_id()) {
            (Some((id, handle)), Some(current)) => *id == current && handle.is_finished(),
            _ => false,
        };

        let mut changed = false;
        while let Ok((id, result)) = self.results_rx.try_recv() {
            changed |= self.view_model.resolve(id, result);
        }

        if current_finished {
            if let Some(current) = self.view_model.outcome().pending_id() {
                let message = "task ended without a result".to_string();
                changed |= self.view_model.resolve(current, Err(task_lost(message)));
            }
        }

        if changed {
            self.clear_finished();
        }
        changed
    }

    fn clear_finished(&mut self) {
        if !self.view_model.outcome().is_pending() {
            self.in_flight = None;
        }
    }
}

impl Drop for ScenarioController {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.in_flight.take() {
            handle.abort();
        }
    }
}
