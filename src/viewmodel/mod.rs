//! @acp:module "Scenario View Model"
//! @acp:summary "Request outcome state machine consumed by the presentation layer"
//! @acp:domain client
//! @acp:layer service
//!
//! ```text
//! Idle ──begin──▶ Pending ──resolve(ok)──▶ Success
//!                   │  ▲                      │
//!                   │  └──────begin───────────┤
//!                   └──resolve(err)──▶ Failed ┘
//! ```
//!
//! `begin` from any state starts a new attempt with a larger [`RequestId`].
//! `resolve` only applies when its id matches the attempt currently pending,
//! so a slow superseded call can never overwrite a newer state.

mod controller;

pub use controller::ScenarioController;

use std::fmt;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::{ScenarioRequest, ScenarioResponse};
use crate::error::{ApiError, ErrorKind, SelectionError};
use crate::selection::Selection;

/// Identifier of one generation attempt; later attempts compare greater
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// @acp:summary "Outcome of the current generation attempt"
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Idle,
    Pending { request_id: RequestId },
    Success(ScenarioResponse),
    Failed { kind: ErrorKind, message: String },
}

impl RequestOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestOutcome::Pending { .. })
    }

    pub fn pending_id(&self) -> Option<RequestId> {
        match self {
            RequestOutcome::Pending { request_id } => Some(*request_id),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestOutcome::Idle => "idle",
            RequestOutcome::Pending { .. } => "pending",
            RequestOutcome::Success(_) => "success",
            RequestOutcome::Failed { .. } => "failed",
        }
    }
}

/// An attempt that has been started and must be sent by the caller
#[derive(Debug, Clone)]
pub struct PendingAttempt {
    pub id: RequestId,
    pub request: ScenarioRequest,
}

/// Display-oriented projection of the current outcome
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioView<'a> {
    pub is_loading: bool,
    pub error: Option<(ErrorKind, &'a str)>,
    pub data: Option<&'a ScenarioResponse>,
    /// A failed attempt can be re-triggered
    pub can_retry: bool,
}

impl ScenarioView<'_> {
    /// Success that carries zero scenarios
    pub fn is_empty_result(&self) -> bool {
        self.data.map(|d| d.scenarios.is_empty()).unwrap_or(false)
    }
}

/// @acp:summary "Exclusive owner of the live request outcome"
#[derive(Debug)]
pub struct ScenarioViewModel {
    outcome: RequestOutcome,
    last_issued: u64,
    publisher: watch::Sender<RequestOutcome>,
}

impl Default for ScenarioViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioViewModel {
    pub fn new() -> Self {
        let (publisher, _) = watch::channel(RequestOutcome::Idle);
        Self {
            outcome: RequestOutcome::Idle,
            last_issued: 0,
            publisher,
        }
    }

    pub fn outcome(&self) -> &RequestOutcome {
        &self.outcome
    }

    /// Observe every replacement of the outcome
    pub fn subscribe(&self) -> watch::Receiver<RequestOutcome> {
        self.publisher.subscribe()
    }

    /// @acp:summary "Start a new attempt if the selection is ready"
    ///
    /// Leaves the current outcome untouched when region or topic is missing.
    /// Any attempt still pending becomes stale.
    pub fn begin(&mut self, selection: &Selection) -> Result<PendingAttempt, SelectionError> {
        let request = selection.to_request()?;

        if let Some(previous) = self.outcome.pending_id() {
            debug!("attempt {} superseded", previous);
        }

        self.last_issued += 1;
        let id = RequestId(self.last_issued);
        self.replace(RequestOutcome::Pending { request_id: id });
        debug!("attempt {} pending for {}/{}", id, request.region, request.topic);

        Ok(PendingAttempt { id, request })
    }

    /// @acp:summary "Apply a finished call; returns false when the result is stale"
    pub fn resolve(&mut self, id: RequestId, result: Result<ScenarioResponse, ApiError>) -> bool {
        if self.outcome.pending_id() != Some(id) {
            debug!(
                "discarding result of attempt {} (current: {})",
                id,
                self.outcome.label()
            );
            return false;
        }

        let next = match result {
            Ok(response) => {
                debug!(
                    "attempt {} succeeded with {} scenarios",
                    id,
                    response.scenarios.len()
                );
                RequestOutcome::Success(response)
            }
            Err(err) => {
                warn!("attempt {} failed: {}", id, err);
                RequestOutcome::Failed {
                    kind: err.kind(),
                    message: err.to_string(),
                }
            }
        };
        self.replace(next);
        true
    }

    /// @acp:summary "UI-ready projection: loading, error or data"
    pub fn view(&self) -> ScenarioView<'_> {
        match &self.outcome {
            RequestOutcome::Idle => ScenarioView {
                is_loading: false,
                error: None,
                data: None,
                can_retry: false,
            },
            RequestOutcome::Pending { .. } => ScenarioView {
                is_loading: true,
                error: None,
                data: None,
                can_retry: false,
            },
            RequestOutcome::Success(response) => ScenarioView {
                is_loading: false,
                error: None,
                data: Some(response),
                can_retry: false,
            },
            RequestOutcome::Failed { kind, message } => ScenarioView {
                is_loading: false,
                error: Some((*kind, message.as_str())),
                data: None,
                can_retry: true,
            },
        }
    }

    fn replace(&mut self, next: RequestOutcome) {
        self.outcome = next;
        self.publisher.send_replace(self.outcome.clone());
    }
}
