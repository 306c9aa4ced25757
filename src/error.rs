//! @acp:module "Errors"
//! @acp:summary "Error taxonomy for the scenario client"
//! @acp:domain client
//! @acp:layer model
//!
//! [`ApiError`] is the boundary type for every backend call. The view model
//! folds it into an [`ErrorKind`] plus a display message, so nothing below
//! the presentation layer ever surfaces as an uncaught fault.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bodies longer than this are cut when rendered into a message
const MAX_BODY_DISPLAY: usize = 2048;

/// Failure of a single backend call
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response reached us: connect/DNS failure, timeout, or a body read cut short
    #[error("network error: {message}")]
    Network { message: String, timed_out: bool },

    /// Backend reachable but answered with a non-2xx status
    #[error("server returned {status}: {}", truncate_body(.body))]
    Server { status: u16, body: String },

    /// Response body did not match the expected shape
    #[error("could not decode response: {0}")]
    Decode(String),

    /// Base URL could not be joined with an endpoint path
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ApiError {
    /// @acp:summary "Classify into the kind carried by a failed outcome"
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network { .. } | ApiError::InvalidBaseUrl { .. } => ErrorKind::Network,
            ApiError::Server { status, .. } => ErrorKind::Server { status: *status },
            ApiError::Decode(_) => ErrorKind::Decode,
        }
    }

    /// Whether the failure was a timeout rather than a refused connection
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Network { timed_out: true, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ApiError::Decode(err.to_string());
        }
        ApiError::Network {
            message: err.to_string(),
            timed_out: err.is_timeout(),
        }
    }
}

/// Error classification exposed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorKind {
    Network,
    Server { status: u16 },
    Decode,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Network => "network",
            ErrorKind::Server { .. } => "server",
            ErrorKind::Decode => "decode",
        }
    }

    /// Decode failures are contract mismatches; retrying rarely helps
    pub fn is_meaningfully_retriable(&self) -> bool {
        !matches!(self, ErrorKind::Decode)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Server { status } => write!(f, "server ({})", status),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Selection is missing a required choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no region selected")]
    MissingRegion,
    #[error("no topic selected")]
    MissingTopic,
}

/// Crate-level error
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ScenarioError>;

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.len() <= MAX_BODY_DISPLAY {
        return trimmed.to_string();
    }
    let mut end = MAX_BODY_DISPLAY;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &trimmed[..end])
}
