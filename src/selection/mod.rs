//! @acp:module "Selection State"
//! @acp:summary "User's region/topic/timeframe/context choices"
//! @acp:domain client
//! @acp:layer model
//!
//! Pure in-memory state. Only presence is checked here; whether a region or
//! topic id is known to the backend is the backend's call.

use crate::api::ScenarioRequest;
use crate::error::SelectionError;

/// @acp:summary "Current user choices for one session"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    region: Option<String>,
    topic: Option<String>,
    timeframe: Option<String>,
    context: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_region(&mut self, id: impl Into<String>) {
        self.region = normalize(id.into());
    }

    pub fn set_topic(&mut self, id: impl Into<String>) {
        self.topic = normalize(id.into());
    }

    pub fn set_timeframe(&mut self, value: impl Into<String>) {
        self.timeframe = normalize(value.into());
    }

    pub fn set_context(&mut self, value: impl Into<String>) {
        self.context = normalize(value.into());
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn timeframe(&self) -> Option<&str> {
        self.timeframe.as_deref()
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Reset every field to absent
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// @acp:summary "Region and topic are both chosen"
    pub fn is_ready_to_submit(&self) -> bool {
        self.region.is_some() && self.topic.is_some()
    }

    /// @acp:summary "Build the wire payload for one generation attempt"
    pub fn to_request(&self) -> Result<ScenarioRequest, SelectionError> {
        let region = self.region.clone().ok_or(SelectionError::MissingRegion)?;
        let topic = self.topic.clone().ok_or(SelectionError::MissingTopic)?;

        Ok(ScenarioRequest {
            region,
            topic,
            timeframe: self.timeframe.clone(),
            context: self.context.clone(),
        })
    }
}

/// Empty or whitespace-only input clears the field
fn normalize(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
