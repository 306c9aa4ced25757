//! @acp:module "API"
//! @acp:summary "Protocol adapter for the scenario generation backend"
//! @acp:domain client
//! @acp:layer service
//!
//! The adapter carries no business logic: it serializes, sends, and
//! classifies. Anything that talks to a backend goes through
//! [`ScenarioBackend`] so the view model never depends on HTTP directly.
//!
//! | Method | Path                      | Body              |
//! |--------|---------------------------|-------------------|
//! | POST   | `/api/scenarios/generate` | [`ScenarioRequest`] |
//! | GET    | `/api/scenarios/regions`  | -                 |
//! | GET    | `/api/scenarios/topics`   | -                 |
//! | GET    | `/health`                 | -                 |

pub mod client;
pub mod types;

use async_trait::async_trait;

pub use client::ApiClient;
pub use types::{
    GeneratedAt, HealthStatus, LookupEntry, ScenarioItem, ScenarioRequest, ScenarioResponse,
};

use crate::error::ApiError;

pub const GENERATE_PATH: &str = "/api/scenarios/generate";
pub const REGIONS_PATH: &str = "/api/scenarios/regions";
pub const TOPICS_PATH: &str = "/api/scenarios/topics";
pub const HEALTH_PATH: &str = "/health";

/// Backend operations used by the view model and the lookup cache
#[async_trait]
pub trait ScenarioBackend: Send + Sync {
    /// Issue one generation call. Callers check readiness first.
    async fn generate_scenario(&self, request: &ScenarioRequest)
        -> Result<ScenarioResponse, ApiError>;

    async fn get_regions(&self) -> Result<Vec<LookupEntry>, ApiError>;

    async fn get_topics(&self) -> Result<Vec<LookupEntry>, ApiError>;

    /// Liveness probe for operational tooling
    async fn health_check(&self) -> Result<HealthStatus, ApiError>;
}
