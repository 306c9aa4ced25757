#![forbid(unsafe_code)]

//! @acp:module "Scenario Library"
//! @acp:summary "Client for AI-generated geopolitical scenario forecasts"
//! @acp:domain client
//! @acp:layer api
//! @acp:stability experimental
//!
//! # Scenario
//!
//! Pick a region and topic, ask the forecast backend for a set of future
//! scenarios, and track the attempt through a small state machine.
//!
//! ## Components
//!
//! - **Selection**: the user's region/topic/timeframe/context choices
//! - **API client**: HTTP/JSON adapter with failure classification
//! - **View model**: `Idle → Pending → Success | Failed`, stale results dropped
//! - **Lookup cache**: region and topic lists, fetched once per session
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scenario::{ApiClient, Config, RequestOutcome, ScenarioController, Selection};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default().with_env()?;
//!     let client = ApiClient::new(&config)?;
//!
//!     let mut selection = Selection::new();
//!     selection.set_region("EU");
//!     selection.set_topic("energy");
//!
//!     let mut controller = ScenarioController::new(Arc::new(client));
//!     controller.trigger(&selection)?;
//!
//!     if let RequestOutcome::Success(response) = controller.settle().await {
//!         for item in &response.scenarios {
//!             println!("{} ({:.0}%)", item.name, item.probability * 100.0);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod lookup;
pub mod selection;
pub mod viewmodel;

// Re-exports
pub use api::{
    ApiClient, HealthStatus, LookupEntry, ScenarioBackend, ScenarioItem, ScenarioRequest,
    ScenarioResponse,
};
pub use config::Config;
pub use error::{ApiError, ErrorKind, Result, ScenarioError, SelectionError};
pub use lookup::{LookupCache, LookupKind};
pub use selection::Selection;
pub use viewmodel::{
    PendingAttempt, RequestId, RequestOutcome, ScenarioController, ScenarioView, ScenarioViewModel,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
