//! @acp:module "Configuration"
//! @acp:summary "Client configuration loading, env overrides and defaults"
//! @acp:domain client
//! @acp:layer config
//!
//! Precedence, lowest first: defaults, `.scenario.config.json`, environment
//! (`API_BASE_URL`, `API_TIMEOUT_SECS`), then whatever the CLI sets on top.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ScenarioError;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".scenario.config.json";

/// Env var holding the backend base URL
pub const ENV_BASE_URL: &str = "API_BASE_URL";

/// Env var holding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "API_TIMEOUT_SECS";

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("scenario-cli/{}", env!("CARGO_PKG_VERSION"))
}

/// @acp:summary "Scenario client configuration"
/// @acp:lock normal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Backend base URL, without a trailing path
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound on a whole request, body included
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Upper bound on DNS + TCP connect
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// @acp:summary "Load config from a JSON file"
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @acp:summary "Overlay process environment variables"
    pub fn with_env(self) -> crate::Result<Self> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary lookup; empty values are ignored
    pub fn with_env_from<F>(mut self, lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                ScenarioError::Config(format!(
                    "{} must be a whole number, got '{}'",
                    ENV_TIMEOUT_SECS, raw
                ))
            })?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Reject values that would make every request fail
    pub fn validate(&self) -> crate::Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(ScenarioError::Config("base URL is empty".to_string()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ScenarioError::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ScenarioError::Config("timeout must be at least 1 second".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.min(self.timeout_secs))
    }
}
