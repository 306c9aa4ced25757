//! @acp:module "Health Command"
//! @acp:summary "Probe backend liveness"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::{anyhow, Context, Result};
use console::style;

use crate::api::ScenarioBackend;

/// Execute `scenario health`
pub async fn execute_health(backend: &dyn ScenarioBackend, base_url: &str) -> Result<()> {
    let health = backend
        .health_check()
        .await
        .with_context(|| format!("Backend at {} is not reachable", base_url))?;

    if health.is_ok() {
        println!("{} Backend healthy ({})", style("✓").green(), base_url);
        Ok(())
    } else {
        println!(
            "{} Backend reports status '{}'",
            style("!").yellow(),
            health.status
        );
        Err(anyhow!("unhealthy backend status: {}", health.status))
    }
}
