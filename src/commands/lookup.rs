//! @acp:module "Lookup Commands"
//! @acp:summary "List available regions and topics"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::{Context, Result};

use super::output::render_lookup;
use crate::api::ScenarioBackend;
use crate::lookup::{LookupCache, LookupKind};

/// Options for the regions/topics commands
#[derive(Debug, Clone, Copy)]
pub struct LookupOptions {
    pub kind: LookupKind,
    /// Output as JSON
    pub json: bool,
}

/// Execute `scenario regions` or `scenario topics`
pub async fn execute_lookup(options: LookupOptions, backend: &dyn ScenarioBackend) -> Result<()> {
    let mut cache = LookupCache::new();
    let entries = cache
        .get(options.kind, backend)
        .await
        .with_context(|| format!("Failed to fetch {}", options.kind.as_str()))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(entries)?);
    } else {
        let title = match options.kind {
            LookupKind::Regions => "Regions",
            LookupKind::Topics => "Topics",
        };
        render_lookup(title, entries);
    }

    Ok(())
}
