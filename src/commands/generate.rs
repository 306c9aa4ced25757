//! @acp:module "Generate Command"
//! @acp:summary "Request a scenario set for a region and topic"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `scenario generate`. Missing region/topic are picked
//! interactively from the lookup lists when attached to a terminal.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use console::{style, Term};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use super::output::{render_failure, render_response};
use crate::api::{LookupEntry, ScenarioBackend};
use crate::lookup::{LookupCache, LookupKind};
use crate::selection::Selection;
use crate::viewmodel::{RequestOutcome, ScenarioController};

/// Options for the generate command
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Region id
    pub region: Option<String>,
    /// Topic id
    pub topic: Option<String>,
    /// Optional timeframe refinement
    pub timeframe: Option<String>,
    /// Optional free-form context
    pub context: Option<String>,
    /// Print the raw response as JSON
    pub json: bool,
    /// Never prompt, even on a terminal
    pub no_input: bool,
}

/// Execute the generate command
pub async fn execute_generate(
    options: GenerateOptions,
    backend: Arc<dyn ScenarioBackend>,
) -> Result<()> {
    let mut selection = Selection::new();
    if let Some(region) = &options.region {
        selection.set_region(region.as_str());
    }
    if let Some(topic) = &options.topic {
        selection.set_topic(topic.as_str());
    }
    if let Some(timeframe) = &options.timeframe {
        selection.set_timeframe(timeframe.as_str());
    }
    if let Some(context) = &options.context {
        selection.set_context(context.as_str());
    }

    let interactive = !options.no_input && !options.json && Term::stdout().is_term();
    let mut lookups = LookupCache::new();

    if !selection.is_ready_to_submit() && interactive {
        run_interactive_selection(&mut selection, &mut lookups, backend.as_ref()).await?;
    }

    let mut controller = ScenarioController::new(backend);
    controller.trigger(&selection).map_err(|e| {
        anyhow!("{}. Pass --region and --topic (see `scenario regions` / `scenario topics`)", e)
    })?;

    let spinner = if options.json { None } else { Some(pending_spinner()) };
    let outcome = controller.settle().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match outcome {
        RequestOutcome::Success(response) => {
            if options.json {
                println!("{}", serde_json::to_string_pretty(response)?);
            } else {
                let region_label = lookups
                    .label(LookupKind::Regions, &response.region)
                    .unwrap_or(response.region.as_str());
                let topic_label = lookups
                    .label(LookupKind::Topics, &response.topic)
                    .unwrap_or(response.topic.as_str());
                render_response(response, region_label, topic_label);
            }
            Ok(())
        }
        RequestOutcome::Failed { kind, message } => {
            if options.json {
                let body = serde_json::json!({ "error": kind, "message": message });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                render_failure(*kind, message);
            }
            Err(anyhow!("generation failed ({})", kind))
        }
        other => Err(anyhow!("generation ended in unexpected state: {}", other.label())),
    }
}

async fn run_interactive_selection(
    selection: &mut Selection,
    lookups: &mut LookupCache,
    backend: &dyn ScenarioBackend,
) -> Result<()> {
    println!("{} Scenario setup\n", style("→").cyan());

    if let Err(err) = lookups.ensure_loaded(backend).await {
        println!("{} Could not load lookup lists: {}", style("⚠").yellow(), err);
    }

    let theme = ColorfulTheme::default();

    if selection.region().is_none() {
        let region = pick(&theme, "Region", lookups.regions())?;
        selection.set_region(region);
    }
    if selection.topic().is_none() {
        let topic = pick(&theme, "Topic", lookups.topics())?;
        selection.set_topic(topic);
    }
    if selection.timeframe().is_none() {
        let timeframe: String = Input::with_theme(&theme)
            .with_prompt("Timeframe (optional)")
            .allow_empty(true)
            .interact_text()?;
        selection.set_timeframe(timeframe);
    }

    println!();
    Ok(())
}

/// Choose from a list, or type an id when the list is unavailable
fn pick(theme: &ColorfulTheme, prompt: &str, entries: Option<&[LookupEntry]>) -> Result<String> {
    match entries {
        Some(entries) if !entries.is_empty() => {
            let items: Vec<String> = entries
                .iter()
                .map(|e| format!("{} ({})", e.label, e.id))
                .collect();
            let index = Select::with_theme(theme)
                .with_prompt(prompt)
                .items(&items)
                .default(0)
                .interact()
                .context("selection cancelled")?;
            Ok(entries[index].id.clone())
        }
        _ => {
            let value: String = Input::with_theme(theme)
                .with_prompt(format!("{} id", prompt))
                .interact_text()?;
            Ok(value)
        }
    }
}

fn pending_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Generating scenarios...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
