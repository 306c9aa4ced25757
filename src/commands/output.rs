//! @acp:module "Output Formatting"
//! @acp:summary "Human-readable rendering of scenarios, lookups and failures"
//! @acp:domain cli
//! @acp:layer presentation

use console::style;

use crate::api::{LookupEntry, ScenarioResponse};
use crate::error::ErrorKind;

const BAR_WIDTH: usize = 20;

/// Fixed-width bar for a value in [0, 1]; out-of-range values are clamped
pub fn probability_bar(value: f64) -> String {
    let clamped = if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 };
    let filled = (clamped * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn format_percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

/// Scenario list in received order
pub fn render_response(response: &ScenarioResponse, region_label: &str, topic_label: &str) {
    println!(
        "{} {} / {}",
        style("Scenarios").bold(),
        style(region_label).cyan(),
        style(topic_label).cyan()
    );
    println!("{}", "=".repeat(60));

    if response.scenarios.is_empty() {
        println!("{} The backend returned no scenarios", style("!").yellow());
    }

    for (index, item) in response.scenarios.iter().enumerate() {
        println!();
        println!("{}. {}", index + 1, style(&item.name).bold());
        println!(
            "   {} {}",
            probability_bar(item.probability),
            format_percent(item.probability)
        );
        if !item.description.is_empty() {
            println!("   {}", item.description);
        }
        if !item.key_factors.is_empty() {
            println!("   Key factors:");
            for factor in &item.key_factors {
                println!("     - {}", factor);
            }
        }
    }

    println!();
    println!(
        "Confidence: {} {}",
        probability_bar(response.confidence),
        format_percent(response.confidence)
    );
    if !response.sources.is_empty() {
        println!("Sources:    {}", response.sources.join(", "));
    }

    let generated = response
        .generated_at_parsed()
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S"))
        .unwrap_or_else(|| response.generated_at.clone());
    println!(
        "{}",
        style(format!("Generated {} (id {})", generated, response.scenario_id)).dim()
    );
}

pub fn render_lookup(title: &str, entries: &[LookupEntry]) {
    println!("{}", style(title).bold());
    if entries.is_empty() {
        println!("  {}", style("(none)").dim());
        return;
    }
    let width = entries.iter().map(|e| e.id.len()).max().unwrap_or(0);
    for entry in entries {
        println!(
            "  {}  {}",
            style(format!("{:width$}", entry.id, width = width)).cyan(),
            entry.label
        );
    }
}

pub fn render_failure(kind: ErrorKind, message: &str) {
    eprintln!("{} Generation failed ({})", style("✗").red(), kind);
    eprintln!("  {}", message);
    eprintln!("  {}", style(failure_hint(kind)).dim());
}

fn failure_hint(kind: ErrorKind) -> String {
    let cause = match kind {
        ErrorKind::Network => "Check that the backend is running and reachable.",
        ErrorKind::Server { .. } => "The backend rejected the request.",
        ErrorKind::Decode => "The backend answered in an unexpected format.",
    };
    if kind.is_meaningfully_retriable() {
        format!("{} Run the command again to retry.", cause)
    } else {
        format!("{} Retrying is unlikely to help; check the backend version.", cause)
    }
}
