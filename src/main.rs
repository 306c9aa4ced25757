#![forbid(unsafe_code)]
//! Scenario Command Line Interface

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use scenario::commands::{
    execute_generate, execute_health, execute_lookup, GenerateOptions, LookupOptions,
};
use scenario::config::{DEFAULT_CONFIG_FILE, ENV_BASE_URL, ENV_TIMEOUT_SECS};
use scenario::{ApiClient, Config, LookupKind};

#[derive(Parser)]
#[command(name = "scenario")]
#[command(about = "Scenariusze Jutra - AI-generated geopolitical scenarios")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Backend base URL
    #[arg(long, global = true, env = ENV_BASE_URL)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = ENV_TIMEOUT_SECS)]
    timeout: Option<u64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate scenarios for a region and topic
    Generate {
        /// Region id (see `scenario regions`)
        #[arg(short, long)]
        region: Option<String>,

        /// Topic id (see `scenario topics`)
        #[arg(short, long)]
        topic: Option<String>,

        /// Timeframe, e.g. "5 years"
        #[arg(long)]
        timeframe: Option<String>,

        /// Additional free-form context
        #[arg(long)]
        context: Option<String>,

        /// Output the raw response as JSON
        #[arg(long)]
        json: bool,

        /// Never prompt for missing choices
        #[arg(long)]
        no_input: bool,
    },

    /// List available regions
    Regions {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List available topics
    Topics {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check backend liveness
    Health,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "scenario=debug,warn" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };
    config = config.with_env()?;

    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {}", style("✗").red(), err);
            std::process::exit(2);
        }
    };
    tracing::debug!("using backend {} (timeout {}s)", config.base_url, config.timeout_secs);

    let client = Arc::new(ApiClient::new(&config)?);

    match cli.command {
        Commands::Generate { region, topic, timeframe, context, json, no_input } => {
            let options = GenerateOptions {
                region,
                topic,
                timeframe,
                context,
                json,
                no_input,
            };
            execute_generate(options, client).await?;
        }

        Commands::Regions { json } => {
            let options = LookupOptions {
                kind: LookupKind::Regions,
                json,
            };
            execute_lookup(options, client.as_ref()).await?;
        }

        Commands::Topics { json } => {
            let options = LookupOptions {
                kind: LookupKind::Topics,
                json,
            };
            execute_lookup(options, client.as_ref()).await?;
        }

        Commands::Health => {
            execute_health(client.as_ref(), &config.base_url).await?;
        }
    }

    Ok(())
}
