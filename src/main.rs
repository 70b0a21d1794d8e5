mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{formatters, Cli, Commands};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use fundscore::config::{self, Settings};
use fundscore::report::{evaluate_snapshot, Snapshot};
use fundscore::{Engine, EvaluationContext, Sector};

const DEFAULT_LOG_FILTER: &str = "warn";

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = config::locate(cli.config.as_deref());
    let settings = match &config_path {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Settings::default(),
    };

    // the filter may come from the config file, so logging starts after loading it
    init_logging(&settings)?;
    match &config_path {
        Some(path) => info!("Loaded configuration from {:?}", path),
        None => debug!("No configuration file, using built-in tables"),
    }

    let engine = settings
        .build_engine()
        .context("Invalid configuration")?;

    match cli.command {
        Commands::Sectors => {
            print!("{}", formatters::format_sectors(cli.json));
            Ok(())
        }

        Commands::Indicators { sector } => {
            let sector: Sector = sector.parse()?;
            print!("{}", formatters::format_indicators(&engine, sector, cli.json));
            Ok(())
        }

        Commands::Evaluate {
            sector,
            indicator,
            value,
            previous,
            with,
        } => {
            let sector: Sector = sector.parse()?;
            let mut ctx = EvaluationContext::new();
            ctx.previous_value = previous;
            ctx.complementary.extend(with);

            let result = engine.evaluate(sector, &indicator, value, &ctx);
            let label = engine
                .catalog()
                .find(sector, &indicator)
                .map(|meta| meta.label)
                .unwrap_or(indicator.as_str());
            print!(
                "{}",
                formatters::format_evaluation(sector, label, value, &result, cli.json)
            );
            Ok(())
        }

        Commands::Report { file } => handle_report(&engine, &file, cli.json),
    }
}

/// `RUST_LOG` wins over the config file; logs go to stderr
fn init_logging(settings: &Settings) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directive = settings
                .log_filter
                .as_deref()
                .unwrap_or(DEFAULT_LOG_FILTER);
            EnvFilter::try_new(directive)
                .with_context(|| format!("Invalid log filter '{}'", directive))?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

/// Handle report command
fn handle_report(engine: &Engine, path: &Path, json: bool) -> Result<()> {
    info!("Evaluating snapshot from {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&content)
        .with_context(|| format!("Invalid snapshot {}", path.display()))?;

    let report = evaluate_snapshot(engine, &snapshot);
    print!("{}", formatters::format_report(&report, json));
    Ok(())
}
