use clap::{Parser, Subcommand};
use std::path::PathBuf;

use fundscore::IndicatorId;

pub mod formatters;

#[derive(Parser)]
#[command(name = "fundscore")]
#[command(
    version,
    about = "Sector-aware scoring of fundamental indicators"
)]
#[command(
    long_about = "Classify financial ratios (P/L, ROE, Dívida Líquida/EBITDA, ...) as good, medium or bad for a given sector, taking the prior-year value and related indicators into account."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Configuration file (defaults to $FUNDSCORE_CONFIG, then the user config dir)
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List supported sectors
    Sectors,

    /// List the indicators and benchmarks of a sector
    Indicators {
        /// Sector key, English or Portuguese name (e.g., technology, "Utilidade Pública")
        sector: String,
    },

    /// Evaluate a single indicator
    Evaluate {
        /// Sector key, English or Portuguese name
        sector: String,

        /// Indicator key or label (e.g., roe, "P/L", "Liquidez Corrente")
        indicator: String,

        /// Current value (percentages as whole numbers: 15 means 15%)
        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Prior-year value
        #[arg(short, long, allow_negative_numbers = true)]
        previous: Option<f64>,

        /// Related indicator value, repeatable (e.g., --with freeCashFlow=5000000)
        #[arg(short = 'w', long = "with", value_parser = parse_key_value)]
        with: Vec<(IndicatorId, f64)>,
    },

    /// Evaluate every indicator of a snapshot file (JSON)
    Report {
        /// Path to the snapshot JSON file
        file: PathBuf,
    },
}

/// Parse `key=value` pairs for `--with`
pub fn parse_key_value(input: &str) -> Result<(IndicatorId, f64), String> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", input))?;
    let id = IndicatorId::from_name(key.trim())
        .ok_or_else(|| format!("unknown indicator '{}'", key.trim()))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value for {}: {}", id, e))?;
    Ok((id, value))
}
