//! Error handling for the scoring engine
//!
//! Library entry points return the typed errors below; the binary and the
//! configuration loader chain them through anyhow for context.

use thiserror::Error;

use crate::sector::Sector;

/// Errors surfaced by an evaluation request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("unknown sector: {0}")]
    UnknownSector(String),

    #[error("no indicator '{indicator}' configured for sector {sector}")]
    ConfigurationMissing { sector: Sector, indicator: String },
}

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("io error")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown sector: {0}")]
    UnknownSector(String),

    #[error("unknown indicator: {0}")]
    UnknownIndicator(String),

    #[error("invalid rule for {indicator} in {sector}: {reason}")]
    InvalidRule {
        sector: Sector,
        indicator: String,
        reason: String,
    },

    #[error("invalid weight for {indicator} in {sector}: {weight}")]
    InvalidWeight {
        sector: Sector,
        indicator: String,
        weight: f64,
    },
}

/// Result type alias for application-level operations
pub type Result<T> = anyhow::Result<T>;
