//! Optional TOML configuration
//!
//! A config file may replace threshold rules and weights per sector. It is
//! read once, validated, and merged into a fresh [`Engine`]; the engine is
//! immutable afterwards.
//!
//! ```toml
//! log_filter = "fundscore=debug"
//!
//! [thresholds.technology]
//! roe = { type = "symmetric", good = 20, medium = 12 }
//! beta = { type = "symmetric", good = 0.8, medium = 1.3, reverse = true, neutral_range = [0.9, 1.1] }
//!
//! [weights.utilities]
//! dividendYield = 3.0
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::catalog::IndicatorCatalog;
use crate::engine::Engine;
use crate::error::ConfigError;
use crate::indicator::IndicatorId;
use crate::rules::{default_complementary_rules, default_overrides};
use crate::sector::Sector;
use crate::thresholds::{ThresholdRule, ThresholdTable};

/// Environment variable pointing at a config file
pub const CONFIG_ENV_VAR: &str = "FUNDSCORE_CONFIG";
const CONFIG_FILENAME: &str = "config.toml";

/// Parsed configuration file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Default tracing filter when `RUST_LOG` is not set
    #[serde(default)]
    pub log_filter: Option<String>,
    /// `sector → indicator → rule`
    #[serde(default)]
    pub thresholds: BTreeMap<String, BTreeMap<String, ThresholdRule>>,
    /// `sector → indicator → weight`
    #[serde(default)]
    pub weights: BTreeMap<String, BTreeMap<String, f64>>,
}

/// Default config location (`$XDG_CONFIG_HOME/fundscore/config.toml` or the
/// platform equivalent)
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dir_spec::config_home)
        .map(|dir| dir.join("fundscore").join(CONFIG_FILENAME))
}

/// Pick the config file to load: an explicit path wins, then
/// `FUNDSCORE_CONFIG`, then the default location when it exists.
pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    default_config_path().filter(|path| path.exists())
}

impl Settings {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Merge the settings into the built-in tables and build the engine
    pub fn build_engine(&self) -> Result<Engine, ConfigError> {
        let mut thresholds = ThresholdTable::defaults();
        let mut catalog = IndicatorCatalog::defaults();

        for (sector_name, rules) in &self.thresholds {
            let sector = parse_sector(sector_name)?;
            for (indicator_name, rule) in rules {
                let id = parse_indicator(indicator_name)?;
                ensure_listed(&catalog, sector, id)?;
                rule.validate().map_err(|reason| ConfigError::InvalidRule {
                    sector,
                    indicator: id.key().to_string(),
                    reason,
                })?;
                if thresholds.insert(sector, id, rule.clone()).is_some() {
                    debug!("replaced threshold for {} in {}", id, sector);
                }
            }
        }

        for (sector_name, weights) in &self.weights {
            let sector = parse_sector(sector_name)?;
            for (indicator_name, weight) in weights {
                let id = parse_indicator(indicator_name)?;
                if !weight.is_finite() || *weight <= 0.0 {
                    return Err(ConfigError::InvalidWeight {
                        sector,
                        indicator: id.key().to_string(),
                        weight: *weight,
                    });
                }
                let meta = catalog
                    .get_mut(sector, id)
                    .ok_or_else(|| not_listed(sector, id))?;
                meta.weight = *weight;
            }
        }

        Ok(Engine::new(
            thresholds,
            catalog,
            default_overrides(),
            default_complementary_rules(),
        ))
    }
}

fn parse_sector(name: &str) -> Result<Sector, ConfigError> {
    Sector::parse(name).ok_or_else(|| ConfigError::UnknownSector(name.to_string()))
}

/// Overrides only make sense for indicators the sector catalog lists
fn ensure_listed(catalog: &IndicatorCatalog, sector: Sector, id: IndicatorId) -> Result<(), ConfigError> {
    catalog
        .get(sector, id)
        .map(|_| ())
        .ok_or_else(|| not_listed(sector, id))
}

fn not_listed(sector: Sector, id: IndicatorId) -> ConfigError {
    ConfigError::UnknownIndicator(format!("{} is not listed for {}", id, sector))
}

fn parse_indicator(name: &str) -> Result<IndicatorId, ConfigError> {
    IndicatorId::from_name(name).ok_or_else(|| ConfigError::UnknownIndicator(name.to_string()))
}
