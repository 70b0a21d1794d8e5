//! Contextual evaluator
//!
//! [`Engine`] owns the threshold table, the indicator catalog and both rule
//! tables. It is built once, exposes only `&self` methods and holds no
//! interior mutability, so a single instance can be shared freely across
//! threads.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::catalog::{IndicatorCatalog, IndicatorMeta};
use crate::error::EvaluationError;
use crate::explain::{build_explanation, ExplanationContext};
use crate::indicator::IndicatorId;
use crate::rules::{
    apply_complementary, apply_overrides, default_complementary_rules, default_overrides,
    Adjustment, ComplementaryRule, OverrideRule,
};
use crate::scoring::{score_value, score_with_delta, Score};
use crate::sector::Sector;
use crate::thresholds::ThresholdTable;

/// Process-wide engine with the built-in tables
static DEFAULT_ENGINE: Lazy<Engine> = Lazy::new(Engine::with_defaults);

/// Per-call inputs supplied by the caller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationContext {
    pub previous_value: Option<f64>,
    pub complementary: HashMap<IndicatorId, f64>,
}

impl EvaluationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_previous(mut self, previous: f64) -> Self {
        self.previous_value = Some(previous);
        self
    }

    pub fn with_complementary(mut self, key: IndicatorId, value: f64) -> Self {
        self.complementary.insert(key, value);
        self
    }
}

/// Outcome of one indicator evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub score: Score,
    pub weight: f64,
    pub informational_only: bool,
    pub explanation: String,
    /// Override and complementary rules that changed the score, in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub adjustments: Vec<Adjustment>,
}

impl EvaluationResult {
    /// Renderable result for indicators the engine knows nothing about
    pub fn fail_safe(explanation: impl Into<String>) -> Self {
        Self {
            score: Score::Bad,
            weight: 1.0,
            informational_only: false,
            explanation: explanation.into(),
            adjustments: Vec::new(),
        }
    }
}

/// Sector-aware indicator scoring engine
#[derive(Debug, Clone)]
pub struct Engine {
    thresholds: ThresholdTable,
    catalog: IndicatorCatalog,
    overrides: Vec<OverrideRule>,
    complementary: Vec<ComplementaryRule>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Engine {
    pub fn new(
        thresholds: ThresholdTable,
        catalog: IndicatorCatalog,
        overrides: Vec<OverrideRule>,
        complementary: Vec<ComplementaryRule>,
    ) -> Self {
        Self {
            thresholds,
            catalog,
            overrides,
            complementary,
        }
    }

    /// Engine with the built-in tables and rules
    pub fn with_defaults() -> Self {
        Self::new(
            ThresholdTable::defaults(),
            IndicatorCatalog::defaults(),
            default_overrides(),
            default_complementary_rules(),
        )
    }

    /// Shared engine with the built-in tables
    pub fn global() -> &'static Engine {
        &DEFAULT_ENGINE
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    pub fn catalog(&self) -> &IndicatorCatalog {
        &self.catalog
    }

    pub fn overrides(&self) -> &[OverrideRule] {
        &self.overrides
    }

    pub fn complementary_rules(&self) -> &[ComplementaryRule] {
        &self.complementary
    }

    /// Evaluate an indicator, reporting missing configuration as an error.
    ///
    /// # Examples
    /// ```
    /// use fundscore::{Engine, EvaluationContext, Score, Sector};
    ///
    /// let engine = Engine::global();
    /// let ctx = EvaluationContext::new();
    /// let result = engine.try_evaluate(Sector::Technology, "ROE", 20.0, &ctx).unwrap();
    /// assert_eq!(result.score, Score::Good);
    ///
    /// assert!(engine.try_evaluate(Sector::Technology, "Made Up Label", 1.0, &ctx).is_err());
    /// ```
    pub fn try_evaluate(
        &self,
        sector: Sector,
        indicator: &str,
        value: f64,
        ctx: &EvaluationContext,
    ) -> Result<EvaluationResult, EvaluationError> {
        let meta = self.catalog.find(sector, indicator).ok_or_else(|| {
            EvaluationError::ConfigurationMissing {
                sector,
                indicator: indicator.to_string(),
            }
        })?;
        Ok(self.evaluate_meta(sector, meta, value, ctx))
    }

    /// Evaluate an indicator, falling back to `{Bad, weight 1}` when the
    /// sector has no metadata for it.
    pub fn evaluate(
        &self,
        sector: Sector,
        indicator: &str,
        value: f64,
        ctx: &EvaluationContext,
    ) -> EvaluationResult {
        match self.try_evaluate(sector, indicator, value, ctx) {
            Ok(result) => result,
            Err(err) => {
                warn!("{}; using fail-safe score", err);
                EvaluationResult::fail_safe(format!(
                    "Indicador {} sem configuração para o setor {}.",
                    indicator,
                    sector.display_name()
                ))
            }
        }
    }

    /// Evaluate with a sector given by name. Unknown sectors are an error;
    /// unknown indicators still get the fail-safe result.
    pub fn evaluate_named(
        &self,
        sector: &str,
        indicator: &str,
        value: f64,
        ctx: &EvaluationContext,
    ) -> Result<EvaluationResult, EvaluationError> {
        let sector: Sector = sector.parse()?;
        Ok(self.evaluate(sector, indicator, value, ctx))
    }

    pub(crate) fn evaluate_meta(
        &self,
        sector: Sector,
        meta: &IndicatorMeta,
        value: f64,
        ctx: &EvaluationContext,
    ) -> EvaluationResult {
        let rule = self.thresholds.resolve(sector, meta.key);
        if rule.is_none() {
            debug!("no threshold for {} in {}", meta.key, sector);
        }
        if value.is_nan() {
            debug!("{} in {} is not a number", meta.key, sector);
        }

        let score = match ctx.previous_value {
            Some(previous) if meta.delta_adjusted => score_with_delta(value, Some(previous), rule),
            _ => score_value(value, rule),
        };

        // unscored and invalid values stay Bad whatever the related indicators say
        let mut adjustments = Vec::new();
        let score = if value.is_nan() || rule.is_none() {
            score
        } else {
            let score = apply_overrides(
                &self.overrides,
                meta.key,
                value,
                ctx.previous_value,
                &ctx.complementary,
                score,
                &mut adjustments,
            );
            apply_complementary(
                &self.complementary,
                meta.key,
                &meta.complementary,
                &ctx.complementary,
                score,
                &mut adjustments,
            )
        };

        let explanation = build_explanation(&ExplanationContext {
            sector,
            meta,
            value,
            previous: ctx.previous_value,
            score,
            rule,
        });

        EvaluationResult {
            score,
            weight: meta.weight,
            informational_only: meta.informational_only,
            explanation,
            adjustments,
        }
    }
}
