//! Fundscore - sector-aware scoring of fundamental indicators
//!
//! This library classifies financial ratios (P/L, ROE, Dívida Líquida/EBITDA,
//! ...) as good, medium or bad for a given industry sector, nudging the score
//! by the prior-year value and by related indicators.
//!
//! ```
//! use fundscore::{evaluate, EvaluationContext, IndicatorId, Score, Sector};
//!
//! let ctx = EvaluationContext::new().with_complementary(IndicatorId::FreeCashFlow, 5_000_000.0);
//! let result = evaluate(Sector::Technology, "Liquidez Corrente", 0.4, &ctx);
//! assert_eq!(result.score, Score::Medium);
//! ```

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod explain;
pub mod indicator;
pub mod report;
pub mod rules;
pub mod scoring;
pub mod sector;
pub mod thresholds;
pub mod utils;

pub use engine::{Engine, EvaluationContext, EvaluationResult};
pub use error::{ConfigError, EvaluationError};
pub use indicator::IndicatorId;
pub use scoring::Score;
pub use sector::Sector;

/// Evaluate an indicator with the built-in tables.
///
/// Never fails: indicators the sector does not list resolve to
/// `{Bad, weight 1}` and a warning is logged.
pub fn evaluate(
    sector: Sector,
    indicator: &str,
    value: f64,
    ctx: &EvaluationContext,
) -> EvaluationResult {
    Engine::global().evaluate(sector, indicator, value, ctx)
}
