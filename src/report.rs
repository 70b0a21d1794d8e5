//! Sector report: evaluate a company's whole indicator snapshot
//!
//! The caller hands over already-normalized current and prior-year values.
//! Every catalog entry of the sector that has a value is evaluated in catalog
//! order, with the previous value taken from `previous` and every current
//! value offered as a complementary input.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::engine::{Engine, EvaluationContext, EvaluationResult};
use crate::indicator::IndicatorId;
use crate::scoring::Score;
use crate::sector::Sector;

/// Normalized indicator values of one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub sector: Sector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    pub values: HashMap<IndicatorId, f64>,
    #[serde(default)]
    pub previous: HashMap<IndicatorId, f64>,
}

/// One evaluated indicator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub key: IndicatorId,
    pub label: &'static str,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<f64>,
    #[serde(flatten)]
    pub result: EvaluationResult,
}

/// Count of scored rows per level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreCounts {
    pub good: usize,
    pub medium: usize,
    pub bad: usize,
}

impl ScoreCounts {
    fn record(&mut self, score: Score) {
        match score {
            Score::Good => self.good += 1,
            Score::Medium => self.medium += 1,
            Score::Bad => self.bad += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.good + self.medium + self.bad
    }
}

/// Evaluation of a whole snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorReport {
    pub sector: Sector,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    pub rows: Vec<ReportRow>,
    /// Catalog entries the snapshot has no value for
    pub missing: Vec<IndicatorId>,
    /// Snapshot keys the sector catalog does not list
    pub ignored: Vec<IndicatorId>,
    /// Non-informational rows only
    pub counts: ScoreCounts,
    /// Weighted score in `[0, 100]`; `None` when nothing was scored
    pub weighted_score: Option<f64>,
}

impl SectorReport {
    /// Rows meant for display (informational rows excluded)
    pub fn scored_rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter().filter(|row| !row.result.informational_only)
    }
}

/// Evaluate every catalog indicator the snapshot has a value for.
///
/// # Examples
/// ```
/// use fundscore::report::{evaluate_snapshot, Snapshot};
/// use fundscore::{Engine, IndicatorId, Sector};
/// use std::collections::HashMap;
///
/// let snapshot = Snapshot {
///     sector: Sector::Technology,
///     ticker: None,
///     values: HashMap::from([(IndicatorId::Roe, 20.0), (IndicatorId::Pl, 30.0)]),
///     previous: HashMap::new(),
/// };
/// let report = evaluate_snapshot(Engine::global(), &snapshot);
/// assert_eq!(report.counts.good, 1);
/// assert_eq!(report.counts.bad, 1);
/// ```
pub fn evaluate_snapshot(engine: &Engine, snapshot: &Snapshot) -> SectorReport {
    let catalog = engine.catalog().indicators(snapshot.sector);

    let mut rows = Vec::new();
    let mut missing = Vec::new();
    let mut counts = ScoreCounts::default();
    let mut weighted_points = 0.0;
    let mut total_weight = 0.0;

    for meta in catalog {
        let Some(&value) = snapshot.values.get(&meta.key) else {
            missing.push(meta.key);
            continue;
        };

        let previous = snapshot.previous.get(&meta.key).copied();
        let ctx = EvaluationContext {
            previous_value: previous,
            complementary: snapshot.values.clone(),
        };
        let result = engine.evaluate_meta(snapshot.sector, meta, value, &ctx);

        if !result.informational_only {
            counts.record(result.score);
            weighted_points += result.weight * result.score.points();
            total_weight += result.weight;
        }

        rows.push(ReportRow {
            key: meta.key,
            label: meta.label,
            value,
            previous,
            result,
        });
    }

    let mut ignored: Vec<IndicatorId> = snapshot
        .values
        .keys()
        .filter(|key| !catalog.iter().any(|meta| meta.key == **key))
        .copied()
        .collect();
    ignored.sort();
    if !ignored.is_empty() {
        debug!(
            "{} values not listed for {}: {:?}",
            ignored.len(),
            snapshot.sector,
            ignored
        );
    }

    let weighted_score = (total_weight > 0.0).then(|| weighted_points / total_weight * 100.0);

    SectorReport {
        sector: snapshot.sector,
        ticker: snapshot.ticker.clone(),
        rows,
        missing,
        ignored,
        counts,
        weighted_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use IndicatorId::*;

    fn snapshot(values: &[(IndicatorId, f64)], previous: &[(IndicatorId, f64)]) -> Snapshot {
        Snapshot {
            sector: Sector::Technology,
            ticker: Some("TOTS3".to_string()),
            values: values.iter().copied().collect(),
            previous: previous.iter().copied().collect(),
        }
    }

    #[test]
    fn test_rows_follow_catalog_order() {
        let report = evaluate_snapshot(
            &Engine::with_defaults(),
            &snapshot(&[(Roe, 20.0), (Pl, 12.0), (MarketCap, 1e9)], &[]),
        );
        let keys: Vec<_> = report.rows.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![Pl, Roe, MarketCap]);
    }

    #[test]
    fn test_weighted_score_skips_informational_rows() {
        // P/L Good (w 2) + ROE Medium (w 2) + ROA ignored in technology
        let report = evaluate_snapshot(
            &Engine::with_defaults(),
            &snapshot(&[(Pl, 12.0), (Roe, 12.0), (MarketCap, 1e9), (Roa, 5.0)], &[]),
        );
        assert_eq!(report.counts, ScoreCounts { good: 1, medium: 1, bad: 0 });
        assert_eq!(report.weighted_score, Some(75.0));
        assert_eq!(report.ignored, vec![Roa]);
        assert_eq!(report.scored_rows().count(), 2);
    }

    #[test]
    fn test_complementary_values_come_from_the_snapshot() {
        let report = evaluate_snapshot(
            &Engine::with_defaults(),
            &snapshot(&[(Pl, 30.0), (Peg, 0.8)], &[]),
        );
        let pl = report.rows.iter().find(|r| r.key == Pl).unwrap();
        assert_eq!(pl.result.score, Score::Medium);
    }

    #[test]
    fn test_previous_values_feed_delta_adjustment() {
        let report = evaluate_snapshot(
            &Engine::with_defaults(),
            &snapshot(&[(NetMargin, 6.0)], &[(NetMargin, 4.0)]),
        );
        let row = &report.rows[0];
        assert_eq!(row.previous, Some(4.0));
        assert_eq!(row.result.score, Score::Medium);
    }

    #[test]
    fn test_empty_snapshot_has_no_weighted_score() {
        let report = evaluate_snapshot(&Engine::with_defaults(), &snapshot(&[], &[]));
        assert!(report.rows.is_empty());
        assert_eq!(report.weighted_score, None);
        assert_eq!(report.missing.len(), Engine::with_defaults().catalog().indicators(Sector::Technology).len());
    }

    #[test]
    fn test_snapshot_deserializes_from_json() {
        let json = r#"{
            "sector": "technology",
            "values": { "roe": 20.0, "netDebtToEbitda": 0.5 },
            "previous": { "roe": 18.0 }
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.values[&Roe], 20.0);
        assert_eq!(snapshot.previous[&Roe], 18.0);
        assert!(snapshot.ticker.is_none());
    }
}
