//! Declarative adjustment rules
//!
//! Two ordered tables refine a threshold score:
//! - [`OverrideRule`]s are fixed indicator-specific corrections that may
//!   look at the previous value and at any complementary value.
//! - [`ComplementaryRule`]s let a related indicator soften or harden the
//!   score of its target, and only fire for keys the target's metadata lists.
//!
//! Each table is read by a single interpreter function, so new sectors and
//! new pairs only need new rows.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::indicator::IndicatorId;
use crate::scoring::Score;

/// Predicate on a single number
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueTest {
    Above(f64),
    Below(f64),
}

impl ValueTest {
    /// `NaN` never satisfies a test
    pub fn check(&self, value: f64) -> bool {
        match self {
            ValueTest::Above(limit) => value > *limit,
            ValueTest::Below(limit) => value < *limit,
        }
    }
}

/// Condition of an override rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverrideCondition {
    /// `|value - previous| > limit`; never fires without a previous value
    DeltaExceeds(f64),
    /// `value` passes `value_test` and the complementary `source` passes `source_test`
    WithComplementary {
        value_test: ValueTest,
        source: IndicatorId,
        source_test: ValueTest,
    },
}

/// Fixed correction applied after threshold scoring
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideRule {
    pub name: &'static str,
    pub indicator: IndicatorId,
    pub condition: OverrideCondition,
    /// Only fire when the current score equals this one; `None` fires on any score
    pub applies_to: Option<Score>,
    pub becomes: Score,
}

/// Adjustment of a target indicator driven by a related indicator
#[derive(Debug, Clone, PartialEq)]
pub struct ComplementaryRule {
    pub name: &'static str,
    pub source: IndicatorId,
    pub target: IndicatorId,
    pub when: ValueTest,
    pub applies_to: Score,
    pub becomes: Score,
}

/// A rule that changed the score during an evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    pub rule: &'static str,
    pub from: Score,
    pub to: Score,
}

/// Built-in override table
pub fn default_overrides() -> Vec<OverrideRule> {
    vec![
        OverrideRule {
            name: "roic_single_year_spike",
            indicator: IndicatorId::Roic,
            condition: OverrideCondition::DeltaExceeds(30.0),
            applies_to: None,
            becomes: Score::Medium,
        },
        OverrideRule {
            name: "liquidity_backed_by_cash_flow",
            indicator: IndicatorId::CurrentRatio,
            condition: OverrideCondition::WithComplementary {
                value_test: ValueTest::Below(0.5),
                source: IndicatorId::FreeCashFlow,
                source_test: ValueTest::Above(0.0),
            },
            applies_to: Some(Score::Bad),
            becomes: Score::Medium,
        },
    ]
}

/// Built-in complementary table
pub fn default_complementary_rules() -> Vec<ComplementaryRule> {
    use IndicatorId::*;

    let soften = |name, source, target, when| ComplementaryRule {
        name,
        source,
        target,
        when,
        applies_to: Score::Bad,
        becomes: Score::Medium,
    };
    let harden = |name, source, target, when, applies_to, becomes| ComplementaryRule {
        name,
        source,
        target,
        when,
        applies_to,
        becomes,
    };

    vec![
        soften("low_peg_softens_pl", Peg, Pl, ValueTest::Below(1.0)),
        soften("growth_softens_psr", RevenueGrowth, Psr, ValueTest::Above(20.0)),
        harden(
            "leverage_inflates_roe",
            DebtToEquity,
            Roe,
            ValueTest::Above(2.0),
            Score::Good,
            Score::Medium,
        ),
        soften(
            "cash_flow_softens_net_debt",
            FreeCashFlow,
            NetDebtToEbitda,
            ValueTest::Above(0.0),
        ),
        harden(
            "inefficient_rd_spend",
            RdEfficiency,
            RdToRevenue,
            ValueTest::Below(1.0),
            Score::Good,
            Score::Medium,
        ),
        soften(
            "recurring_revenue_softens_beta",
            RecurringRevenue,
            Beta,
            ValueTest::Above(70.0),
        ),
        harden(
            "heavy_sga_erodes_ebitda_margin",
            SgaToRevenue,
            EbitdaMargin,
            ValueTest::Above(30.0),
            Score::Good,
            Score::Medium,
        ),
        harden(
            "payout_without_earnings",
            Eps,
            PayoutRatio,
            ValueTest::Below(0.0),
            Score::Medium,
            Score::Bad,
        ),
    ]
}

/// Apply override rules for `indicator` in table order.
pub fn apply_overrides(
    rules: &[OverrideRule],
    indicator: IndicatorId,
    value: f64,
    previous: Option<f64>,
    complementary: &HashMap<IndicatorId, f64>,
    score: Score,
    applied: &mut Vec<Adjustment>,
) -> Score {
    let mut score = score;
    for rule in rules.iter().filter(|rule| rule.indicator == indicator) {
        if rule.applies_to.is_some_and(|required| required != score) {
            continue;
        }
        let fires = match rule.condition {
            OverrideCondition::DeltaExceeds(limit) => previous
                .filter(|p| !p.is_nan())
                .is_some_and(|p| (value - p).abs() > limit),
            OverrideCondition::WithComplementary {
                value_test,
                source,
                source_test,
            } => {
                value_test.check(value)
                    && complementary
                        .get(&source)
                        .is_some_and(|v| source_test.check(*v))
            }
        };
        if fires && score != rule.becomes {
            debug!(
                "override {} on {}: {} -> {}",
                rule.name, indicator, score, rule.becomes
            );
            applied.push(Adjustment {
                rule: rule.name,
                from: score,
                to: rule.becomes,
            });
            score = rule.becomes;
        }
    }
    score
}

/// Apply complementary rules for each related key listed by the target's
/// metadata and present in `complementary`, in the order the keys are listed.
pub fn apply_complementary(
    rules: &[ComplementaryRule],
    target: IndicatorId,
    related: &[IndicatorId],
    complementary: &HashMap<IndicatorId, f64>,
    score: Score,
    applied: &mut Vec<Adjustment>,
) -> Score {
    let mut score = score;
    for source in related {
        let Some(source_value) = complementary.get(source) else {
            continue;
        };
        for rule in rules
            .iter()
            .filter(|rule| rule.source == *source && rule.target == target)
        {
            if rule.applies_to == score && rule.when.check(*source_value) {
                debug!(
                    "complementary {} on {}: {} -> {}",
                    rule.name, target, score, rule.becomes
                );
                applied.push(Adjustment {
                    rule: rule.name,
                    from: score,
                    to: rule.becomes,
                });
                score = rule.becomes;
            }
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use IndicatorId::*;

    fn values(pairs: &[(IndicatorId, f64)]) -> HashMap<IndicatorId, f64> {
        pairs.iter().copied().collect()
    }

    fn run_complementary(target: IndicatorId, source: IndicatorId, value: f64, score: Score) -> Score {
        let mut applied = Vec::new();
        apply_complementary(
            &default_complementary_rules(),
            target,
            &[source],
            &values(&[(source, value)]),
            score,
            &mut applied,
        )
    }

    #[test]
    fn test_value_test_rejects_nan() {
        assert!(!ValueTest::Above(0.0).check(f64::NAN));
        assert!(!ValueTest::Below(0.0).check(f64::NAN));
        assert!(ValueTest::Above(0.0).check(0.1));
        assert!(!ValueTest::Above(0.0).check(0.0));
    }

    #[test]
    fn test_roic_spike_forces_medium() {
        let rules = default_overrides();
        let mut applied = Vec::new();
        let empty = HashMap::new();
        let score = apply_overrides(&rules, Roic, 45.0, Some(10.0), &empty, Score::Good, &mut applied);
        assert_eq!(score, Score::Medium);
        assert_eq!(applied[0].rule, "roic_single_year_spike");

        let score = apply_overrides(&rules, Roic, 5.0, Some(40.0), &empty, Score::Bad, &mut applied);
        assert_eq!(score, Score::Medium);

        // exactly 30 points is not a spike
        let score = apply_overrides(&rules, Roic, 40.0, Some(10.0), &empty, Score::Good, &mut applied);
        assert_eq!(score, Score::Good);

        let score = apply_overrides(&rules, Roic, 45.0, None, &empty, Score::Good, &mut applied);
        assert_eq!(score, Score::Good);
    }

    #[test]
    fn test_current_ratio_relaxed_by_free_cash_flow() {
        let rules = default_overrides();
        let mut applied = Vec::new();
        let fcf = values(&[(FreeCashFlow, 5_000_000.0)]);
        let score = apply_overrides(&rules, CurrentRatio, 0.4, None, &fcf, Score::Bad, &mut applied);
        assert_eq!(score, Score::Medium);

        let burning = values(&[(FreeCashFlow, -1.0)]);
        let score = apply_overrides(&rules, CurrentRatio, 0.4, None, &burning, Score::Bad, &mut applied);
        assert_eq!(score, Score::Bad);

        let score = apply_overrides(&rules, CurrentRatio, 0.6, None, &fcf, Score::Bad, &mut applied);
        assert_eq!(score, Score::Bad);
    }

    #[test]
    fn test_default_complementary_pairs() {
        assert_eq!(run_complementary(Pl, Peg, 0.8, Score::Bad), Score::Medium);
        assert_eq!(run_complementary(Pl, Peg, 1.5, Score::Bad), Score::Bad);
        assert_eq!(run_complementary(Psr, RevenueGrowth, 25.0, Score::Bad), Score::Medium);
        assert_eq!(run_complementary(Roe, DebtToEquity, 2.5, Score::Good), Score::Medium);
        assert_eq!(run_complementary(Roe, DebtToEquity, 2.5, Score::Bad), Score::Bad);
        assert_eq!(
            run_complementary(NetDebtToEbitda, FreeCashFlow, 1_000.0, Score::Bad),
            Score::Medium
        );
        assert_eq!(run_complementary(RdToRevenue, RdEfficiency, 0.5, Score::Good), Score::Medium);
        assert_eq!(run_complementary(Beta, RecurringRevenue, 85.0, Score::Bad), Score::Medium);
        assert_eq!(run_complementary(EbitdaMargin, SgaToRevenue, 35.0, Score::Good), Score::Medium);
        assert_eq!(run_complementary(PayoutRatio, Eps, -0.3, Score::Medium), Score::Bad);
        assert_eq!(run_complementary(PayoutRatio, Eps, 0.3, Score::Medium), Score::Medium);
    }

    #[test]
    fn test_complementary_only_uses_listed_keys() {
        let mut applied = Vec::new();
        let score = apply_complementary(
            &default_complementary_rules(),
            Pl,
            &[],
            &values(&[(Peg, 0.5)]),
            Score::Bad,
            &mut applied,
        );
        assert_eq!(score, Score::Bad);
        assert!(applied.is_empty());
    }

    #[test]
    fn test_rule_names_are_unique() {
        let mut names: Vec<_> = default_overrides().iter().map(|r| r.name).collect();
        names.extend(default_complementary_rules().iter().map(|r| r.name));
        let before = names.len();
        names.sort();
        names.dedup();
        assert_eq!(before, names.len());
    }
}
