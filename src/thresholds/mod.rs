//! Threshold rules and the per-sector threshold table
//!
//! A [`ThresholdRule`] is a true sum type: a ladder, a band, or a
//! placeholder for an externally computed check. The [`ThresholdTable`] is
//! partial on purpose; a missing entry is a legitimate outcome and the
//! scorer treats it as `Bad`.

mod defaults;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::indicator::IndicatorId;
use crate::sector::Sector;

/// How a raw indicator value maps onto the score scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum ThresholdRule {
    /// Good/medium ladder. `reverse` means lower is better. Values inside
    /// `neutral_range` are always `Medium`.
    Symmetric {
        good: f64,
        medium: f64,
        #[serde(default)]
        reverse: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        neutral_range: Option<(f64, f64)>,
    },
    /// Band membership. Without `reverse` the value must stay inside
    /// `[min, max]`; with `reverse`, `min` and `max` are the good and
    /// tolerable ceilings.
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        #[serde(default)]
        reverse: bool,
    },
    /// Computed outside the engine (e.g. DCF valuation against price)
    Custom { handler: String },
}

impl ThresholdRule {
    pub fn higher_is_better(good: f64, medium: f64) -> Self {
        ThresholdRule::Symmetric {
            good,
            medium,
            reverse: false,
            neutral_range: None,
        }
    }

    pub fn lower_is_better(good: f64, medium: f64) -> Self {
        ThresholdRule::Symmetric {
            good,
            medium,
            reverse: true,
            neutral_range: None,
        }
    }

    /// Value must stay inside `[min, max]`
    pub fn band(min: Option<f64>, max: Option<f64>) -> Self {
        ThresholdRule::Range {
            min,
            max,
            reverse: false,
        }
    }

    /// Good up to `min`, tolerable up to `max`, bad beyond
    pub fn ceiling(min: Option<f64>, max: Option<f64>) -> Self {
        ThresholdRule::Range {
            min,
            max,
            reverse: true,
        }
    }

    pub fn custom(handler: &str) -> Self {
        ThresholdRule::Custom {
            handler: handler.to_string(),
        }
    }

    /// Attach a neutral band to a ladder; other shapes are returned unchanged
    pub fn with_neutral_range(self, lo: f64, hi: f64) -> Self {
        match self {
            ThresholdRule::Symmetric {
                good,
                medium,
                reverse,
                ..
            } => ThresholdRule::Symmetric {
                good,
                medium,
                reverse,
                neutral_range: Some((lo, hi)),
            },
            other => other,
        }
    }

    /// Check internal consistency, returning a human-readable reason on failure
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ThresholdRule::Symmetric {
                good,
                medium,
                reverse,
                neutral_range,
            } => {
                if !good.is_finite() || !medium.is_finite() {
                    return Err("good and medium must be finite".to_string());
                }
                if *reverse && good > medium {
                    return Err(format!(
                        "lower-is-better ladder needs good <= medium (good={}, medium={})",
                        good, medium
                    ));
                }
                if !*reverse && good < medium {
                    return Err(format!(
                        "higher-is-better ladder needs good >= medium (good={}, medium={})",
                        good, medium
                    ));
                }
                if let Some((lo, hi)) = neutral_range {
                    if !lo.is_finite() || !hi.is_finite() || lo > hi {
                        return Err(format!("invalid neutral range [{}, {}]", lo, hi));
                    }
                }
                Ok(())
            }
            ThresholdRule::Range { min, max, .. } => {
                if min.is_none() && max.is_none() {
                    return Err("range needs at least one bound".to_string());
                }
                if min.is_some_and(|v| !v.is_finite()) || max.is_some_and(|v| !v.is_finite()) {
                    return Err("range bounds must be finite".to_string());
                }
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        return Err(format!("range needs min <= max (min={}, max={})", min, max));
                    }
                }
                Ok(())
            }
            ThresholdRule::Custom { handler } => {
                if handler.trim().is_empty() {
                    Err("custom rule needs a handler".to_string())
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Short benchmark description used in explanations and CLI listings
    pub fn describe(&self) -> String {
        use crate::utils::format_number as n;
        match self {
            ThresholdRule::Symmetric {
                good,
                medium,
                reverse,
                neutral_range,
            } => {
                let op = if *reverse { "≤" } else { "≥" };
                let mut text = format!("bom {} {}, médio {} {}", op, n(*good), op, n(*medium));
                if let Some((lo, hi)) = neutral_range {
                    text.push_str(&format!(", neutro entre {} e {}", n(*lo), n(*hi)));
                }
                text
            }
            ThresholdRule::Range {
                min,
                max,
                reverse: true,
            } => match (min, max) {
                (Some(min), Some(max)) => format!("bom ≤ {}, médio ≤ {}", n(*min), n(*max)),
                (Some(min), None) => format!("bom ≤ {}", n(*min)),
                (None, Some(max)) => format!("aceitável ≤ {}", n(*max)),
                (None, None) => "sem limites".to_string(),
            },
            ThresholdRule::Range {
                min,
                max,
                reverse: false,
            } => match (min, max) {
                (Some(min), Some(max)) => format!("faixa aceitável de {} a {}", n(*min), n(*max)),
                (Some(min), None) => format!("mínimo aceitável {}", n(*min)),
                (None, Some(max)) => format!("máximo aceitável {}", n(*max)),
                (None, None) => "sem limites".to_string(),
            },
            ThresholdRule::Custom { handler } => format!("cálculo externo ({})", handler),
        }
    }
}

/// `Sector → (indicator → rule)` lookup
#[derive(Debug, Clone, Default)]
pub struct ThresholdTable {
    rules: HashMap<Sector, HashMap<IndicatorId, ThresholdRule>>,
}

impl ThresholdTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in tables for every sector
    pub fn defaults() -> Self {
        let mut table = Self::new();
        for sector in Sector::ALL {
            for (id, rule) in defaults::rules_for(sector) {
                table.insert(sector, id, rule);
            }
        }
        table
    }

    /// Threshold resolver: the rule configured for `(sector, id)`, if any
    pub fn resolve(&self, sector: Sector, id: IndicatorId) -> Option<&ThresholdRule> {
        self.rules.get(&sector).and_then(|rules| rules.get(&id))
    }

    /// Insert or replace a rule, returning the previous one
    pub fn insert(
        &mut self,
        sector: Sector,
        id: IndicatorId,
        rule: ThresholdRule,
    ) -> Option<ThresholdRule> {
        self.rules.entry(sector).or_default().insert(id, rule)
    }

    /// All rules of a sector, sorted by indicator key
    pub fn rules_for(&self, sector: Sector) -> Vec<(IndicatorId, &ThresholdRule)> {
        let mut rules: Vec<_> = self
            .rules
            .get(&sector)
            .map(|rules| rules.iter().map(|(id, rule)| (*id, rule)).collect())
            .unwrap_or_default();
        rules.sort_by_key(|(id, _)| id.key());
        rules
    }

    pub fn len(&self) -> usize {
        self.rules.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_default_rule_validates() {
        let table = ThresholdTable::defaults();
        for sector in Sector::ALL {
            let rules = table.rules_for(sector);
            assert!(rules.len() >= 12, "{} has only {} rules", sector, rules.len());
            for (id, rule) in rules {
                assert!(rule.validate().is_ok(), "{}/{}: {:?}", sector, id, rule.validate());
            }
        }
    }

    #[test]
    fn test_resolver_returns_configured_rules() {
        let table = ThresholdTable::defaults();
        assert_eq!(
            table.resolve(Sector::Technology, IndicatorId::Roe),
            Some(&ThresholdRule::higher_is_better(18.0, 10.0))
        );
        assert_eq!(
            table.resolve(Sector::Technology, IndicatorId::Pl),
            Some(&ThresholdRule::lower_is_better(15.0, 25.0))
        );
    }

    #[test]
    fn test_missing_entries_are_absent_not_errors() {
        let table = ThresholdTable::defaults();
        assert!(table.resolve(Sector::Technology, IndicatorId::MarketCap).is_none());
        assert!(table.resolve(Sector::FinancialServices, IndicatorId::NetDebtToEbitda).is_none());
        assert!(ThresholdTable::new().resolve(Sector::Energy, IndicatorId::Roe).is_none());
    }

    #[test]
    fn test_validate_rejects_inconsistent_rules() {
        assert!(ThresholdRule::higher_is_better(5.0, 10.0).validate().is_err());
        assert!(ThresholdRule::lower_is_better(10.0, 5.0).validate().is_err());
        assert!(ThresholdRule::band(Some(3.0), Some(1.0)).validate().is_err());
        assert!(ThresholdRule::band(None, None).validate().is_err());
        assert!(ThresholdRule::custom(" ").validate().is_err());
        assert!(ThresholdRule::higher_is_better(f64::NAN, 1.0).validate().is_err());
        assert!(ThresholdRule::lower_is_better(0.8, 1.3)
            .with_neutral_range(1.1, 0.9)
            .validate()
            .is_err());
    }

    #[test]
    fn test_rule_deserializes_from_tagged_toml() {
        let rule: ThresholdRule = toml::from_str(
            r#"
            type = "symmetric"
            good = 0.8
            medium = 1.3
            reverse = true
            neutral_range = [0.9, 1.1]
            "#,
        )
        .unwrap();
        assert_eq!(rule, ThresholdRule::lower_is_better(0.8, 1.3).with_neutral_range(0.9, 1.1));

        let rule: ThresholdRule = toml::from_str("type = \"range\"\nmin = 11.0").unwrap();
        assert_eq!(rule, ThresholdRule::band(Some(11.0), None));
    }

    #[test]
    fn test_rule_shapes_cannot_mix_fields() {
        let mixed = toml::from_str::<ThresholdRule>(
            "type = \"symmetric\"\ngood = 1.0\nmedium = 0.5\nmin = 0.0",
        );
        assert!(mixed.is_err());
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            ThresholdRule::higher_is_better(18.0, 10.0).describe(),
            "bom ≥ 18, médio ≥ 10"
        );
        assert_eq!(
            ThresholdRule::band(Some(1.0), Some(2.5)).describe(),
            "faixa aceitável de 1 a 2.50"
        );
    }
}
