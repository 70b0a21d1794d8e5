//! Scoring primitives
//!
//! [`score_value`] maps a raw value onto the `Bad < Medium < Good` scale using
//! a single [`ThresholdRule`]; [`score_with_delta`] wraps it with the
//! year-over-year nudge. Both are pure functions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::thresholds::ThresholdRule;

/// Ordered outcome of an indicator evaluation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Score {
    Bad,
    Medium,
    Good,
}

impl Score {
    pub fn as_str(&self) -> &'static str {
        match self {
            Score::Bad => "bad",
            Score::Medium => "medium",
            Score::Good => "good",
        }
    }

    /// Weight contribution used by aggregated reports
    pub fn points(&self) -> f64 {
        match self {
            Score::Bad => 0.0,
            Score::Medium => 0.5,
            Score::Good => 1.0,
        }
    }

    /// One level up, saturating at `Good`
    pub fn promote(self) -> Self {
        match self {
            Score::Bad => Score::Medium,
            Score::Medium | Score::Good => Score::Good,
        }
    }

    /// One level down, saturating at `Bad`
    pub fn demote(self) -> Self {
        match self {
            Score::Good => Score::Medium,
            Score::Medium | Score::Bad => Score::Bad,
        }
    }

    /// Distance between two scores in levels
    pub fn distance(self, other: Score) -> u8 {
        (self as i8 - other as i8).unsigned_abs()
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score a value against a rule.
///
/// A missing rule and a `NaN` value both yield `Bad`; a custom rule yields
/// `Medium` until its external computation is plugged in.
///
/// # Examples
/// ```
/// use fundscore::scoring::{score_value, Score};
/// use fundscore::thresholds::ThresholdRule;
///
/// let roe = ThresholdRule::higher_is_better(18.0, 10.0);
/// assert_eq!(score_value(20.0, Some(&roe)), Score::Good);
/// assert_eq!(score_value(12.0, Some(&roe)), Score::Medium);
/// assert_eq!(score_value(f64::NAN, Some(&roe)), Score::Bad);
/// assert_eq!(score_value(20.0, None), Score::Bad);
/// ```
pub fn score_value(value: f64, rule: Option<&ThresholdRule>) -> Score {
    let Some(rule) = rule else {
        return Score::Bad;
    };
    if value.is_nan() {
        return Score::Bad;
    }

    match rule {
        ThresholdRule::Custom { .. } => Score::Medium,
        ThresholdRule::Range { min, max, reverse } => {
            let above_max = max.is_some_and(|max| value > max);
            let above_min = min.is_some_and(|min| value > min);
            let below_min = min.is_some_and(|min| value < min);
            if *reverse {
                if above_max {
                    Score::Bad
                } else if above_min {
                    Score::Medium
                } else {
                    Score::Good
                }
            } else if below_min || above_max {
                Score::Bad
            } else {
                Score::Good
            }
        }
        ThresholdRule::Symmetric {
            good,
            medium,
            reverse,
            neutral_range,
        } => {
            if let Some((lo, hi)) = neutral_range {
                if *lo <= value && value <= *hi {
                    return Score::Medium;
                }
            }
            if *reverse {
                if value <= *good {
                    Score::Good
                } else if value <= *medium {
                    Score::Medium
                } else {
                    Score::Bad
                }
            } else if value >= *good {
                Score::Good
            } else if value >= *medium {
                Score::Medium
            } else {
                Score::Bad
            }
        }
    }
}

/// Score a value and nudge it by at most one level using the prior value.
///
/// `Good` is never revised; an improving `Bad` becomes `Medium` and a
/// non-improving `Medium` becomes `Bad`. "Improving" means the value went up.
///
/// # Examples
/// ```
/// use fundscore::scoring::{score_with_delta, Score};
/// use fundscore::thresholds::ThresholdRule;
///
/// let margin = ThresholdRule::higher_is_better(20.0, 10.0);
/// assert_eq!(score_with_delta(8.0, Some(5.0), Some(&margin)), Score::Medium);
/// assert_eq!(score_with_delta(12.0, Some(15.0), Some(&margin)), Score::Bad);
/// assert_eq!(score_with_delta(25.0, Some(40.0), Some(&margin)), Score::Good);
/// ```
pub fn score_with_delta(value: f64, previous: Option<f64>, rule: Option<&ThresholdRule>) -> Score {
    let base = score_value(value, rule);
    let previous = match previous {
        Some(p) if !p.is_nan() => p,
        _ => return base,
    };
    if base == Score::Good {
        return base;
    }

    let improving = value > previous;
    match base {
        Score::Bad if improving => Score::Medium,
        Score::Medium if !improving => Score::Bad,
        other => other,
    }
}
