//! Text helpers shared by the sector and indicator lookups
//!
//! Labels arrive from many places (provider exports, UI strings, CLI
//! arguments) with inconsistent casing, accents and separators. Every lookup
//! compares names through [`normalize_name`] so that "Dívida Líquida/EBITDA",
//! "divida liquida / ebitda" and "DIVIDA-LIQUIDA EBITDA" resolve to the same
//! entry.

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Normalize a human-readable name for comparison.
///
/// Uppercases, strips diacritics, turns separators (`/`, `-`, `_`, `.`) into
/// spaces, drops any other punctuation and collapses whitespace.
///
/// # Examples
/// ```
/// use fundscore::utils::normalize_name;
///
/// assert_eq!(normalize_name("Dívida Líquida/EBITDA"), "DIVIDA LIQUIDA EBITDA");
/// assert_eq!(normalize_name("  consumo   não-cíclico "), "CONSUMO NAO CICLICO");
/// assert_eq!(normalize_name("Margem EBITDA (%)"), "MARGEM EBITDA");
/// ```
pub fn normalize_name(input: &str) -> String {
    let upper = input.to_uppercase();
    let mut out = String::with_capacity(upper.len());
    for ch in upper.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_ascii_alphanumeric() || ch == ' ' {
            out.push(ch);
        } else if matches!(ch, '/' | '-' | '_' | '.') {
            out.push(' ');
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compact form used for key matching: normalized name without spaces.
///
/// `"netDebtToEbitda"`, `"net_debt_to_ebitda"` and `"NET DEBT TO EBITDA"`
/// all compact to `"NETDEBTTOEBITDA"`.
pub fn compact_name(input: &str) -> String {
    normalize_name(input).replace(' ', "")
}

/// Format a ratio for explanations: integers without decimals, everything
/// else with two decimal places.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "n/d".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
