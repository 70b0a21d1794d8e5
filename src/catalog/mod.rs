//! Indicator metadata per sector
//!
//! Each sector has an ordered list of [`IndicatorMeta`] entries. Order only
//! matters for display; scoring resolves entries by key.

mod defaults;

use std::collections::HashMap;
use std::fmt;

use crate::explain::ExplanationContext;
use crate::indicator::IndicatorId;
use crate::sector::Sector;
use crate::utils::compact_name;

/// Where an indicator's explanation text comes from
#[derive(Clone, Copy)]
pub enum Explanation {
    /// Fixed text
    Text(&'static str),
    /// Computed from the evaluation
    Dynamic(fn(&ExplanationContext<'_>) -> String),
    /// Composed from the score, trend, sector note and related indicators
    Auto,
    /// "Benchmark defined for indicator X" fallback
    Generic,
}

impl fmt::Debug for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Explanation::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Explanation::Dynamic(_) => f.write_str("Dynamic(..)"),
            Explanation::Auto => f.write_str("Auto"),
            Explanation::Generic => f.write_str("Generic"),
        }
    }
}

/// Descriptor of one indicator within a sector
#[derive(Debug, Clone)]
pub struct IndicatorMeta {
    pub key: IndicatorId,
    pub label: &'static str,
    pub weight: f64,
    pub delta_adjusted: bool,
    pub sector_sensitive: bool,
    pub complementary: Vec<IndicatorId>,
    pub informational_only: bool,
    pub explanation: Explanation,
}

impl IndicatorMeta {
    pub fn new(key: IndicatorId) -> Self {
        Self {
            key,
            label: key.default_label(),
            weight: 1.0,
            delta_adjusted: false,
            sector_sensitive: false,
            complementary: Vec::new(),
            informational_only: false,
            explanation: Explanation::Auto,
        }
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn delta_adjusted(mut self) -> Self {
        self.delta_adjusted = true;
        self
    }

    pub fn sector_sensitive(mut self) -> Self {
        self.sector_sensitive = true;
        self
    }

    pub fn complementary(mut self, keys: &[IndicatorId]) -> Self {
        self.complementary = keys.to_vec();
        self
    }

    pub fn informational(mut self) -> Self {
        self.informational_only = true;
        self
    }

    pub fn explanation(mut self, explanation: Explanation) -> Self {
        self.explanation = explanation;
        self
    }

    /// Whether `name` refers to this entry (key, sector label or known alias)
    pub fn matches(&self, name: &str) -> bool {
        let compact = compact_name(name);
        if compact.is_empty() {
            return false;
        }
        compact == compact_name(self.key.key())
            || compact == compact_name(self.label)
            || IndicatorId::from_name(name) == Some(self.key)
    }
}

/// `Sector → ordered indicator list`
#[derive(Debug, Clone, Default)]
pub struct IndicatorCatalog {
    entries: HashMap<Sector, Vec<IndicatorMeta>>,
}

impl IndicatorCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in catalog for every sector
    pub fn defaults() -> Self {
        let mut catalog = Self::new();
        for sector in Sector::ALL {
            catalog
                .entries
                .insert(sector, defaults::indicators_for(sector));
        }
        catalog
    }

    /// Ordered indicators of a sector (empty when none are configured)
    pub fn indicators(&self, sector: Sector) -> &[IndicatorMeta] {
        self.entries.get(&sector).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get(&self, sector: Sector, key: IndicatorId) -> Option<&IndicatorMeta> {
        self.indicators(sector).iter().find(|meta| meta.key == key)
    }

    /// Resolve an entry from a key or a label
    pub fn find(&self, sector: Sector, name: &str) -> Option<&IndicatorMeta> {
        self.indicators(sector).iter().find(|meta| meta.matches(name))
    }

    pub(crate) fn get_mut(&mut self, sector: Sector, key: IndicatorId) -> Option<&mut IndicatorMeta> {
        self.entries
            .get_mut(&sector)
            .and_then(|list| list.iter_mut().find(|meta| meta.key == key))
    }

    /// Append an entry, replacing any existing entry with the same key in place
    pub fn insert(&mut self, sector: Sector, meta: IndicatorMeta) {
        let list = self.entries.entry(sector).or_default();
        match list.iter_mut().find(|existing| existing.key == meta.key) {
            Some(existing) => *existing = meta,
            None => list.push(meta),
        }
    }
}
