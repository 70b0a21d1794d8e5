//! Industry sectors
//!
//! The sector set is closed: every threshold and catalog table is keyed by
//! one of these variants, and names outside the set are rejected with
//! [`EvaluationError::UnknownSector`] instead of silently falling back to an
//! empty rule set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EvaluationError;
use crate::utils::compact_name;

/// Industry sector used to select thresholds and indicator metadata
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Healthcare,
    Technology,
    Utilities,
    RealEstate,
    Industrials,
    Energy,
    ConsumerDefensive,
    FinancialServices,
    ConsumerCyclical,
    CommunicationServices,
    BasicMaterials,
}

impl Sector {
    pub const ALL: [Sector; 11] = [
        Sector::Healthcare,
        Sector::Technology,
        Sector::Utilities,
        Sector::RealEstate,
        Sector::Industrials,
        Sector::Energy,
        Sector::ConsumerDefensive,
        Sector::FinancialServices,
        Sector::ConsumerCyclical,
        Sector::CommunicationServices,
        Sector::BasicMaterials,
    ];

    /// Canonical key, as used in configuration files and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Healthcare => "healthcare",
            Sector::Technology => "technology",
            Sector::Utilities => "utilities",
            Sector::RealEstate => "real_estate",
            Sector::Industrials => "industrials",
            Sector::Energy => "energy",
            Sector::ConsumerDefensive => "consumer_defensive",
            Sector::FinancialServices => "financial_services",
            Sector::ConsumerCyclical => "consumer_cyclical",
            Sector::CommunicationServices => "communication_services",
            Sector::BasicMaterials => "basic_materials",
        }
    }

    /// English name as reported by most data providers
    pub fn english_name(&self) -> &'static str {
        match self {
            Sector::Healthcare => "Healthcare",
            Sector::Technology => "Technology",
            Sector::Utilities => "Utilities",
            Sector::RealEstate => "Real Estate",
            Sector::Industrials => "Industrials",
            Sector::Energy => "Energy",
            Sector::ConsumerDefensive => "Consumer Defensive",
            Sector::FinancialServices => "Financial Services",
            Sector::ConsumerCyclical => "Consumer Cyclical",
            Sector::CommunicationServices => "Communication Services",
            Sector::BasicMaterials => "Basic Materials",
        }
    }

    /// Portuguese display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Sector::Healthcare => "Saúde",
            Sector::Technology => "Tecnologia",
            Sector::Utilities => "Utilidade Pública",
            Sector::RealEstate => "Imobiliário",
            Sector::Industrials => "Bens Industriais",
            Sector::Energy => "Energia",
            Sector::ConsumerDefensive => "Consumo Não Cíclico",
            Sector::FinancialServices => "Serviços Financeiros",
            Sector::ConsumerCyclical => "Consumo Cíclico",
            Sector::CommunicationServices => "Comunicações",
            Sector::BasicMaterials => "Materiais Básicos",
        }
    }

    /// Resolve a sector from its key, English name or Portuguese name
    pub fn parse(name: &str) -> Option<Self> {
        let compact = compact_name(name);
        if compact.is_empty() {
            return None;
        }
        Sector::ALL.into_iter().find(|sector| {
            compact_name(sector.as_str()) == compact
                || compact_name(sector.english_name()) == compact
                || compact_name(sector.display_name()) == compact
        })
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sector {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sector::parse(s).ok_or_else(|| EvaluationError::UnknownSector(s.to_string()))
    }
}
