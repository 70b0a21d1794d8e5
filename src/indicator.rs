//! Canonical indicator identifiers
//!
//! Indicators are addressed by [`IndicatorId`]; display labels are metadata
//! only. Resolution from free text goes through [`IndicatorId::from_name`],
//! which accepts the canonical key, the default label and a short list of
//! common spellings.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::compact_name;

/// Canonical key of a financial indicator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum IndicatorId {
    // Valuation
    Pl,
    Pvp,
    Psr,
    EvEbitda,
    EvEbit,
    Peg,
    DividendYield,
    PayoutRatio,
    DcfUpside,
    // Profitability
    Roe,
    Roic,
    Roa,
    GrossMargin,
    EbitdaMargin,
    NetMargin,
    // Debt and liquidity
    NetDebtToEbitda,
    DebtToEquity,
    CurrentRatio,
    InterestCoverage,
    // Growth
    RevenueGrowth,
    EarningsGrowth,
    // Cash generation and operations
    FreeCashFlow,
    Eps,
    Beta,
    RdToRevenue,
    RdEfficiency,
    RecurringRevenue,
    SgaToRevenue,
    CapexToRevenue,
    AssetTurnover,
    InventoryTurnover,
    MarketCap,
    // Sector specific
    BaselIndex,
    NplRatio,
    EfficiencyRatio,
    Vacancy,
    FfoYield,
    ChurnRate,
}

impl IndicatorId {
    pub const ALL: [IndicatorId; 38] = [
        IndicatorId::Pl,
        IndicatorId::Pvp,
        IndicatorId::Psr,
        IndicatorId::EvEbitda,
        IndicatorId::EvEbit,
        IndicatorId::Peg,
        IndicatorId::DividendYield,
        IndicatorId::PayoutRatio,
        IndicatorId::DcfUpside,
        IndicatorId::Roe,
        IndicatorId::Roic,
        IndicatorId::Roa,
        IndicatorId::GrossMargin,
        IndicatorId::EbitdaMargin,
        IndicatorId::NetMargin,
        IndicatorId::NetDebtToEbitda,
        IndicatorId::DebtToEquity,
        IndicatorId::CurrentRatio,
        IndicatorId::InterestCoverage,
        IndicatorId::RevenueGrowth,
        IndicatorId::EarningsGrowth,
        IndicatorId::FreeCashFlow,
        IndicatorId::Eps,
        IndicatorId::Beta,
        IndicatorId::RdToRevenue,
        IndicatorId::RdEfficiency,
        IndicatorId::RecurringRevenue,
        IndicatorId::SgaToRevenue,
        IndicatorId::CapexToRevenue,
        IndicatorId::AssetTurnover,
        IndicatorId::InventoryTurnover,
        IndicatorId::MarketCap,
        IndicatorId::BaselIndex,
        IndicatorId::NplRatio,
        IndicatorId::EfficiencyRatio,
        IndicatorId::Vacancy,
        IndicatorId::FfoYield,
        IndicatorId::ChurnRate,
    ];

    /// Canonical key (matches the serde representation)
    pub fn key(&self) -> &'static str {
        match self {
            IndicatorId::Pl => "pl",
            IndicatorId::Pvp => "pvp",
            IndicatorId::Psr => "psr",
            IndicatorId::EvEbitda => "evEbitda",
            IndicatorId::EvEbit => "evEbit",
            IndicatorId::Peg => "peg",
            IndicatorId::DividendYield => "dividendYield",
            IndicatorId::PayoutRatio => "payoutRatio",
            IndicatorId::DcfUpside => "dcfUpside",
            IndicatorId::Roe => "roe",
            IndicatorId::Roic => "roic",
            IndicatorId::Roa => "roa",
            IndicatorId::GrossMargin => "grossMargin",
            IndicatorId::EbitdaMargin => "ebitdaMargin",
            IndicatorId::NetMargin => "netMargin",
            IndicatorId::NetDebtToEbitda => "netDebtToEbitda",
            IndicatorId::DebtToEquity => "debtToEquity",
            IndicatorId::CurrentRatio => "currentRatio",
            IndicatorId::InterestCoverage => "interestCoverage",
            IndicatorId::RevenueGrowth => "revenueGrowth",
            IndicatorId::EarningsGrowth => "earningsGrowth",
            IndicatorId::FreeCashFlow => "freeCashFlow",
            IndicatorId::Eps => "eps",
            IndicatorId::Beta => "beta",
            IndicatorId::RdToRevenue => "rdToRevenue",
            IndicatorId::RdEfficiency => "rdEfficiency",
            IndicatorId::RecurringRevenue => "recurringRevenue",
            IndicatorId::SgaToRevenue => "sgaToRevenue",
            IndicatorId::CapexToRevenue => "capexToRevenue",
            IndicatorId::AssetTurnover => "assetTurnover",
            IndicatorId::InventoryTurnover => "inventoryTurnover",
            IndicatorId::MarketCap => "marketCap",
            IndicatorId::BaselIndex => "baselIndex",
            IndicatorId::NplRatio => "nplRatio",
            IndicatorId::EfficiencyRatio => "efficiencyRatio",
            IndicatorId::Vacancy => "vacancy",
            IndicatorId::FfoYield => "ffoYield",
            IndicatorId::ChurnRate => "churnRate",
        }
    }

    /// Default Portuguese label; sector catalogs may override it
    pub fn default_label(&self) -> &'static str {
        match self {
            IndicatorId::Pl => "P/L",
            IndicatorId::Pvp => "P/VP",
            IndicatorId::Psr => "P/Receita (PSR)",
            IndicatorId::EvEbitda => "EV/EBITDA",
            IndicatorId::EvEbit => "EV/EBIT",
            IndicatorId::Peg => "PEG Ratio",
            IndicatorId::DividendYield => "Dividend Yield",
            IndicatorId::PayoutRatio => "Payout",
            IndicatorId::DcfUpside => "Valor Intrínseco (DCF)",
            IndicatorId::Roe => "ROE",
            IndicatorId::Roic => "ROIC",
            IndicatorId::Roa => "ROA",
            IndicatorId::GrossMargin => "Margem Bruta",
            IndicatorId::EbitdaMargin => "Margem EBITDA",
            IndicatorId::NetMargin => "Margem Líquida",
            IndicatorId::NetDebtToEbitda => "Dívida Líquida/EBITDA",
            IndicatorId::DebtToEquity => "Dívida/Patrimônio",
            IndicatorId::CurrentRatio => "Liquidez Corrente",
            IndicatorId::InterestCoverage => "Cobertura de Juros",
            IndicatorId::RevenueGrowth => "Crescimento de Receita",
            IndicatorId::EarningsGrowth => "Crescimento de Lucros",
            IndicatorId::FreeCashFlow => "Fluxo de Caixa Livre",
            IndicatorId::Eps => "LPA",
            IndicatorId::Beta => "Beta",
            IndicatorId::RdToRevenue => "Investimento em P&D",
            IndicatorId::RdEfficiency => "Eficiência de P&D",
            IndicatorId::RecurringRevenue => "Receita Recorrente",
            IndicatorId::SgaToRevenue => "SG&A/Receita",
            IndicatorId::CapexToRevenue => "Capex/Receita",
            IndicatorId::AssetTurnover => "Giro de Ativos",
            IndicatorId::InventoryTurnover => "Giro de Estoque",
            IndicatorId::MarketCap => "Valor de Mercado",
            IndicatorId::BaselIndex => "Índice de Basileia",
            IndicatorId::NplRatio => "Inadimplência",
            IndicatorId::EfficiencyRatio => "Índice de Eficiência",
            IndicatorId::Vacancy => "Vacância",
            IndicatorId::FfoYield => "FFO Yield",
            IndicatorId::ChurnRate => "Churn",
        }
    }

    /// Other common spellings seen in provider exports
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            IndicatorId::Pl => &["P/E", "Preço/Lucro", "Price to Earnings"],
            IndicatorId::Pvp => &["P/B", "Preço/Valor Patrimonial", "Price to Book"],
            IndicatorId::Psr => &["P/S", "P/Receita", "Price to Sales"],
            IndicatorId::Peg => &["PEG"],
            IndicatorId::DividendYield => &["DY"],
            IndicatorId::PayoutRatio => &["Payout Ratio"],
            IndicatorId::DcfUpside => &["DCF", "Fluxo de Caixa Descontado"],
            IndicatorId::NetDebtToEbitda => &["Dívida/EBITDA", "Net Debt/EBITDA"],
            IndicatorId::DebtToEquity => &["Debt/Equity", "Dívida Bruta/Patrimônio"],
            IndicatorId::CurrentRatio => &["Current Ratio"],
            IndicatorId::InterestCoverage => &["Interest Coverage"],
            IndicatorId::RevenueGrowth => &["CAGR Receitas", "Revenue Growth"],
            IndicatorId::EarningsGrowth => &["CAGR Lucros", "Earnings Growth"],
            IndicatorId::FreeCashFlow => &["FCF", "Free Cash Flow"],
            IndicatorId::Eps => &["EPS", "Lucro por Ação"],
            IndicatorId::RdToRevenue => &["P&D/Receita", "R&D/Revenue"],
            IndicatorId::SgaToRevenue => &["SG&A/Revenue"],
            IndicatorId::MarketCap => &["Market Cap"],
            IndicatorId::NplRatio => &["NPL"],
            _ => &[],
        }
    }

    /// Resolve an indicator from its key, default label or a known alias
    pub fn from_name(name: &str) -> Option<Self> {
        let compact = compact_name(name);
        if compact.is_empty() {
            return None;
        }
        IndicatorId::ALL.into_iter().find(|id| {
            compact_name(id.key()) == compact
                || compact_name(id.default_label()) == compact
                || id.aliases().iter().any(|alias| compact_name(alias) == compact)
        })
    }
}

impl fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique_and_match_serde() {
        let mut seen = HashSet::new();
        for id in IndicatorId::ALL {
            assert!(seen.insert(id.key()), "duplicate key {}", id.key());
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.key()));
        }
    }

    #[test]
    fn test_compact_names_do_not_collide() {
        let mut seen = HashSet::new();
        for id in IndicatorId::ALL {
            assert!(seen.insert(compact_name(id.key())));
        }
    }

    #[test]
    fn test_from_name_accepts_keys_labels_and_aliases() {
        assert_eq!(IndicatorId::from_name("roe"), Some(IndicatorId::Roe));
        assert_eq!(IndicatorId::from_name("P/L"), Some(IndicatorId::Pl));
        assert_eq!(IndicatorId::from_name("p/e"), Some(IndicatorId::Pl));
        assert_eq!(
            IndicatorId::from_name("divida liquida / ebitda"),
            Some(IndicatorId::NetDebtToEbitda)
        );
        assert_eq!(
            IndicatorId::from_name("net_debt_to_ebitda"),
            Some(IndicatorId::NetDebtToEbitda)
        );
        assert_eq!(IndicatorId::from_name("FCF"), Some(IndicatorId::FreeCashFlow));
        assert_eq!(IndicatorId::from_name("Made Up Label"), None);
        assert_eq!(IndicatorId::from_name(""), None);
    }
}
