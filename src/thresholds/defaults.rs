//! Built-in threshold tables
//!
//! Percent-type indicators (returns, margins, growth, yield, payout,
//! recurring revenue, SG&A, capex, vacancy, churn, NPL, Basel) are whole-number
//! percentages in every sector: `15.0` means 15%. Multiples and coverage
//! ratios are plain ratios.

use super::ThresholdRule;
use crate::indicator::IndicatorId::{self, *};
use crate::sector::Sector;

fn hi(good: f64, medium: f64) -> ThresholdRule {
    ThresholdRule::higher_is_better(good, medium)
}

fn lo(good: f64, medium: f64) -> ThresholdRule {
    ThresholdRule::lower_is_better(good, medium)
}

/// Rules shared by every sector; sector tables override them by key.
fn common() -> Vec<(IndicatorId, ThresholdRule)> {
    vec![
        (Peg, lo(1.0, 2.0)),
        (Beta, lo(0.8, 1.3).with_neutral_range(0.9, 1.1)),
        (DcfUpside, ThresholdRule::custom("dcf_above_price")),
        (CurrentRatio, hi(1.5, 1.0)),
        (InterestCoverage, hi(5.0, 2.0)),
        (FreeCashFlow, ThresholdRule::band(Some(0.0), None)),
        (Eps, ThresholdRule::band(Some(0.0), None)),
        (PayoutRatio, hi(40.0, 25.0)),
        (DividendYield, hi(6.0, 4.0)),
        (RevenueGrowth, hi(10.0, 5.0)),
        (EarningsGrowth, hi(10.0, 5.0)),
        (RdEfficiency, hi(1.5, 1.0)),
        (RecurringRevenue, hi(70.0, 40.0)),
        (SgaToRevenue, lo(20.0, 30.0)),
    ]
}

fn healthcare() -> Vec<(IndicatorId, ThresholdRule)> {
    vec![
        (Pl, lo(20.0, 30.0)),
        (Pvp, lo(4.0, 6.0)),
        (Psr, lo(3.0, 5.0)),
        (EvEbitda, lo(14.0, 20.0)),
        (Roe, hi(15.0, 8.0)),
        (Roic, hi(12.0, 8.0)),
        (GrossMargin, hi(40.0, 25.0)),
        (EbitdaMargin, hi(20.0, 12.0)),
        (NetMargin, hi(10.0, 5.0)),
        (NetDebtToEbitda, lo(2.0, 3.0)),
        (DebtToEquity, lo(0.8, 1.5)),
        (RevenueGrowth, hi(12.0, 6.0)),
        (RdToRevenue, hi(8.0, 4.0)),
        (DividendYield, hi(3.0, 1.5)),
    ]
}

fn technology() -> Vec<(IndicatorId, ThresholdRule)> {
    vec![
        (Pl, lo(15.0, 25.0)),
        (Pvp, lo(3.0, 6.0)),
        (Psr, lo(3.0, 6.0)),
        (EvEbitda, lo(12.0, 20.0)),
        (Roe, hi(18.0, 10.0)),
        (Roic, hi(15.0, 10.0)),
        (GrossMargin, hi(50.0, 35.0)),
        (EbitdaMargin, hi(25.0, 15.0)),
        (NetMargin, hi(15.0, 8.0)),
        (NetDebtToEbitda, lo(1.0, 2.5)),
        (DebtToEquity, lo(0.5, 1.0)),
        (RevenueGrowth, hi(20.0, 10.0)),
        (RdToRevenue, hi(10.0, 5.0)),
        (CapexToRevenue, lo(5.0, 10.0)),
        (DividendYield, hi(2.0, 1.0)),
    ]
}

fn utilities() -> Vec<(IndicatorId, ThresholdRule)> {
    vec![
        (Pl, lo(10.0, 15.0)),
        (Pvp, lo(1.5, 2.5)),
        (EvEbitda, lo(7.0, 10.0)),
        (Roe, hi(12.0, 8.0)),
        (Roic, hi(8.0, 5.0)),
        (EbitdaMargin, hi(35.0, 25.0)),
        (NetMargin, hi(12.0, 7.0)),
        (NetDebtToEbitda, lo(3.0, 4.0)),
        (DebtToEquity, lo(1.2, 2.0)),
        (CurrentRatio, hi(1.0, 0.7)),
        (CapexToRevenue, lo(20.0, 35.0)),
        (RevenueGrowth, hi(6.0, 3.0)),
        (PayoutRatio, hi(50.0, 35.0)),
    ]
}

fn real_estate() -> Vec<(IndicatorId, ThresholdRule)> {
    vec![
        (Pl, lo(12.0, 20.0)),
        (Pvp, lo(1.0, 1.5)),
        (DividendYield, hi(8.0, 6.0)),
        (Vacancy, ThresholdRule::ceiling(Some(5.0), Some(12.0))),
        (FfoYield, hi(8.0, 5.0)),
        (Roe, hi(10.0, 6.0)),
        (NetMargin, hi(20.0, 10.0)),
        (NetDebtToEbitda, lo(3.0, 5.0)),
        (DebtToEquity, lo(0.6, 1.0)),
        (PayoutRatio, hi(70.0, 50.0)),
    ]
}

fn industrials() -> Vec<(IndicatorId, ThresholdRule)> {
    vec![
        (Pl, lo(12.0, 20.0)),
        (Pvp, lo(2.0, 3.5)),
        (EvEbitda, lo(8.0, 12.0)),
        (EvEbit, lo(10.0, 15.0)),
        (Roe, hi(15.0, 10.0)),
        (Roic, hi(12.0, 8.0)),
        (EbitdaMargin, hi(18.0, 10.0)),
        (NetMargin, hi(10.0, 5.0)),
        (NetDebtToEbitda, lo(1.5, 3.0)),
        (DebtToEquity, lo(0.8, 1.5)),
        (AssetTurnover, hi(1.0, 0.6)),
        (DividendYield, hi(4.0, 2.0)),
    ]
}

fn energy() -> Vec<(IndicatorId, ThresholdRule)> {
    vec![
        (Pl, lo(8.0, 14.0)),
        (Pvp, lo(1.2, 2.0)),
        (EvEbitda, lo(5.0, 8.0)),
        (Roe, hi(15.0, 8.0)),
        (Roic, hi(12.0, 7.0)),
        (EbitdaMargin, hi(35.0, 20.0)),
        (NetMargin, hi(15.0, 8.0)),
        (NetDebtToEbitda, lo(1.5, 2.5)),
        (DebtToEquity, lo(0.7, 1.2)),
        (CapexToRevenue, lo(15.0, 25.0)),
        (DividendYield, hi(8.0, 5.0)),
    ]
}

fn consumer_defensive() -> Vec<(IndicatorId, ThresholdRule)> {
    vec![
        (Pl, lo(15.0, 22.0)),
        (Pvp, lo(3.0, 5.0)),
        (EvEbitda, lo(10.0, 14.0)),
        (Roe, hi(15.0, 10.0)),
        (Roic, hi(12.0, 8.0)),
        (GrossMargin, hi(35.0, 25.0)),
        (EbitdaMargin, hi(15.0, 10.0)),
        (NetMargin, hi(8.0, 4.0)),
        (NetDebtToEbitda, lo(2.0, 3.0)),
        (DebtToEquity, lo(0.8, 1.5)),
        (InventoryTurnover, hi(8.0, 5.0)),
        (DividendYield, hi(4.0, 2.5)),
        (RevenueGrowth, hi(8.0, 4.0)),
    ]
}

fn financial_services() -> Vec<(IndicatorId, ThresholdRule)> {
    vec![
        (Pl, lo(8.0, 12.0)),
        (Pvp, lo(1.5, 2.5)),
        (Roe, hi(15.0, 10.0)),
        (Roa, hi(1.5, 1.0)),
        (BaselIndex, ThresholdRule::band(Some(11.0), None)),
        (NplRatio, lo(3.0, 5.0)),
        (EfficiencyRatio, lo(40.0, 55.0)),
    ]
}

fn consumer_cyclical() -> Vec<(IndicatorId, ThresholdRule)> {
    vec![
        (Pl, lo(12.0, 20.0)),
        (Pvp, lo(2.0, 4.0)),
        (Psr, lo(1.0, 2.0)),
        (EvEbitda, lo(8.0, 12.0)),
        (Roe, hi(15.0, 8.0)),
        (Roic, hi(12.0, 7.0)),
        (GrossMargin, hi(40.0, 28.0)),
        (EbitdaMargin, hi(15.0, 8.0)),
        (NetMargin, hi(8.0, 3.0)),
        (NetDebtToEbitda, lo(1.5, 3.0)),
        (DebtToEquity, lo(0.8, 1.5)),
        (InventoryTurnover, hi(6.0, 4.0)),
        (RevenueGrowth, hi(15.0, 7.0)),
        (SgaToRevenue, lo(25.0, 35.0)),
    ]
}

fn communication_services() -> Vec<(IndicatorId, ThresholdRule)> {
    vec![
        (Pl, lo(15.0, 25.0)),
        (Pvp, lo(2.5, 4.0)),
        (Psr, lo(2.0, 4.0)),
        (EvEbitda, lo(6.0, 9.0)),
        (Roe, hi(12.0, 8.0)),
        (Roic, hi(10.0, 6.0)),
        (EbitdaMargin, hi(35.0, 25.0)),
        (NetMargin, hi(10.0, 5.0)),
        (NetDebtToEbitda, lo(2.0, 3.0)),
        (ChurnRate, lo(1.5, 3.0)),
        (RecurringRevenue, hi(80.0, 60.0)),
        (CapexToRevenue, lo(15.0, 22.0)),
        (DividendYield, hi(5.0, 3.0)),
    ]
}

fn basic_materials() -> Vec<(IndicatorId, ThresholdRule)> {
    vec![
        (Pl, lo(8.0, 14.0)),
        (Pvp, lo(1.5, 2.5)),
        (EvEbitda, lo(5.0, 8.0)),
        (Roe, hi(15.0, 8.0)),
        (Roic, hi(12.0, 7.0)),
        (EbitdaMargin, hi(30.0, 18.0)),
        (NetMargin, hi(12.0, 6.0)),
        (NetDebtToEbitda, lo(1.5, 2.5)),
        (DebtToEquity, lo(0.7, 1.2)),
        (CapexToRevenue, lo(12.0, 20.0)),
        (DividendYield, hi(7.0, 4.0)),
    ]
}

/// Full rule list for a sector: common rules first, sector rules after so
/// they take precedence when inserted in order.
pub(super) fn rules_for(sector: Sector) -> Vec<(IndicatorId, ThresholdRule)> {
    let specific = match sector {
        Sector::Healthcare => healthcare(),
        Sector::Technology => technology(),
        Sector::Utilities => utilities(),
        Sector::RealEstate => real_estate(),
        Sector::Industrials => industrials(),
        Sector::Energy => energy(),
        Sector::ConsumerDefensive => consumer_defensive(),
        Sector::FinancialServices => financial_services(),
        Sector::ConsumerCyclical => consumer_cyclical(),
        Sector::CommunicationServices => communication_services(),
        Sector::BasicMaterials => basic_materials(),
    };
    let mut rules = common();
    rules.extend(specific);
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_rules_override_common_ones() {
        let rules = rules_for(Sector::Utilities);
        let last_payout = rules
            .iter()
            .rev()
            .find(|(id, _)| *id == PayoutRatio)
            .map(|(_, rule)| rule.clone());
        assert_eq!(last_payout, Some(hi(50.0, 35.0)));
    }

    #[test]
    fn test_no_duplicate_keys_within_a_sector_table() {
        let tables = [
            healthcare(),
            technology(),
            utilities(),
            real_estate(),
            industrials(),
            energy(),
            consumer_defensive(),
            financial_services(),
            consumer_cyclical(),
            communication_services(),
            basic_materials(),
        ];
        for table in tables {
            let mut keys: Vec<_> = table.iter().map(|(id, _)| *id).collect();
            let before = keys.len();
            keys.sort();
            keys.dedup();
            assert_eq!(before, keys.len());
        }
    }
}
