//! Built-in indicator catalog
//!
//! Entries are built from the shared constructors below and listed per
//! sector in display order.

use super::{Explanation, IndicatorMeta};
use crate::explain::ExplanationContext;
use crate::indicator::IndicatorId::*;
use crate::sector::Sector;
use crate::utils::format_number;

fn pl() -> IndicatorMeta {
    IndicatorMeta::new(Pl)
        .weight(2.0)
        .sector_sensitive()
        .complementary(&[Peg, EarningsGrowth])
}

fn pvp() -> IndicatorMeta {
    IndicatorMeta::new(Pvp).sector_sensitive()
}

fn psr() -> IndicatorMeta {
    IndicatorMeta::new(Psr).complementary(&[RevenueGrowth])
}

fn ev_ebitda() -> IndicatorMeta {
    IndicatorMeta::new(EvEbitda).sector_sensitive()
}

fn ev_ebit() -> IndicatorMeta {
    IndicatorMeta::new(EvEbit).sector_sensitive()
}

fn peg() -> IndicatorMeta {
    IndicatorMeta::new(Peg).explanation(Explanation::Text(
        "Relaciona o P/L ao crescimento esperado dos lucros. Abaixo de 1, o preço ainda não reflete o crescimento.",
    ))
}

fn dividend_yield() -> IndicatorMeta {
    IndicatorMeta::new(DividendYield)
}

fn payout() -> IndicatorMeta {
    IndicatorMeta::new(PayoutRatio).complementary(&[Eps])
}

fn dcf() -> IndicatorMeta {
    IndicatorMeta::new(DcfUpside).explanation(Explanation::Text(
        "Compara o valor intrínseco estimado por fluxo de caixa descontado com a cotação atual.",
    ))
}

fn roe() -> IndicatorMeta {
    IndicatorMeta::new(Roe)
        .weight(2.0)
        .delta_adjusted()
        .complementary(&[DebtToEquity, Roic])
}

fn roic() -> IndicatorMeta {
    IndicatorMeta::new(Roic).weight(2.0).delta_adjusted()
}

fn roa() -> IndicatorMeta {
    IndicatorMeta::new(Roa).delta_adjusted()
}

fn gross_margin() -> IndicatorMeta {
    IndicatorMeta::new(GrossMargin).delta_adjusted().sector_sensitive()
}

fn ebitda_margin() -> IndicatorMeta {
    IndicatorMeta::new(EbitdaMargin)
        .delta_adjusted()
        .sector_sensitive()
        .complementary(&[SgaToRevenue])
}

fn net_margin() -> IndicatorMeta {
    IndicatorMeta::new(NetMargin).delta_adjusted()
}

fn net_debt_to_ebitda() -> IndicatorMeta {
    IndicatorMeta::new(NetDebtToEbitda)
        .weight(2.0)
        .sector_sensitive()
        .complementary(&[FreeCashFlow, InterestCoverage])
}

fn debt_to_equity() -> IndicatorMeta {
    IndicatorMeta::new(DebtToEquity)
}

fn current_ratio() -> IndicatorMeta {
    IndicatorMeta::new(CurrentRatio).complementary(&[FreeCashFlow])
}

fn interest_coverage() -> IndicatorMeta {
    IndicatorMeta::new(InterestCoverage)
}

fn revenue_growth() -> IndicatorMeta {
    IndicatorMeta::new(RevenueGrowth).delta_adjusted()
}

fn earnings_growth() -> IndicatorMeta {
    IndicatorMeta::new(EarningsGrowth).delta_adjusted()
}

fn free_cash_flow() -> IndicatorMeta {
    IndicatorMeta::new(FreeCashFlow).explanation(Explanation::Dynamic(free_cash_flow_text))
}

fn eps() -> IndicatorMeta {
    IndicatorMeta::new(Eps).informational()
}

fn beta() -> IndicatorMeta {
    IndicatorMeta::new(Beta)
        .complementary(&[RecurringRevenue])
        .explanation(Explanation::Dynamic(beta_text))
}

fn rd_to_revenue() -> IndicatorMeta {
    IndicatorMeta::new(RdToRevenue)
        .delta_adjusted()
        .complementary(&[RdEfficiency])
}

fn rd_efficiency() -> IndicatorMeta {
    IndicatorMeta::new(RdEfficiency)
        .informational()
        .explanation(Explanation::Text(
            "Crescimento de receita obtido por ponto percentual investido em P&D.",
        ))
}

fn recurring_revenue() -> IndicatorMeta {
    IndicatorMeta::new(RecurringRevenue).label("Receita Recorrente (%)")
}

fn sga_to_revenue() -> IndicatorMeta {
    IndicatorMeta::new(SgaToRevenue)
}

fn capex_to_revenue() -> IndicatorMeta {
    IndicatorMeta::new(CapexToRevenue).sector_sensitive()
}

fn asset_turnover() -> IndicatorMeta {
    IndicatorMeta::new(AssetTurnover).explanation(Explanation::Generic)
}

fn inventory_turnover() -> IndicatorMeta {
    IndicatorMeta::new(InventoryTurnover).explanation(Explanation::Generic)
}

fn market_cap() -> IndicatorMeta {
    IndicatorMeta::new(MarketCap)
        .informational()
        .explanation(Explanation::Generic)
}

fn free_cash_flow_text(ctx: &ExplanationContext<'_>) -> String {
    if ctx.value.is_nan() {
        "Fluxo de caixa livre indisponível.".to_string()
    } else if ctx.value > 0.0 {
        "A empresa gera caixa livre após investimentos, o que sustenta dividendos e redução de dívida."
            .to_string()
    } else {
        "A empresa consome caixa após investimentos e depende de dívida ou capital novo.".to_string()
    }
}

fn beta_text(ctx: &ExplanationContext<'_>) -> String {
    if ctx.value.is_nan() {
        return "Beta indisponível.".to_string();
    }
    let movement = if ctx.value < 1.0 {
        "oscilou menos que o mercado"
    } else if ctx.value > 1.0 {
        "oscilou mais que o mercado"
    } else {
        "acompanhou o mercado"
    };
    format!("Beta de {}: a ação {}.", format_number(ctx.value), movement)
}

fn healthcare() -> Vec<IndicatorMeta> {
    vec![
        pl(),
        pvp(),
        psr(),
        ev_ebitda(),
        peg(),
        dividend_yield(),
        payout(),
        dcf(),
        roe(),
        roic(),
        gross_margin(),
        ebitda_margin(),
        net_margin(),
        net_debt_to_ebitda(),
        debt_to_equity(),
        current_ratio(),
        interest_coverage(),
        revenue_growth(),
        earnings_growth(),
        free_cash_flow(),
        rd_to_revenue(),
        rd_efficiency(),
        sga_to_revenue(),
        beta(),
        eps(),
        market_cap(),
    ]
}

fn technology() -> Vec<IndicatorMeta> {
    vec![
        pl(),
        pvp(),
        psr(),
        ev_ebitda(),
        peg(),
        dividend_yield(),
        dcf(),
        roe(),
        roic(),
        gross_margin(),
        ebitda_margin(),
        net_margin(),
        net_debt_to_ebitda(),
        debt_to_equity(),
        current_ratio(),
        revenue_growth(),
        earnings_growth(),
        free_cash_flow(),
        rd_to_revenue().weight(2.0),
        rd_efficiency(),
        recurring_revenue(),
        sga_to_revenue(),
        capex_to_revenue(),
        beta(),
        eps(),
        market_cap(),
    ]
}

fn utilities() -> Vec<IndicatorMeta> {
    vec![
        pl(),
        pvp(),
        ev_ebitda(),
        dividend_yield().weight(2.0),
        payout(),
        dcf(),
        roe(),
        roic(),
        ebitda_margin(),
        net_margin(),
        net_debt_to_ebitda(),
        debt_to_equity(),
        current_ratio(),
        interest_coverage(),
        capex_to_revenue(),
        revenue_growth(),
        free_cash_flow(),
        beta(),
        eps(),
        market_cap(),
    ]
}

fn real_estate() -> Vec<IndicatorMeta> {
    vec![
        pvp().weight(2.0),
        pl(),
        dividend_yield().weight(2.0),
        IndicatorMeta::new(FfoYield).sector_sensitive(),
        IndicatorMeta::new(Vacancy).weight(2.0).explanation(Explanation::Text(
            "Percentual da área bruta locável sem inquilino. Vacância alta pressiona receitas e distribuições.",
        )),
        payout(),
        roe(),
        net_margin(),
        net_debt_to_ebitda(),
        debt_to_equity(),
        current_ratio(),
        revenue_growth(),
        free_cash_flow(),
        beta(),
        eps(),
        market_cap(),
    ]
}

fn industrials() -> Vec<IndicatorMeta> {
    vec![
        pl(),
        pvp(),
        ev_ebitda(),
        ev_ebit(),
        peg(),
        dividend_yield(),
        payout(),
        dcf(),
        roe(),
        roic(),
        ebitda_margin(),
        net_margin(),
        net_debt_to_ebitda(),
        debt_to_equity(),
        current_ratio(),
        interest_coverage(),
        asset_turnover(),
        revenue_growth(),
        earnings_growth(),
        free_cash_flow(),
        sga_to_revenue(),
        beta(),
        eps(),
        market_cap(),
    ]
}

fn energy() -> Vec<IndicatorMeta> {
    vec![
        pl(),
        pvp(),
        ev_ebitda(),
        dividend_yield(),
        payout(),
        dcf(),
        roe(),
        roic(),
        ebitda_margin(),
        net_margin(),
        net_debt_to_ebitda(),
        debt_to_equity(),
        current_ratio(),
        interest_coverage(),
        capex_to_revenue(),
        free_cash_flow(),
        revenue_growth(),
        beta(),
        eps(),
        market_cap(),
    ]
}

fn consumer_defensive() -> Vec<IndicatorMeta> {
    vec![
        pl(),
        pvp(),
        ev_ebitda(),
        peg(),
        dividend_yield(),
        payout(),
        roe(),
        roic(),
        gross_margin(),
        ebitda_margin(),
        net_margin(),
        net_debt_to_ebitda(),
        debt_to_equity(),
        current_ratio(),
        inventory_turnover(),
        revenue_growth(),
        earnings_growth(),
        sga_to_revenue(),
        free_cash_flow(),
        beta(),
        eps(),
        market_cap(),
    ]
}

fn financial_services() -> Vec<IndicatorMeta> {
    vec![
        pl(),
        pvp().weight(2.0),
        dividend_yield(),
        payout(),
        // leverage is the business model, so ROE is read against ROA instead
        roe().complementary(&[Roa]),
        roa(),
        IndicatorMeta::new(BaselIndex).weight(2.0).explanation(Explanation::Text(
            "Capital próprio em relação aos ativos ponderados pelo risco. O mínimo regulatório no Brasil é 11%.",
        )),
        IndicatorMeta::new(NplRatio).label("Inadimplência (90 dias)"),
        IndicatorMeta::new(EfficiencyRatio).sector_sensitive(),
        earnings_growth(),
        beta(),
        eps(),
        market_cap(),
    ]
}

fn consumer_cyclical() -> Vec<IndicatorMeta> {
    vec![
        pl(),
        pvp(),
        psr(),
        ev_ebitda(),
        peg(),
        dividend_yield(),
        roe(),
        roic(),
        gross_margin(),
        ebitda_margin(),
        net_margin(),
        net_debt_to_ebitda(),
        debt_to_equity(),
        current_ratio(),
        inventory_turnover(),
        revenue_growth(),
        earnings_growth(),
        sga_to_revenue(),
        free_cash_flow(),
        beta(),
        eps(),
        market_cap(),
    ]
}

fn communication_services() -> Vec<IndicatorMeta> {
    vec![
        pl(),
        pvp(),
        psr(),
        ev_ebitda(),
        dividend_yield(),
        payout(),
        roe(),
        roic(),
        ebitda_margin(),
        net_margin(),
        net_debt_to_ebitda(),
        IndicatorMeta::new(ChurnRate).label("Churn Mensal"),
        recurring_revenue(),
        capex_to_revenue(),
        current_ratio(),
        free_cash_flow(),
        revenue_growth(),
        beta(),
        eps(),
        market_cap(),
    ]
}

fn basic_materials() -> Vec<IndicatorMeta> {
    vec![
        pl(),
        pvp(),
        ev_ebitda(),
        dividend_yield(),
        payout(),
        dcf(),
        roe(),
        roic(),
        ebitda_margin(),
        net_margin(),
        net_debt_to_ebitda(),
        debt_to_equity(),
        current_ratio(),
        interest_coverage(),
        capex_to_revenue(),
        free_cash_flow(),
        revenue_growth(),
        beta(),
        eps(),
        market_cap(),
    ]
}

pub(super) fn indicators_for(sector: Sector) -> Vec<IndicatorMeta> {
    match sector {
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
    }
}
