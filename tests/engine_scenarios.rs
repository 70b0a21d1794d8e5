use std::sync::Arc;
use std::thread;

use fundscore::catalog::IndicatorCatalog;
use fundscore::thresholds::{ThresholdRule, ThresholdTable};
use fundscore::{
    evaluate, Engine, EvaluationContext, EvaluationError, IndicatorId, Score, Sector,
};

#[test]
fn technology_roe_above_good_is_good() {
    let result = evaluate(Sector::Technology, "ROE", 20.0, &EvaluationContext::new());
    assert_eq!(result.score, Score::Good);
    assert!(result.explanation.contains("ROE"));
    assert!(!result.informational_only);
}

#[test]
fn technology_pl_above_medium_is_bad() {
    let result = evaluate(Sector::Technology, "P/L", 30.0, &EvaluationContext::new());
    assert_eq!(result.score, Score::Bad);
    assert_eq!(result.weight, 2.0);
}

#[test]
fn improving_delta_adjusted_indicator_is_promoted() {
    // net margin 6 is Bad for technology; it was 4 last year
    let ctx = EvaluationContext::new().with_previous(4.0);
    let result = evaluate(Sector::Technology, "netMargin", 6.0, &ctx);
    assert_eq!(result.score, Score::Medium);
    assert!(result.explanation.contains("subiu"));
}

#[test]
fn weak_liquidity_backed_by_cash_flow_is_relaxed() {
    let ctx = EvaluationContext::new().with_complementary(IndicatorId::FreeCashFlow, 5_000_000.0);
    let result = evaluate(Sector::Technology, "Liquidez Corrente", 0.4, &ctx);
    assert_eq!(result.score, Score::Medium);
    assert_eq!(result.adjustments.len(), 1);

    // without cash flow it stays Bad
    let result = evaluate(Sector::Technology, "Liquidez Corrente", 0.4, &EvaluationContext::new());
    assert_eq!(result.score, Score::Bad);
}

#[test]
fn unknown_label_gets_fail_safe_result() {
    let result = evaluate(Sector::Technology, "Made Up Label", 42.0, &EvaluationContext::new());
    assert_eq!(result.score, Score::Bad);
    assert_eq!(result.weight, 1.0);
    assert!(!result.informational_only);
    assert!(!result.explanation.is_empty());

    let err = Engine::global()
        .try_evaluate(Sector::Technology, "Made Up Label", 42.0, &EvaluationContext::new())
        .unwrap_err();
    assert!(matches!(err, EvaluationError::ConfigurationMissing { .. }));
}

#[test]
fn nan_is_bad_for_every_sector_and_indicator() {
    let engine = Engine::global();
    let ctx = EvaluationContext::new()
        .with_previous(1.0)
        .with_complementary(IndicatorId::FreeCashFlow, 1_000.0)
        .with_complementary(IndicatorId::Peg, 0.5)
        .with_complementary(IndicatorId::RecurringRevenue, 90.0);

    for sector in Sector::ALL {
        for meta in engine.catalog().indicators(sector) {
            let result = engine.evaluate(sector, meta.key.key(), f64::NAN, &ctx);
            assert_eq!(result.score, Score::Bad, "{} / {}", sector, meta.key);
            assert!(!result.explanation.is_empty());
        }
    }
}

#[test]
fn every_catalog_label_resolves_to_its_entry() {
    let engine = Engine::global();
    for sector in Sector::ALL {
        for meta in engine.catalog().indicators(sector) {
            let by_label = engine
                .try_evaluate(sector, meta.label, 1.0, &EvaluationContext::new())
                .unwrap_or_else(|e| panic!("{}: {}", meta.label, e));
            assert_eq!(by_label.weight, meta.weight);
            assert_eq!(by_label.informational_only, meta.informational_only);
        }
    }
}

#[test]
fn evaluation_is_deterministic() {
    let ctx = EvaluationContext::new()
        .with_previous(12.0)
        .with_complementary(IndicatorId::DebtToEquity, 2.5);
    let first = evaluate(Sector::Industrials, "roe", 16.0, &ctx);
    for _ in 0..10 {
        assert_eq!(evaluate(Sector::Industrials, "roe", 16.0, &ctx), first);
    }
}

#[test]
fn missing_threshold_with_metadata_stays_bad() {
    let mut catalog = IndicatorCatalog::new();
    catalog.insert(
        Sector::Energy,
        fundscore::catalog::IndicatorMeta::new(IndicatorId::Roe)
            .complementary(&[IndicatorId::DebtToEquity]),
    );
    let engine = Engine::new(ThresholdTable::new(), catalog, Vec::new(), Vec::new());
    let result = engine
        .try_evaluate(Sector::Energy, "roe", 50.0, &EvaluationContext::new())
        .unwrap();
    assert_eq!(result.score, Score::Bad);
    assert!(result.explanation.contains("ROE"));
}

#[test]
fn custom_engine_uses_its_own_tables() {
    let mut thresholds = ThresholdTable::defaults();
    thresholds.insert(
        Sector::Healthcare,
        IndicatorId::Roe,
        ThresholdRule::higher_is_better(30.0, 20.0),
    );
    let engine = Engine::new(
        thresholds,
        IndicatorCatalog::defaults(),
        Vec::new(),
        Vec::new(),
    );
    let result = engine.evaluate(Sector::Healthcare, "roe", 25.0, &EvaluationContext::new());
    assert_eq!(result.score, Score::Medium);

    // the shared engine is untouched
    let result = evaluate(Sector::Healthcare, "roe", 25.0, &EvaluationContext::new());
    assert_eq!(result.score, Score::Good);
}

#[test]
fn engine_is_shared_across_threads() {
    let engine = Arc::new(Engine::with_defaults());
    let handles: Vec<_> = Sector::ALL
        .into_iter()
        .map(|sector| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                engine
                    .evaluate(sector, "pl", 5.0, &EvaluationContext::new())
                    .score
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Score::Good);
    }
}

#[test]
fn bank_roe_ignores_leverage() {
    // banks read ROE against ROA, so high debt/equity does not demote it
    let ctx = EvaluationContext::new()
        .with_complementary(IndicatorId::DebtToEquity, 8.0)
        .with_complementary(IndicatorId::Roa, 1.8);
    let bank = evaluate(Sector::FinancialServices, "roe", 20.0, &ctx);
    assert_eq!(bank.score, Score::Good);
    assert!(bank.adjustments.is_empty());

    let roe = Engine::global()
        .catalog()
        .get(Sector::FinancialServices, IndicatorId::Roe)
        .unwrap();
    assert_eq!(roe.complementary, vec![IndicatorId::Roa]);

    // elsewhere the same leverage demotes a Good ROE
    let industrial = evaluate(Sector::Industrials, "roe", 20.0, &ctx);
    assert_eq!(industrial.score, Score::Medium);
    assert_eq!(industrial.adjustments[0].rule, "leverage_inflates_roe");
}

#[test]
fn industrial_ev_ebit_is_scored() {
    let result = evaluate(Sector::Industrials, "EV/EBIT", 9.0, &EvaluationContext::new());
    assert_eq!(result.score, Score::Good);
    let result = evaluate(Sector::Industrials, "evEbit", 18.0, &EvaluationContext::new());
    assert_eq!(result.score, Score::Bad);
}
