//! Explanation text for evaluated indicators

use itertools::Itertools;

use crate::catalog::{Explanation, IndicatorMeta};
use crate::scoring::Score;
use crate::sector::Sector;
use crate::thresholds::ThresholdRule;
use crate::utils::format_number;

/// Everything an explanation may refer to
#[derive(Debug, Clone, Copy)]
pub struct ExplanationContext<'a> {
    pub sector: Sector,
    pub meta: &'a IndicatorMeta,
    pub value: f64,
    pub previous: Option<f64>,
    pub score: Score,
    pub rule: Option<&'a ThresholdRule>,
}

/// Build the explanation for an evaluation.
///
/// Custom text or a custom function wins; `Auto` composes the score
/// sentence with optional trend, sector and "see also" sentences; anything
/// else falls back to the generic benchmark sentence.
pub fn build_explanation(ctx: &ExplanationContext<'_>) -> String {
    match ctx.meta.explanation {
        Explanation::Text(text) => text.to_string(),
        Explanation::Dynamic(render) => render(ctx),
        Explanation::Auto => compose(ctx),
        Explanation::Generic => generic(ctx),
    }
}

fn compose(ctx: &ExplanationContext<'_>) -> String {
    let mut sentences = vec![score_sentence(ctx)];

    if ctx.meta.delta_adjusted {
        if let Some(previous) = ctx.previous.filter(|p| !p.is_nan()) {
            sentences.push(trend_sentence(ctx.value, previous));
        }
    }

    if ctx.meta.sector_sensitive {
        sentences.push(format!(
            "Este indicador varia bastante entre setores; compare apenas com empresas de {}.",
            ctx.sector.display_name()
        ));
    }

    if !ctx.meta.complementary.is_empty() {
        let related = ctx
            .meta
            .complementary
            .iter()
            .map(|id| id.default_label())
            .join(", ");
        sentences.push(format!("Veja também: {}.", related));
    }

    sentences.join(" ")
}

fn score_sentence(ctx: &ExplanationContext<'_>) -> String {
    let level = match ctx.score {
        Score::Good => "bom",
        Score::Medium => "intermediário",
        Score::Bad => "ruim",
    };
    let mut sentence = format!(
        "{} de {} está em um nível {} para o setor {}",
        ctx.meta.label,
        format_number(ctx.value),
        level,
        ctx.sector.display_name()
    );
    if let Some(rule) = ctx.rule {
        sentence.push_str(&format!(" ({})", rule.describe()));
    }
    sentence.push('.');
    sentence
}

fn trend_sentence(value: f64, previous: f64) -> String {
    let direction = if value > previous {
        "subiu"
    } else if value < previous {
        "caiu"
    } else {
        "ficou estável"
    };
    format!(
        "Em relação ao ano anterior ({}), o indicador {}.",
        format_number(previous),
        direction
    )
}

fn generic(ctx: &ExplanationContext<'_>) -> String {
    format!(
        "Benchmark definido para o indicador {} no setor {}.",
        ctx.meta.label,
        ctx.sector.display_name()
    )
}
