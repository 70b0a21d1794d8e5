//! Output formatting for CLI display
//!
//! Keeps presentation apart from evaluation: every function takes engine
//! output and returns the text to print, either as a table or as JSON.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use fundscore::report::SectorReport;
use fundscore::utils::format_number;
use fundscore::{Engine, EvaluationResult, Sector};

fn to_json<T: Serialize>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(json) => format!("{}\n", json),
        Err(e) => format!("{{\"error\": \"JSON serialization failed: {}\"}}\n", e),
    }
}

/// Format the closed sector list
pub fn format_sectors(json: bool) -> String {
    #[derive(Serialize, Tabled)]
    struct SectorRow {
        #[tabled(rename = "Key")]
        key: &'static str,
        #[tabled(rename = "Name")]
        name: &'static str,
        #[tabled(rename = "Nome")]
        display_name: &'static str,
    }

    let rows: Vec<SectorRow> = Sector::ALL
        .iter()
        .map(|s| SectorRow {
            key: s.as_str(),
            name: s.english_name(),
            display_name: s.display_name(),
        })
        .collect();

    if json {
        return to_json(&rows);
    }

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format the catalog and benchmarks of a sector
pub fn format_indicators(engine: &Engine, sector: Sector, json: bool) -> String {
    #[derive(Serialize, Tabled)]
    struct IndicatorRow {
        #[tabled(rename = "Key")]
        key: &'static str,
        #[tabled(rename = "Label")]
        label: &'static str,
        #[tabled(rename = "Weight")]
        weight: f64,
        #[tabled(rename = "Benchmark")]
        benchmark: String,
        #[tabled(rename = "Flags")]
        flags: String,
    }

    let rows: Vec<IndicatorRow> = engine
        .catalog()
        .indicators(sector)
        .iter()
        .map(|meta| {
            let mut flags = Vec::new();
            if meta.delta_adjusted {
                flags.push("delta");
            }
            if meta.sector_sensitive {
                flags.push("sector");
            }
            if meta.informational_only {
                flags.push("info");
            }
            IndicatorRow {
                key: meta.key.key(),
                label: meta.label,
                weight: meta.weight,
                benchmark: engine
                    .thresholds()
                    .resolve(sector, meta.key)
                    .map(|rule| rule.describe())
                    .unwrap_or_else(|| "-".to_string()),
                flags: flags.join(","),
            }
        })
        .collect();

    if json {
        return to_json(&rows);
    }

    let mut output = format!(
        "\n{} {} ({})\n\n",
        "Indicadores".bold(),
        sector.display_name(),
        sector.as_str()
    );
    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(2..3), Alignment::right());
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

/// Format a single evaluation
pub fn format_evaluation(
    sector: Sector,
    label: &str,
    value: f64,
    result: &EvaluationResult,
    json: bool,
) -> String {
    if json {
        #[derive(Serialize)]
        struct JsonEvaluation<'a> {
            sector: Sector,
            indicator: &'a str,
            value: Option<f64>,
            #[serde(flatten)]
            result: &'a EvaluationResult,
        }
        // JSON has no NaN
        let value = (!value.is_nan()).then_some(value);
        return to_json(&JsonEvaluation {
            sector,
            indicator: label,
            value,
            result,
        });
    }

    let mut output = format!(
        "{} {} = {} → {}\n",
        label.bold(),
        sector.display_name(),
        format_number(value),
        result.score.as_str().to_uppercase()
    );
    output.push_str(&format!("  Peso: {}", format_number(result.weight)));
    if result.informational_only {
        output.push_str(" (informativo)");
    }
    output.push('\n');
    for adjustment in &result.adjustments {
        output.push_str(&format!(
            "  Ajuste: {} ({} → {})\n",
            adjustment.rule, adjustment.from, adjustment.to
        ));
    }
    output.push_str(&format!("  {}\n", result.explanation));
    output
}

/// Format a full sector report
pub fn format_report(report: &SectorReport, json: bool) -> String {
    if json {
        return to_json(report);
    }

    #[derive(Tabled)]
    struct ReportTableRow {
        #[tabled(rename = "Indicador")]
        label: &'static str,
        #[tabled(rename = "Valor")]
        value: String,
        #[tabled(rename = "Anterior")]
        previous: String,
        #[tabled(rename = "Score")]
        score: String,
        #[tabled(rename = "Peso")]
        weight: String,
    }

    let rows: Vec<ReportTableRow> = report
        .scored_rows()
        .map(|row| ReportTableRow {
            label: row.label,
            value: format_number(row.value),
            previous: row
                .previous
                .map(format_number)
                .unwrap_or_else(|| "-".to_string()),
            score: row.result.score.as_str().to_string(),
            weight: format_number(row.result.weight),
        })
        .collect();

    let title = match &report.ticker {
        Some(ticker) => format!("{} - {}", ticker, report.sector.display_name()),
        None => report.sector.display_name().to_string(),
    };
    let mut output = format!("\n{} {}\n\n", "Relatório".bold(), title);

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(1..3), Alignment::right());
    output.push_str(&table.to_string());

    output.push_str(&format!(
        "\n\n{:<14} {} bom, {} médio, {} ruim\n",
        "Scores:".bold(),
        report.counts.good,
        report.counts.medium,
        report.counts.bad
    ));
    let weighted = report
        .weighted_score
        .map(|score| format!("{:.1}/100", score))
        .unwrap_or_else(|| "n/d".to_string());
    output.push_str(&format!("{:<14} {}\n", "Nota:".bold(), weighted));
    if !report.missing.is_empty() {
        output.push_str(&format!(
            "{:<14} {} indicadores sem valor\n",
            "Faltando:".bold(),
            report.missing.len()
        ));
    }
    output
}
