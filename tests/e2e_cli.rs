mod cli_helpers;

use assert_cmd::prelude::*;
use cli_helpers::{base_cmd, run_cmd_json, write_file, write_user_config};
use predicates::prelude::*;
use tempfile::TempDir;

fn setup_temp_home() -> TempDir {
    TempDir::new().expect("failed to create temp home")
}

#[test]
fn sectors_lists_every_sector_without_ansi() {
    let home = setup_temp_home();

    base_cmd(&home)
        .arg("sectors")
        .assert()
        .success()
        .stdout(predicate::str::contains("real_estate"))
        .stdout(predicate::str::contains("Utilidade Pública"))
        .stdout(predicate::str::contains("\u{001b}[").not());
}

#[test]
fn indicators_accepts_portuguese_sector_names() {
    let home = setup_temp_home();

    base_cmd(&home)
        .args(["indicators", "Tecnologia"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Liquidez Corrente"))
        .stdout(predicate::str::contains("bom ≤ 15, médio ≤ 25"));
}

#[test]
fn evaluate_prints_score_and_explanation() {
    let home = setup_temp_home();

    base_cmd(&home)
        .args(["evaluate", "technology", "ROE", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GOOD"))
        .stdout(predicate::str::contains("Tecnologia"));
}

#[test]
fn evaluate_json_applies_complementary_values() {
    let home = setup_temp_home();

    let json = run_cmd_json(
        &home,
        &[
            "evaluate",
            "technology",
            "currentRatio",
            "0.4",
            "--with",
            "freeCashFlow=5000000",
        ],
    )
    .expect("evaluate failed");

    assert_eq!(json["score"], "medium");
    assert_eq!(json["sector"], "technology");
    assert_eq!(json["adjustments"][0]["rule"], "liquidity_backed_by_cash_flow");
}

#[test]
fn evaluate_json_uses_previous_value() {
    let home = setup_temp_home();

    let json = run_cmd_json(
        &home,
        &["evaluate", "technology", "netMargin", "6", "--previous", "4"],
    )
    .expect("evaluate failed");

    assert_eq!(json["score"], "medium");
}

#[test]
fn evaluate_unknown_indicator_falls_back_to_bad() {
    let home = setup_temp_home();

    let json = run_cmd_json(&home, &["evaluate", "healthcare", "Made Up Label", "42"])
        .expect("evaluate failed");

    assert_eq!(json["score"], "bad");
    assert_eq!(json["weight"], 1.0);
}

#[test]
fn evaluate_unknown_sector_fails() {
    let home = setup_temp_home();

    base_cmd(&home)
        .args(["evaluate", "crypto", "roe", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("crypto"));
}

#[test]
fn report_evaluates_snapshot_file() {
    let home = setup_temp_home();
    let snapshot = write_file(
        home.path(),
        "snapshot.json",
        r#"{
            "sector": "technology",
            "ticker": "TOTS3",
            "values": { "pl": 12.0, "roe": 12.0, "marketCap": 1000000000.0 },
            "previous": { "roe": 14.0 }
        }"#,
    );

    base_cmd(&home)
        .arg("report")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("TOTS3 - Tecnologia"))
        .stdout(predicate::str::contains("P/L"))
        .stdout(predicate::str::contains("\u{001b}[").not());

    let json = run_cmd_json(&home, &["report", snapshot.to_str().unwrap()]).expect("report failed");
    // ROE 12 is Medium but fell from 14, so it drops to Bad
    assert_eq!(json["counts"]["good"], 1);
    assert_eq!(json["counts"]["bad"], 1);
    assert_eq!(json["weighted_score"], 50.0);
}

#[test]
fn report_rejects_invalid_snapshot() {
    let home = setup_temp_home();
    let snapshot = write_file(home.path(), "broken.json", "{ \"sector\": \"mining\" }");

    base_cmd(&home)
        .arg("report")
        .arg(&snapshot)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid snapshot"));
}

#[test]
fn explicit_config_overrides_thresholds() {
    let home = setup_temp_home();
    let config = write_file(
        home.path(),
        "custom.toml",
        r#"
[thresholds.technology]
roe = { type = "symmetric", good = 25, medium = 15 }
"#,
    );

    let json = run_cmd_json(
        &home,
        &["--config", config.to_str().unwrap(), "evaluate", "technology", "roe", "20"],
    )
    .expect("evaluate failed");
    assert_eq!(json["score"], "medium");
}

#[test]
fn user_config_is_picked_up_from_config_home() {
    let home = setup_temp_home();
    write_user_config(&home, "[weights.technology]\nroe = 4.0\n");

    let json = run_cmd_json(&home, &["evaluate", "technology", "roe", "20"])
        .expect("evaluate failed");
    assert_eq!(json["weight"], 4.0);
}

#[test]
fn invalid_config_is_reported() {
    let home = setup_temp_home();
    let config = write_file(home.path(), "bad.toml", "[weights.technology]\nroe = -1.0\n");

    base_cmd(&home)
        .arg("--config")
        .arg(&config)
        .args(["evaluate", "technology", "roe", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn config_path_is_logged_once_logging_is_up() {
    let home = setup_temp_home();
    let config = write_file(home.path(), "quiet.toml", "log_filter = \"info\"\n");

    base_cmd(&home)
        .arg("--config")
        .arg(&config)
        .arg("sectors")
        .assert()
        .success()
        .stderr(predicate::str::contains("Loaded configuration from"));
}
