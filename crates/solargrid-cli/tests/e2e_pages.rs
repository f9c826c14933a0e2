//! E2E CLI tests covering the fixed pages and language handling:
//! - `solargrid dashboard`, `market`, `wallet`, `portfolio`
//! - `solargrid translate` fallback chain and placeholders
//! - `solargrid locales` coverage report
//! - locale and output resolution from flags, env and config

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

fn sg_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("solargrid"));
    cmd.current_dir(dir);
    cmd.env("SOLARGRID_LOG", "error");
    cmd.env("XDG_CONFIG_HOME", dir.join("xdg"));
    cmd.env("HOME", dir);
    cmd.env_remove("FORMAT");
    cmd.env_remove("SOLARGRID_LOCALE");
    cmd
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = sg_cmd(dir)
        .args(args)
        .arg("--json")
        .output()
        .expect("command should not crash");
    assert!(
        output.status.success(),
        "{args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
}

fn run_text(dir: &Path, args: &[&str]) -> String {
    let output = sg_cmd(dir)
        .args(args)
        .args(["--format", "text"])
        .output()
        .expect("command should not crash");
    assert!(
        output.status.success(),
        "{args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("utf8 stdout")
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[test]
fn dashboard_has_four_kpis_and_a_week_of_energy() {
    let dir = TempDir::new().expect("tempdir");
    let json = run_json(dir.path(), &["dashboard"]);
    assert_eq!(json["kpis"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["weekly_energy"].as_array().map(Vec::len), Some(7));
    assert_eq!(json["kpis"][0]["title"], "Energy Production");
}

#[test]
fn market_defaults_to_a_week() {
    let dir = TempDir::new().expect("tempdir");
    let json = run_json(dir.path(), &["market"]);
    assert_eq!(json["timeframe"], "7d");
    assert_eq!(json["price_history"].as_array().map(Vec::len), Some(7));
    assert_eq!(json["offers"][0]["id"], "S001");
    assert_eq!(json["offers"][0]["total_paise"], 407_500);
}

#[test]
fn market_month_has_four_points() {
    let dir = TempDir::new().expect("tempdir");
    let json = run_json(dir.path(), &["market", "--timeframe", "month"]);
    assert_eq!(json["timeframe"], "1m");
    assert_eq!(json["price_history"].as_array().map(Vec::len), Some(4));
}

#[test]
fn market_rejects_unknown_timeframe() {
    let dir = TempDir::new().expect("tempdir");
    sg_cmd(dir.path())
        .args(["market", "--timeframe", "1y", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E2002]"));
}

#[test]
fn wallet_balance_is_formatted_in_rupees() {
    let dir = TempDir::new().expect("tempdir");
    let json = run_json(dir.path(), &["wallet"]);
    assert_eq!(json["balance_paise"], 1_245_000);
    assert_eq!(json["balance"], "₹12,450.00");
    assert_eq!(json["transactions"].as_array().map(Vec::len), Some(5));
    assert_eq!(json["transactions"][0]["id"], "TX001");

    let text = run_text(dir.path(), &["wallet"]);
    assert!(text.starts_with("balance\t₹12,450.00\n"), "{text}");
}

#[test]
fn portfolio_reports_health() {
    let dir = TempDir::new().expect("tempdir");
    let json = run_json(dir.path(), &["portfolio"]);
    assert_eq!(json["health"]["status"], "normal");
    assert_eq!(json["health"]["efficiency_pct"], 98.5);
    assert!(json["assets"].as_array().is_some_and(|a| !a.is_empty()));
}

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

#[test]
fn translate_uses_active_locale() {
    let dir = TempDir::new().expect("tempdir");
    let text = run_text(dir.path(), &["translate", "sector_map", "--locale", "es"]);
    assert_eq!(text, "Mapa del Sector\n");
}

#[test]
fn translate_unknown_key_returns_key() {
    let dir = TempDir::new().expect("tempdir");
    let json = run_json(dir.path(), &["translate", "house", "--locale", "hi"]);
    assert_eq!(json["value"], "house");
    assert_eq!(json["source"], "key");
    assert_eq!(json["locale"], "hi");
}

#[test]
fn translate_help_example_falls_back_to_english() {
    let dir = TempDir::new().expect("tempdir");
    sg_cmd(dir.path())
        .args(["translate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("account_details --locale ta"));
    let json = run_json(dir.path(), &["translate", "account_details", "--locale", "ta"]);
    assert_eq!(json["value"], "Account Details");
    assert_eq!(json["source"], "fallback");
}

#[test]
fn translate_fills_placeholders() {
    let dir = TempDir::new().expect("tempdir");
    let text = run_text(dir.path(), &["translate", "Hello {{name}}", "-p", "name=Asha"]);
    assert_eq!(text, "Hello Asha\n");
}

#[test]
fn translate_rejects_malformed_param() {
    let dir = TempDir::new().expect("tempdir");
    sg_cmd(dir.path())
        .args(["translate", "load", "-p", "novalue", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E2003]"));
}

#[test]
fn unknown_locale_fails() {
    let dir = TempDir::new().expect("tempdir");
    sg_cmd(dir.path())
        .args(["wallet", "--locale", "fr", "--format", "text"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error[E1002]"));
}

#[test]
fn locale_from_env_and_config() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::create_dir_all(dir.path().join(".solargrid")).expect("create config dir");
    std::fs::write(
        dir.path().join(".solargrid/config.toml"),
        "[display]\nlocale = \"hi\"\n",
    )
    .expect("write config");

    let from_config = run_text(dir.path(), &["translate", "load"]);
    assert_eq!(from_config, "लोड\n");

    let output = sg_cmd(dir.path())
        .env("SOLARGRID_LOCALE", "es")
        .args(["translate", "load", "--format", "text"])
        .output()
        .expect("command should not crash");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Carga\n");

    let from_flag = run_text(dir.path(), &["translate", "load", "--locale", "en"]);
    assert_eq!(from_flag, "Load\n");
}

#[test]
fn format_env_is_honoured() {
    let dir = TempDir::new().expect("tempdir");
    let output = sg_cmd(dir.path())
        .env("FORMAT", "json")
        .args(["locales"])
        .output()
        .expect("command should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("JSON from FORMAT=json");
    assert_eq!(json["fallback"], "en");
}

#[test]
fn locales_lists_all_six() {
    let dir = TempDir::new().expect("tempdir");
    let json = run_json(dir.path(), &["locales", "--locale", "ta"]);
    let locales = json["locales"].as_array().expect("locales array");
    let codes: Vec<&str> = locales.iter().filter_map(|l| l["code"].as_str()).collect();
    assert_eq!(codes, ["en", "es", "hi", "bn", "ta", "te"]);
    assert_eq!(locales[0]["missing"], 0);
    assert!(locales[4]["missing"].as_u64().is_some_and(|n| n > 0));
    assert_eq!(locales[4]["active"], true);
}

#[test]
fn completions_generate_for_bash() {
    let dir = TempDir::new().expect("tempdir");
    sg_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("solargrid"));
}
