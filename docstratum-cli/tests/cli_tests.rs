#![allow(clippy::unwrap_used)]
//! Integration tests for `docstratum_cli::cli::execute`.
//!
//! These tests cover:
//! - JSON output of resolve, order, budget and codes
//! - Severity floor on code listings
//! - `explain` for both identifier kinds, and unknown ids
//! - `check` on the released catalog
//! - `export --output` writing a parseable snapshot

use clap::Parser;
use docstratum_cli::cli::{Cli, execute};
use serde_json::Value;
use tempfile::TempDir;

fn run(args: &[&str]) -> anyhow::Result<String> {
    colored::control::set_override(false);
    let cli = Cli::try_parse_from(std::iter::once("docstratum").chain(args.iter().copied()))?;
    let config = cli.render_config();
    let mut buf = Vec::new();
    execute(cli.command, config, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn run_json(args: &[&str]) -> Value {
    let mut full = vec!["--format", "json"];
    full.extend_from_slice(args);
    serde_json::from_str(&run(&full).unwrap()).unwrap()
}

#[test]
fn test_resolve_json() {
    let value = run_json(&["resolve", "Quick Start", "FAQ", "Blog"]);
    assert_eq!(value[0]["resolution"]["section"], "Getting Started");
    assert_eq!(value[1]["resolution"]["kind"], "canonical");
    assert_eq!(value[2]["resolution"]["kind"], "unresolved");
    assert_eq!(value[2]["diagnostic"], "W002");
}

#[test]
fn test_order_json_reports_expected_arrangement() {
    let value = run_json(&["order", "API Reference", "Optional", "Getting Started"]);
    assert_eq!(value["diagnostic"], "W008");
    assert_eq!(value["violation"]["out_of_order"][0], "Getting Started");
    assert_eq!(value["violation"]["expected"][0], "Getting Started");
    assert_eq!(value["violation"]["expected"][1], "API Reference");
}

#[test]
fn test_order_in_canonical_flow() {
    let value = run_json(&["order", "Master Index", "extras", "Core Concepts"]);
    assert!(value.get("violation").is_none());
    assert!(value.get("diagnostic").is_none());
}

#[test]
fn test_budget_json() {
    let value = run_json(&["budget", "30000", "--pages", "50", "--features", "3"]);
    assert_eq!(value["zone"], "good");
    assert_eq!(value["tier"]["kind"], "standard");
    assert_eq!(value["exceeded"], true);
    assert_eq!(value["observed_tier"], "full");
    assert_eq!(value["diagnostics"][0], "W010");
}

#[test]
fn test_codes_min_severity() {
    let value = run_json(&["codes", "--min-severity", "error"]);
    let codes = value.as_array().unwrap();
    assert_eq!(codes.len(), 8);
    assert!(codes.iter().all(|code| code["severity"] == "ERROR"));

    let value = run_json(&["codes"]);
    assert_eq!(value.as_array().unwrap().len(), 26);
}

#[test]
fn test_anti_patterns_category() {
    let value = run_json(&["anti-patterns", "--category", "critical"]);
    assert_eq!(value["entries"].as_array().unwrap().len(), 4);
    assert_eq!(value["categories"][0]["gating_rule"]["rule"], "cap");
    assert_eq!(value["categories"][0]["gating_rule"]["dimension"], "structural");
}

#[test]
fn test_explain_both_kinds() {
    let value = run_json(&["explain", "E008"]);
    assert_eq!(value["kind"], "diagnostic");
    assert_eq!(value["code"], "E008");
    assert_eq!(value["related_anti_patterns"][0]["id"], "AP-STRAT-002");

    let value = run_json(&["explain", "ap-struct-004"]);
    assert_eq!(value["kind"], "anti_pattern");
    assert_eq!(value["name"], "Section Shuffle");
    assert_eq!(value["related_diagnostics"][0], "W008");
}

#[test]
fn test_explain_unknown_is_error() {
    let err = run(&["explain", "W099"]).unwrap_err();
    assert!(err.to_string().contains("W099"), "got: {err}");
}

#[test]
fn test_check_human() {
    let text = run(&["check"]).unwrap();
    assert!(text.contains("TAXONOMY SELF-CHECK"));
    assert!(text.contains("Anti-patterns:   22"));
}

#[test]
fn test_export_to_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("catalog.json");
    let stdout = run(&["export", "--output", path.to_str().unwrap()]).unwrap();
    assert!(stdout.is_empty());

    let value: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["schema_version"], docstratum::TAXONOMY_SCHEMA_VERSION);
    assert_eq!(value["diagnostics"].as_array().unwrap().len(), 26);
    assert_eq!(value["anti_patterns"].as_array().unwrap().len(), 22);
}

#[test]
fn test_export_missing_directory_errors() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("missing").join("catalog.json");
    let err = run(&["export", "-o", path.to_str().unwrap()]).unwrap_err();
    assert!(err.to_string().contains("failed to write catalog"), "got: {err}");
}
