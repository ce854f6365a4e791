//! End-to-end tests of the harvest binary

use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

use crate::helpers::{fixture_path, harvest};

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn help_lists_commands() {
    let temp = TempDir::new().unwrap();
    harvest(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("compile"))
        .stdout(predicate::str::contains("decode"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn compile_prints_both_documents() {
    let temp = TempDir::new().unwrap();
    let output = harvest(&temp)
        .args(["compile", r#""leaf rust" wheat OR barley NOT oats"#])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["forum"]["exact_phrases"], serde_json::json!(["leaf rust"]));
    assert_eq!(value["forum"]["or_terms"], serde_json::json!(["barley"]));
    assert_eq!(value["feed"]["this_exact_phrase"], "leaf rust");
    assert_eq!(value["feed"]["none_of_these_words"], serde_json::json!(["oats"]));
    assert_eq!(value["feed"]["from_date"], "2023-01-01");
}

#[test]
fn compile_all_time_drops_the_date_window() {
    let temp = TempDir::new().unwrap();
    let output = harvest(&temp)
        .args(["compile", "wheat", "--dialect", "feed", "--all-time"])
        .output()
        .unwrap();
    let value = stdout_json(&output);
    assert!(value.get("forum").is_none());
    assert!(value["feed"].get("from_date").is_none());
    assert!(value["feed"].get("to_date").is_none());
}

#[test]
fn compile_buckets() {
    let temp = TempDir::new().unwrap();
    let output = harvest(&temp)
        .args(["compile", "(p OR q OR r)", "--buckets"])
        .output()
        .unwrap();
    let value = stdout_json(&output);
    assert_eq!(value["or_terms"], serde_json::json!(["p", "q", "r"]));
    assert_eq!(value["and_terms"], serde_json::json!([]));
}

#[test]
fn compile_writes_parameter_files() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("params");
    harvest(&temp)
        .args(["compile", "wheat", "--search-id", "5", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("forum_search_params_5.py"))
        .stdout(predicate::str::contains("feed_search_params_5.py"));
    assert!(out.join("forum_search_params_5.py").exists());
    assert!(out.join("feed_search_params_5.py").exists());
}

#[test]
fn compile_write_uses_configured_directory() {
    let temp = TempDir::new().unwrap();
    let params = temp.path().join("configured");
    std::fs::write(
        temp.path().join("config.toml"),
        format!("[output]\ndirectory = '{}'\n", params.display()),
    )
    .unwrap();
    harvest(&temp)
        .args(["compile", "wheat", "--dialect", "forum", "--search-id", "8"])
        .args(["--write", "--latest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("forum_search_params_8.py"));
    assert!(params.join("forum_search_params_8.py").exists());
    assert!(params.join("forum_search_params.py").exists());
    assert!(!params.join("feed_search_params_8.py").exists());
}

#[test]
fn compile_rejects_search_id_outside_out_dir() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("params");
    harvest(&temp)
        .args(["compile", "wheat", "--search-id", "../../x", "--out"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Search ID"));
    assert!(!out.exists());
}

#[test]
fn compile_rejects_unknown_dialect() {
    let temp = TempDir::new().unwrap();
    harvest(&temp)
        .args(["compile", "wheat", "--dialect", "blog"])
        .assert()
        .failure();
}

#[test]
fn decode_prints_one_json_line_per_row() {
    let temp = TempDir::new().unwrap();
    let output = harvest(&temp)
        .arg("decode")
        .arg(fixture_path("results.csv"))
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let rows: Vec<Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["author"], "alice");
}

#[test]
fn decode_reports_skipped_rows() {
    let temp = TempDir::new().unwrap();
    harvest(&temp)
        .arg("decode")
        .arg(fixture_path("short_rows.csv"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipped 1 short row(s)"));
}

#[test]
fn decode_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    harvest(&temp)
        .arg("decode")
        .arg(temp.path().join("none.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn status_of_missing_file_is_not_started() {
    let temp = TempDir::new().unwrap();
    harvest(&temp)
        .arg("status")
        .arg(temp.path().join("none.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: not_started"));
}

#[test]
fn status_json_reaches_threshold() {
    let temp = TempDir::new().unwrap();
    let output = harvest(&temp)
        .args(["status", "--json", "--threshold", "3"])
        .arg(fixture_path("results.csv"))
        .output()
        .unwrap();
    let value = stdout_json(&output);
    assert_eq!(value["status"], "completed");
    assert_eq!(value["row_count"], 3);
}

#[test]
fn config_path_honours_env_override() {
    let temp = TempDir::new().unwrap();
    let expected = temp.path().join("config.toml");
    harvest(&temp)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.to_string_lossy().to_string()));
}

#[test]
fn config_show_prints_defaults() {
    let temp = TempDir::new().unwrap();
    harvest(&temp)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[forum]"))
        .stdout(predicate::str::contains("baseline_date = \"2023-01-01\""));
}

#[test]
fn invalid_config_is_reported() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("config.toml"),
        "[decoder]\npoll_interval_secs = 0\n",
    )
    .unwrap();
    harvest(&temp)
        .args(["compile", "wheat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("poll_interval_secs"));
}

#[test]
fn completions_generate_for_bash() {
    let temp = TempDir::new().unwrap();
    harvest(&temp)
        .args(["completions", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("harvest"));
}
