//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a throwaway home
//! directory and verify outputs.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "tablequest-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env("TABLEQUEST_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let home = TempDir::new().expect("temp home");
    let (stdout, _, code) = run_cli(home.path(), &["--help"]);
    assert_eq!(code, 0, "Help failed");
    assert!(stdout.contains("play"));
    assert!(stdout.contains("profile"));
}

#[test]
fn test_version() {
    let home = TempDir::new().expect("temp home");
    let (stdout, _, code) = run_cli(home.path(), &["--version"]);
    assert_eq!(code, 0, "Version failed");
    assert!(stdout.contains("tablequest"));
}

#[test]
fn test_badges_without_profile() {
    let home = TempDir::new().expect("temp home");
    let (stdout, _, code) = run_cli(home.path(), &["badges"]);
    assert_eq!(code, 0, "Badges failed");
    assert!(stdout.contains("parfait") || stdout.contains("Perfect"));
}

#[test]
fn test_stats_requires_profile() {
    let home = TempDir::new().expect("temp home");
    let (_, stderr, code) = run_cli(home.path(), &["stats"]);
    assert_eq!(code, 1, "Stats without a profile should fail");
    assert!(stderr.contains("error:"));
}

#[test]
fn test_profile_lifecycle() {
    let home = TempDir::new().expect("temp home");

    let (_, _, code) = run_cli(home.path(), &["profile", "create", "Lina"]);
    assert_eq!(code, 0, "Profile create failed");

    let (stdout, _, code) = run_cli(home.path(), &["profile", "list"]);
    assert_eq!(code, 0, "Profile list failed");
    assert!(stdout.contains("Lina"));

    // First profile is activated automatically.
    let (stdout, _, code) = run_cli(home.path(), &["profile", "show"]);
    assert_eq!(code, 0, "Profile show failed");
    assert!(stdout.contains("Lina"));
}

#[test]
fn test_config_get_set_reset() {
    let home = TempDir::new().expect("temp home");
    let (_, _, code) = run_cli(home.path(), &["profile", "create", "Noa"]);
    assert_eq!(code, 0, "Profile create failed");

    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "question_count"]);
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "10");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "question_count", "5"]);
    assert_eq!(code, 0, "Config set failed");
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "question_count"]);
    assert_eq!(stdout.trim(), "5");

    let (_, _, code) = run_cli(home.path(), &["config", "reset", "question_count"]);
    assert_eq!(code, 0, "Config reset failed");
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "question_count"]);
    assert_eq!(stdout.trim(), "10");

    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "no_such_key"]);
    assert_eq!(code, 1, "Unknown key should fail");
    assert!(stderr.contains("no_such_key"));
}

#[test]
fn test_config_show_lists_all_keys() {
    let home = TempDir::new().expect("temp home");
    let (_, _, code) = run_cli(home.path(), &["profile", "create", "Sam"]);
    assert_eq!(code, 0, "Profile create failed");

    let (stdout, _, code) = run_cli(home.path(), &["config", "show"]);
    assert_eq!(code, 0, "Config show failed");
    for key in [
        "sound_enabled",
        "difficulty",
        "validation_delay_ms",
        "question_count",
    ] {
        assert!(stdout.contains(key), "missing {key} in config show");
    }
}

#[test]
fn test_play_then_stats() {
    let home = TempDir::new().expect("temp home");
    let (_, _, code) = run_cli(home.path(), &["profile", "create", "Mira"]);
    assert_eq!(code, 0, "Profile create failed");

    // Every answer is wrong, so the session still completes after
    // exactly --count questions without needing to know the products.
    let mut child = Command::new("cargo")
        .args(["run", "-p", "tablequest-cli", "--"])
        .args(["play", "--table", "2", "--count", "3"])
        .env("HOME", home.path())
        .env("TABLEQUEST_ENV", "dev")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn play session");
    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(b"0\n0\n0\n")
        .expect("write answers");
    let output = child.wait_with_output().expect("play session output");
    assert_eq!(output.status.code(), Some(0), "Play failed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0/3 correct"));

    let (stdout, _, code) = run_cli(home.path(), &["stats", "--json"]);
    assert_eq!(code, 0, "Stats JSON failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("stats output is valid JSON");
    assert_eq!(parsed["player"], "Mira");
    assert_eq!(parsed["global"]["total_attempts"], 3);
}

#[test]
fn test_play_abandoned_leaves_no_trace() {
    let home = TempDir::new().expect("temp home");
    let (_, _, code) = run_cli(home.path(), &["profile", "create", "Ines"]);
    assert_eq!(code, 0, "Profile create failed");

    let mut child = Command::new("cargo")
        .args(["run", "-p", "tablequest-cli", "--"])
        .args(["play", "--table", "3", "--count", "5"])
        .env("HOME", home.path())
        .env("TABLEQUEST_ENV", "dev")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn play session");
    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(b"6\n")
        .expect("write answer");
    let output = child.wait_with_output().expect("play session output");
    assert_eq!(output.status.code(), Some(0), "Abandoned play failed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Session abandoned."));

    let (stdout, _, code) = run_cli(home.path(), &["stats", "--json"]);
    assert_eq!(code, 0, "Stats JSON failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("stats output is valid JSON");
    assert_eq!(parsed["global"]["total_attempts"], 0);
}

#[test]
fn test_tables_overview() {
    let home = TempDir::new().expect("temp home");
    let (_, _, code) = run_cli(home.path(), &["profile", "create", "Theo"]);
    assert_eq!(code, 0, "Profile create failed");

    let (stdout, _, code) = run_cli(home.path(), &["tables"]);
    assert_eq!(code, 0, "Tables failed");
    for table in 2..=9 {
        assert!(stdout.contains(&format!("{table}")), "missing table {table}");
    }
}
