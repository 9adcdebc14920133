//! Smoke tests for the logview binary.
//!
//! Each run gets its own config file so latency is zero and logs go to a
//! temp directory instead of the user's state dir.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("logview_cli_{}", name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn run(name: &str, args: &[&str]) -> Output {
    let dir = scratch_dir(name);
    let config = dir.join("config.toml");
    fs::write(
        &config,
        format!(
            "latency_ms = 0\nlog_file_path = {:?}\n",
            dir.join("logview.log").to_string_lossy()
        ),
    )
    .expect("write config");

    Command::new(env!("CARGO_BIN_EXE_logview"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .env_remove("LOGVIEW_LATENCY_MS")
        .env_remove("LOGVIEW_STALE_RESULTS")
        .output()
        .expect("spawn logview")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn smoke_prints_query_then_view() {
    let output = run("query", &["--query", "user=alice&sort=timestamp:desc"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let text = stdout(&output);
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("?user=alice&sort=timestamp%3Adesc"));
    assert_eq!(
        lines.next(),
        Some("user: alice · action: all · sort: timestamp desc · 10 per page")
    );
    assert!(text.contains("Page 1 of 1 · 4 matching records"));
}

#[test]
fn smoke_set_and_clear_apply_in_order() {
    let output = run(
        "set_clear",
        &["--query", "user=bob&page=2", "--set", "action=logout", "--clear", "page"],
    );
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("?user=bob&action=logout\n"));
}

#[test]
fn smoke_error_mode_renders_failure() {
    let output = run("error_mode", &["--set", "data-state=error"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Failed to load logs."));
}

#[test]
fn smoke_missing_data_file_fails() {
    let output = run("missing", &["--data", "/nonexistent/audit.jsonl"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("/nonexistent/audit.jsonl"));
}

#[test]
fn smoke_reads_custom_data_file() {
    let dir = scratch_dir("custom_data");
    let data = dir.join("records.jsonl");
    fs::write(
        &data,
        concat!(
            r#"{"timestamp":"2024-05-01T12:00:00Z","user":"zoe","action":"rotate-key","resource":"/keys/1"}"#,
            "\n",
        ),
    )
    .expect("write data");

    let output = run("custom_data_run", &["--data", data.to_str().unwrap()]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("2024-05-01 12:00:00  zoe   rotate-key  /keys/1"));
    assert!(text.contains("Page 1 of 1 · 1 matching record"));
}
