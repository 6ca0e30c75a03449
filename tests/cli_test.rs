//! Tests for the one-shot CLI commands.

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_strictly_digits"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run strictly_digits")
}

#[test]
fn test_budget_prints_reveal_time_and_logs() {
    let output = run(&["budget", "3"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "3 digits: 4.0s reveal");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Computed reveal budget"));
    assert!(stderr.contains("run_budget"));
}

#[test]
fn test_check_prints_marked_diff() {
    let output = run(&["check", "427", "418"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "4[2][7] | 4[1][8]  (mismatch)");
}

#[test]
fn test_check_json_fallback() {
    let output = run(&["check", "427", "42", "--json"]);
    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["kind"], "fallback");
    assert_eq!(json["struck"], "427");
    assert_eq!(json["guessed"], "42");
}

#[test]
fn test_check_rejects_non_digits() {
    let output = run(&["check", "4x7", "427"]);
    assert!(!output.status.success());
}
