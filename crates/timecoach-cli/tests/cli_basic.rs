//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Explicit
//! --config/--learning/--tasks paths keep everything inside a temp dir.

use std::path::PathBuf;
use std::process::Command;

fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "timecoach-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn temp_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("timecoach-cli-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

#[test]
fn test_help() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("plan"));
    assert!(stdout.contains("insights"));
}

#[test]
fn test_plan_empty_inputs() {
    let config = temp_path("empty-config.toml");
    let (stdout, _, code) = run_cli(&[
        "plan",
        "--config",
        config.to_str().unwrap(),
        "--learning",
        temp_path("empty-learning.json").to_str().unwrap(),
    ]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Planned 0 item(s)"));
}

#[test]
fn test_plan_json_output() {
    let tasks = temp_path("tasks.json");
    std::fs::write(
        &tasks,
        r#"[{"id": "t1", "title": "Write weekly notes", "notes": "30 min"}]"#,
    )
    .unwrap();

    let (stdout, _, code) = run_cli(&[
        "plan",
        "--config",
        temp_path("plan-config.toml").to_str().unwrap(),
        "--learning",
        temp_path("plan-learning.json").to_str().unwrap(),
        "--tasks",
        tasks.to_str().unwrap(),
        "--json",
    ]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("JSON output");
    assert!(parsed.get("scheduled").is_some());
    assert!(parsed.get("unscheduled").is_some());
}

#[test]
fn test_track_and_insights_round_trip() {
    let learning = temp_path("track-learning.json");
    let learning_arg = learning.to_str().unwrap();

    for _ in 0..3 {
        let (_, _, code) = run_cli(&[
            "track",
            "complete",
            "Debug the exporter",
            "--estimated",
            "60",
            "--actual",
            "45",
            "--at",
            "10",
            "--learning",
            learning_arg,
        ]);
        assert_eq!(code, 0);
    }

    let (stdout, _, code) = run_cli(&["insights", "--learning", learning_arg]);
    assert_eq!(code, 0);
    assert!(stdout.contains("coding"));
}
