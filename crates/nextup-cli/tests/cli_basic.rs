//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a snapshot file written
//! into a temp directory, and verify outputs.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Run a CLI command and return output.
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "nextup-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn write_snapshot(dir: &Path) -> String {
    let snapshot = serde_json::json!([
        {
            "id": "t-announce",
            "title": "Announce the release",
            "tier": "high",
            "due_at": "2030-01-02T09:00:00Z",
            "rating": 1640.0,
            "comparison_count": 7
        },
        {
            "id": "t-docs",
            "title": "Write the docs",
            "tier": "medium",
            "due_at": "2030-01-03T09:00:00Z",
            "rating": 1510.0,
            "comparison_count": 2
        },
        {
            "id": "t-idea",
            "title": "Explore the new idea",
            "tier": "high"
        },
        {
            "id": "t-blocked",
            "title": "Retro after announcement",
            "tier": "medium",
            "blocked_by": ["t-announce"]
        },
        {
            "id": "t-someday",
            "title": "Learn piano",
            "tier": "low",
            "state": "someday"
        }
    ]);
    let path = dir.join("snapshot.json");
    fs::write(&path, serde_json::to_string_pretty(&snapshot).unwrap()).unwrap();
    path.to_string_lossy().to_string()
}

const TODAY: &str = "2030-01-01T08:00:00Z";

#[test]
fn test_rank() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(dir.path());
    let (stdout, _, code) = run_cli(&["rank", &snapshot, "--today", TODAY]);
    assert_eq!(code, 0, "rank failed");
    assert!(stdout.contains("Announce the release"));
    assert!(!stdout.contains("Learn piano"));
    assert!(!stdout.contains("Retro after announcement"));
}

#[test]
fn test_rank_json() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(dir.path());
    let (stdout, _, code) = run_cli(&["rank", &snapshot, "--today", TODAY, "--json"]);
    assert_eq!(code, 0, "rank --json failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let ranked = parsed.as_array().unwrap();
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0]["task"]["id"], "t-announce");
    assert!(ranked[0]["importance"].as_f64().unwrap() > ranked[1]["importance"].as_f64().unwrap());
}

#[test]
fn test_focus() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(dir.path());
    let (stdout, _, code) = run_cli(&["focus", &snapshot, "--today", TODAY, "--json"]);
    assert_eq!(code, 0, "focus failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["outcome"], "focus");
    assert_eq!(parsed["pick"]["task"]["id"], "t-announce");
}

#[test]
fn test_tied_empty() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(dir.path());
    let (stdout, _, code) = run_cli(&["tied", &snapshot, "--today", TODAY]);
    assert_eq!(code, 0, "tied failed");
    assert!(stdout.contains("No contested tier"));
}

#[test]
fn test_calibrate_batch_and_apply() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(dir.path());
    let (stdout, _, code) = run_cli(&[
        "calibrate", "batch", &snapshot, "--today", TODAY, "--seed", "42", "--json",
    ]);
    assert_eq!(code, 0, "calibrate batch failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["seed"], 42);
    let batch = parsed["batch"].as_object().unwrap();
    assert_eq!(batch["tier"], "high");
    let tasks = batch["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);

    let mut order: Vec<String> = tasks
        .iter()
        .map(|t| t["id"].as_str().unwrap().to_string())
        .collect();
    // Most important first: put the new idea ahead of the anchor.
    order.sort_by_key(|id| id != "t-idea");

    let mut args = vec![
        "calibrate".to_string(),
        "apply".to_string(),
        snapshot.clone(),
        "--today".to_string(),
        TODAY.to_string(),
        "--seed".to_string(),
        "42".to_string(),
    ];
    args.extend(order);
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let (stdout, _, code) = run_cli(&arg_refs);
    assert_eq!(code, 0, "calibrate apply failed");
    let assignments: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let assignments = assignments.as_array().unwrap();
    assert_eq!(assignments.len(), 2);
    assert_eq!(assignments[0]["task_id"], "t-idea");
}

#[test]
fn test_context_filter_flags_conflict() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(dir.path());
    let (_, _, code) = run_cli(&[
        "rank", &snapshot, "--today", TODAY, "--context", "office", "--no-context",
    ]);
    assert_ne!(code, 0, "conflicting context flags should fail");
}

#[test]
fn test_missing_snapshot_fails() {
    let (_, stderr, code) = run_cli(&["rank", "/nonexistent/snapshot.json"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}
