use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn taskboard() -> Command {
    Command::cargo_bin("taskboard").unwrap()
}

fn parse_json_output(output: &str) -> Value {
    serde_json::from_str(output).expect("Failed to parse JSON output")
}

fn lane<'a>(json: &'a Value, id: &str) -> &'a Value {
    json["data"]["lanes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|lane| lane["id"] == id)
        .unwrap_or_else(|| panic!("no lane {id}"))
}

fn lane_task_ids(json: &Value, id: &str) -> Vec<String> {
    lane(json, id)["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap().to_string())
        .collect()
}

fn show(dir: &std::path::Path, extra: &[&str]) -> Value {
    let mut args = vec!["--dir", dir.to_str().unwrap(), "show"];
    args.extend_from_slice(extra);
    let output = taskboard()
        .args(&args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    parse_json_output(&String::from_utf8_lossy(&output))
}

#[test]
fn test_show_seeds_board_on_first_run() {
    let dir = tempdir().unwrap();

    taskboard()
        .args(["--dir", dir.path().to_str().unwrap(), "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fix login bug"))
        .stdout(predicate::str::contains("\"success\":true"));
}

#[test]
fn test_show_renders_all_four_lanes() {
    let dir = tempdir().unwrap();
    let json = show(dir.path(), &[]);

    let lanes = json["data"]["lanes"].as_array().unwrap();
    assert_eq!(lanes.len(), 4);
    assert_eq!(lane(&json, "todo")["title"], "To Do");
    assert_eq!(lane(&json, "inprogress")["title"], "In Progress");
    assert_eq!(lane(&json, "approved")["title"], "Approved");
    assert_eq!(lane(&json, "reject")["title"], "Reject");
}

#[test]
fn test_move_persists_across_invocations() {
    let dir = tempdir().unwrap();

    let output = taskboard()
        .args([
            "--dir",
            dir.path().to_str().unwrap(),
            "move",
            "--id",
            "1",
            "--to",
            "approved",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = parse_json_output(&String::from_utf8_lossy(&output));
    assert_eq!(json["data"]["moved"], true);
    assert_eq!(json["data"]["status"], "approved");

    let board = show(dir.path(), &[]);
    assert!(lane_task_ids(&board, "approved").contains(&"1".to_string()));
    assert!(!lane_task_ids(&board, "todo").contains(&"1".to_string()));
}

#[test]
fn test_move_accepts_loose_status() {
    let dir = tempdir().unwrap();

    taskboard()
        .args([
            "--dir",
            dir.path().to_str().unwrap(),
            "move",
            "--id",
            "2",
            "--to",
            "In Progress",
        ])
        .assert()
        .success();

    let board = show(dir.path(), &[]);
    assert!(lane_task_ids(&board, "inprogress").contains(&"2".to_string()));
}

#[test]
fn test_move_unknown_id_is_successful_noop() {
    let dir = tempdir().unwrap();
    let before = show(dir.path(), &[]);

    let output = taskboard()
        .args([
            "--dir",
            dir.path().to_str().unwrap(),
            "move",
            "--id",
            "nonexistent",
            "--to",
            "approved",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = parse_json_output(&String::from_utf8_lossy(&output));
    assert_eq!(json["data"]["moved"], false);

    let after = show(dir.path(), &[]);
    assert_eq!(before["data"]["lanes"], after["data"]["lanes"]);
}

#[test]
fn test_move_rejects_unknown_status() {
    let dir = tempdir().unwrap();

    taskboard()
        .args([
            "--dir",
            dir.path().to_str().unwrap(),
            "move",
            "--id",
            "1",
            "--to",
            "done",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized status"));
}

#[test]
fn test_show_with_query_filters_lanes() {
    let dir = tempdir().unwrap();
    let json = show(dir.path(), &["--query", "login"]);

    assert_eq!(json["data"]["query"], "login");
    let all_tasks: Vec<String> = ["todo", "inprogress", "approved", "reject"]
        .iter()
        .flat_map(|id| lane_task_ids(&json, id))
        .collect();
    assert_eq!(all_tasks, vec!["1".to_string(), "2".to_string()]);
}

#[test]
fn test_query_is_case_insensitive() {
    let dir = tempdir().unwrap();
    let json = show(dir.path(), &["--query", "LOGIN"]);

    assert!(lane_task_ids(&json, "todo").contains(&"2".to_string()));
}

#[test]
fn test_reset_restores_seed_board() {
    let dir = tempdir().unwrap();

    taskboard()
        .args([
            "--dir",
            dir.path().to_str().unwrap(),
            "move",
            "--id",
            "1",
            "--to",
            "reject",
        ])
        .assert()
        .success();

    taskboard()
        .args(["--dir", dir.path().to_str().unwrap(), "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"reset\":true"));

    let board = show(dir.path(), &[]);
    assert!(lane_task_ids(&board, "todo").contains(&"1".to_string()));
}

#[test]
fn test_completions_generate() {
    taskboard()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("taskboard"));
}
