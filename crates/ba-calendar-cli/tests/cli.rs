use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::NamedTempFile;

fn ba_tools() -> Command {
    let mut cmd = Command::cargo_bin("ba-tools").unwrap();
    for var in [
        "FISCAL_YEAR_START_MONTH",
        "DEFAULT_SPRINT_LENGTH",
        "POINT_TO_HOUR_RATIO",
        "OVERHEAD_FACTOR",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_list_prints_all_tools() {
    let tools = stdout_json(ba_tools().arg("list"));
    let names: Vec<&str> = tools
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(names.len(), 17);
    assert!(names.contains(&"calculate_working_days"));
    assert!(names.contains(&"validate_moscow_dependencies"));
    assert!(names.contains(&"text_utilities"));
    assert!(names.contains(&"format_user_story"));
}

#[test]
fn test_call_with_inline_args() {
    let out = stdout_json(ba_tools().args([
        "call",
        "add_working_days",
        "--args",
        r#"{"startDate":"2024-12-24","daysToAdd":1}"#,
    ]));
    assert_eq!(out["resultDate"], "2024-12-27");
}

#[test]
fn test_call_reads_stdin() {
    let out = stdout_json(
        ba_tools()
            .args(["call", "convert_timezone"])
            .write_stdin(r#"{"time":"09:00","fromTimezone":"GMT","toTimezone":"EST"}"#),
    );
    assert_eq!(out["convertedTime"], "04:00");
    assert_eq!(out["note"], "Same day");
}

#[test]
fn test_call_error_exits_nonzero() {
    ba_tools()
        .args(["call", "add_working_days", "--args", r#"{"startDate":"tomorrow","daysToAdd":1}"#])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error: Invalid date"));
}

#[test]
fn test_unknown_tool() {
    ba_tools()
        .args(["call", "summarize_meeting_notes", "--args", "{}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported operation"));
}

#[test]
fn test_config_file_and_env_override() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "fiscal_year_start_month = 1").unwrap();
    writeln!(file, "default_sprint_length_weeks = 3").unwrap();

    let out = stdout_json(ba_tools().arg("--config").arg(file.path()).args([
        "call",
        "calculate_fiscal_quarter",
        "--args",
        r#"{"date":"2024-02-15"}"#,
    ]));
    assert_eq!(out["quarter"], "Q1");

    let out = stdout_json(
        ba_tools()
            .arg("--config")
            .arg(file.path())
            .env("FISCAL_YEAR_START_MONTH", "4")
            .args(["call", "calculate_fiscal_quarter", "--args", r#"{"date":"2024-02-15"}"#]),
    );
    assert_eq!(out["quarter"], "Q4");

    let out = stdout_json(ba_tools().arg("--config").arg(file.path()).args([
        "call",
        "calculate_sprint_dates",
        "--args",
        r#"{"sprintStart":"2025-01-06","numberOfSprints":1}"#,
    ]));
    assert_eq!(out["sprintLength"], "3 weeks");
}

#[test]
fn test_bad_config_reports_path() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "unknown_key = true").unwrap();

    ba_tools()
        .arg("--config")
        .arg(file.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
}

#[test]
fn test_bad_env_override() {
    ba_tools()
        .env("OVERHEAD_FACTOR", "lots")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("OVERHEAD_FACTOR"));
}

#[test]
fn test_serve_round_trip() {
    let input = concat!(
        r#"{"id":1,"method":"tools/call","params":{"name":"generate_requirement_ids","arguments":{"prefix":"REQ","startNumber":1,"count":2}}}"#,
        "\n",
        "{broken\n",
        r#"{"id":3,"method":"tools/call","params":{"name":"nope","arguments":{}}}"#,
        "\n",
    );
    let output = ba_tools()
        .arg("serve")
        .write_stdin(input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["result"]["ids"], serde_json::json!(["REQ-001", "REQ-002"]));
    assert_eq!(lines[1]["error"]["kind"], "invalid_request");
    assert_eq!(lines[2]["id"], 3);
    assert_eq!(lines[2]["error"]["kind"], "unsupported");
}

#[test]
fn test_logs_stay_off_stdout() {
    let out = stdout_json(ba_tools().args([
        "-vvv",
        "call",
        "calculate_working_days",
        "--args",
        r#"{"startDate":"2024-12-23","endDate":"2024-12-27"}"#,
    ]));
    assert_eq!(out["workingDays"], 3);
}
