//! End-to-end tests for the report and export commands.
//!
//! Runs the `wl` binary against a temp JSON data file with explicit period
//! values so the output does not depend on the current date.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

fn wl_binary() -> String {
    env!("CARGO_BIN_EXE_wl").to_string()
}

fn write_data_file(dir: &Path) -> PathBuf {
    let org = "6e9e2569-bd2e-46ec-b7c8-8e0b6c41e3c5";
    let maintenance = "0bd74268-2fab-4c77-9b73-b47ac7bc1c43";
    let support = "58e5f12f-7d1d-4511-8d14-d8f0a6b2cf0b";
    let data = serde_json::json!({
        "organization_id": org,
        "projects": [
            { "id": maintenance, "title": "Maintenance", "organization_id": org },
            { "id": support, "title": "Support", "organization_id": org },
        ],
        "activities": [
            {
                "id": "c8b22ba9-46c9-4b29-959b-3bb129c4c2f1",
                "start": "2022-09-05T09:00:00",
                "end": "2022-09-05T10:30:00",
                "description": "weekly update",
                "project_id": maintenance,
                "organization_id": org,
                "username": "admin",
            },
            {
                "id": "29c99d1c-9988-4dcf-9fc6-0d22c2e7f08f",
                "start": "2022-09-07T10:00:00",
                "end": "2022-09-07T10:45:00",
                "description": "ticket triage",
                "project_id": support,
                "organization_id": org,
                "username": "admin",
            },
            {
                "id": "56b4b9ae-23eb-42b1-9d3f-4a71d4e67c9f",
                "start": "2022-10-03T09:00:00",
                "end": "2022-10-03T09:30:00",
                "description": "outside the period",
                "project_id": support,
                "organization_id": org,
                "username": "admin",
            },
        ],
    });
    let path = dir.join("activities.json");
    std::fs::write(&path, serde_json::to_string_pretty(&data).unwrap()).unwrap();
    path
}

fn run_wl(data_path: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(wl_binary())
        .arg("--data")
        .arg(data_path)
        .args(args)
        .output()
        .expect("failed to run wl");
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

#[test]
fn test_report_month() {
    let temp = TempDir::new().unwrap();
    let data_path = write_data_file(temp.path());

    let (stdout, stderr, success) = run_wl(&data_path, &["report", "-t", "month", "-v", "2022-09"]);
    assert!(success, "report should succeed: {stderr}");

    assert!(stdout.contains("ACTIVITY REPORT: 2022-09 (01.09.2022 - 30.09.2022)"));
    assert!(stdout.contains("Monday 05.09.2022"));
    assert!(stdout.contains("Wednesday 07.09.2022"));
    assert!(stdout.contains("Maintenance"));
    assert!(stdout.contains("TOTAL: 2:15 h"));
    // The October activity is outside the period
    assert!(!stdout.contains("03.10.2022"));
}

#[test]
fn test_report_json() {
    let temp = TempDir::new().unwrap();
    let data_path = write_data_file(temp.path());

    let (stdout, stderr, success) =
        run_wl(&data_path, &["report", "-t", "week", "-v", "2022-36", "--json"]);
    assert!(success, "report should succeed: {stderr}");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["timespan"], "week");
    assert_eq!(parsed["value"], "2022-36");
    assert_eq!(parsed["total_minutes"], 135);
    assert_eq!(parsed["by_day"].as_array().unwrap().len(), 2);
}

#[test]
fn test_report_empty_period() {
    let temp = TempDir::new().unwrap();
    let data_path = write_data_file(temp.path());

    let (stdout, _, success) = run_wl(&data_path, &["report", "-t", "day", "-v", "2022-09-06"]);
    assert!(success);
    assert!(stdout.contains("No activities found in 2022-09-06."));
}

#[test]
fn test_report_rejects_malformed_value() {
    let temp = TempDir::new().unwrap();
    let data_path = write_data_file(temp.path());

    let (_, stderr, success) = run_wl(&data_path, &["report", "-t", "month", "-v", "bogus"]);
    assert!(!success);
    assert!(stderr.contains("invalid report period"));
}

#[test]
fn test_export_csv_sorted_by_project() {
    let temp = TempDir::new().unwrap();
    let data_path = write_data_file(temp.path());

    let (stdout, stderr, success) = run_wl(
        &data_path,
        &[
            "export",
            "-t",
            "month",
            "-v",
            "2022-09",
            "--sort-by",
            "project",
            "--sort-order",
            "desc",
        ],
    );
    assert!(success, "export should succeed: {stderr}");

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "date,start,end,project,duration,description");
    assert_eq!(
        lines[1],
        "2022-09-07,10:00,10:45,Support,0.75,ticket triage"
    );
    assert_eq!(
        lines[2],
        "2022-09-05,09:00,10:30,Maintenance,1.50,weekly update"
    );
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_missing_data_file_reports_empty() {
    let temp = TempDir::new().unwrap();
    let data_path = temp.path().join("does-not-exist.json");

    let (stdout, _, success) = run_wl(&data_path, &["report", "-t", "year", "-v", "2022"]);
    assert!(success);
    assert!(stdout.contains("No activities found in 2022."));
}
