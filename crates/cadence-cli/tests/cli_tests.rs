use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Command with plain output, a private database and a fixed today
fn cadence_cmd_on(db_path: &Path, today: &str) -> Command {
    let mut cmd = Command::cargo_bin("cadence").expect("Failed to find cadence binary");
    cmd.args([
        "--no-color",
        "--database-file",
        db_path.to_str().expect("utf-8 path"),
        "--today",
        today,
    ]);
    cmd
}

fn cadence_cmd(db_path: &Path) -> Command {
    cadence_cmd_on(db_path, "2024-03-04")
}

/// Runs a command with `--json` and parses its output
fn run_json(db_path: &Path, args: &[&str]) -> Value {
    let output = cadence_cmd(db_path)
        .arg("--json")
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("Output should be JSON")
}

#[test]
fn test_cli_create_single_plan() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd(&db_path)
        .args(["create", "Gym", "--start", "07:00", "--end", "08:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created plan with ID:"))
        .stdout(predicate::str::contains("07:00-08:00 Gym"))
        .stdout(predicate::str::contains("2024-03-04 (Mon)"));
}

#[test]
fn test_cli_create_weekly_series() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd(&db_path)
        .args([
            "create", "Gym", "--start", "07:00", "--end", "08:00", "--repeat", "weekly",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 44 occurrence(s)"))
        .stdout(predicate::str::contains("2024-03-04 through 2024-12-30"));
}

#[test]
fn test_cli_create_rejects_reversed_block() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd(&db_path)
        .args(["create", "Gym", "--start", "09:00", "--end", "08:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input for field 'end'"));
}

#[test]
fn test_cli_rejects_malformed_time() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd(&db_path)
        .args(["create", "Gym", "--start", "7am", "--end", "08:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected HH:MM"));
}

#[test]
fn test_cli_list_empty_day() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd(&db_path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans scheduled."));
}

#[test]
fn test_cli_list_range_and_default_command() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd(&db_path)
        .args([
            "create", "Standup", "--start", "09:00", "--end", "09:15", "--repeat", "weekdays",
        ])
        .assert()
        .success();

    cadence_cmd(&db_path)
        .args(["list", "--from", "2024-03-08", "--to", "2024-03-11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## 2024-03-08 (Fri)"))
        .stdout(predicate::str::contains("## 2024-03-11 (Mon)"))
        .stdout(predicate::str::contains("2024-03-09").not())
        .stdout(predicate::str::contains("- [ ] 09:00-09:15 Standup (weekdays)"));

    // No subcommand lists today
    cadence_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("## 2024-03-04 (Mon)"));
}

#[test]
fn test_cli_edit_detaches_from_series() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let created = run_json(
        &db_path,
        &["create", "Gym", "--start", "07:00", "--end", "08:00", "--repeat", "daily", "--day", "2024-12-28"],
    );
    let occurrences = created.as_array().expect("array of occurrences");
    assert_eq!(occurrences.len(), 4);
    let target = occurrences[1]["id"].as_str().expect("id");

    cadence_cmd_on(&db_path, "2024-12-29")
        .args(["edit", target, "--title", "Swim", "--repeat", "none"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Detached from group"))
        .stdout(predicate::str::contains("removed 2 upcoming occurrence(s)"))
        .stdout(predicate::str::contains("Swim"));

    let listed = run_json(&db_path, &["list", "--from", "2024-12-28", "--to", "2024-12-31"]);
    let titles: Vec<&str> = listed
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|o| o["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["Gym", "Swim"]);
}

#[test]
fn test_cli_edit_json_reports_regeneration() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let created = run_json(
        &db_path,
        &["create", "Review", "--start", "16:00", "--end", "17:00", "--repeat", "weekly", "--day", "2024-12-02"],
    );
    let target = created[0]["id"].as_str().expect("id").to_string();

    let edited = run_json(&db_path, &["edit", &target, "--repeat", "daily"]);
    assert_eq!(edited["outcome"]["kind"], "regenerated");
    // December 3 through 31
    assert_eq!(edited["outcome"]["created"].as_array().map(Vec::len), Some(29));
    assert_eq!(edited["occurrence"]["repeat_mode"], "daily");
}

#[test]
fn test_cli_toggle_and_delete() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let created = run_json(&db_path, &["create", "Read", "--start", "21:00", "--end", "22:00"]);
    let id = created[0]["id"].as_str().expect("id").to_string();

    cadence_cmd(&db_path)
        .args(["toggle", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("### [x] 21:00-22:00 Read"));

    cadence_cmd(&db_path)
        .args(["delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Deleted plan with ID: {id}")));

    cadence_cmd(&db_path)
        .args(["show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_cli_delete_group() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let created = run_json(
        &db_path,
        &["create", "Walk", "--start", "18:00", "--end", "18:30", "--repeat", "daily", "--day", "2024-12-20"],
    );
    let group = created[0]["group_id"].as_str().expect("group").to_string();

    cadence_cmd(&db_path)
        .args(["delete-group", &group, "--from", "2024-12-30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 occurrence(s)."));

    cadence_cmd(&db_path)
        .args(["delete-group", &group, "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 10 occurrence(s)."));

    cadence_cmd(&db_path)
        .args(["delete-group", &group, "--all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_cli_check_and_clamp() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd(&db_path)
        .args(["create", "Lunch", "--start", "12:00", "--end", "13:00"])
        .assert()
        .success();

    cadence_cmd(&db_path)
        .args(["check", "11:00", "12:30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Slot conflicts with:"))
        .stdout(predicate::str::contains("12:00-13:00 Lunch"));

    cadence_cmd(&db_path)
        .args(["check", "13:00", "14:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Slot is free."));

    cadence_cmd(&db_path)
        .args(["clamp", "10:00", "15:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stops at 12:00"));

    let clamped = run_json(&db_path, &["clamp", "15:00", "09:00"]);
    assert_eq!(clamped["clamped"], 13 * 60);
}
