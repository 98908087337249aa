use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create an isolated config home for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color and an empty config
/// home so the host's settings never leak into a test
fn tzb_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tzb").expect("Failed to find tzb binary");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

#[test]
fn test_cli_datetime_render() {
    let home = create_cli_test_environment();

    tzb_cmd(&home)
        .args([
            "-z",
            "America/Los_Angeles",
            "datetime",
            "render",
            "2024-01-16T02:30:00Z",
            "--label",
            "Exchange",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Exchange (PT)"))
        .stdout(predicate::str::contains("- **Input**: datetime-local"))
        .stdout(predicate::str::contains("- **Value**: 2024-01-15T18:30"));
}

#[test]
fn test_cli_datetime_render_null() {
    let home = create_cli_test_environment();

    tzb_cmd(&home)
        .args(["-z", "UTC", "datetime", "render"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Value**: (empty)"));
}

#[test]
fn test_cli_datetime_render_bounds_json() {
    let home = create_cli_test_environment();

    let output = tzb_cmd(&home)
        .args([
            "--json",
            "-z",
            "America/New_York",
            "datetime",
            "render",
            "2024-01-16T02:30:00Z",
            "--min",
            "2024-01-01T05:00:00Z",
            "--max",
            "2024-12-31T05:00:00Z",
            "--seconds",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("Invalid JSON output");
    assert_eq!(json["kind"], "datetime-local");
    assert_eq!(json["value"], "2024-01-15T21:30:00");
    assert_eq!(json["min"], "2024-01-01T00:00:00");
    assert_eq!(json["max"], "2024-12-31T00:00:00");
}

#[test]
fn test_cli_datetime_commit() {
    let home = create_cli_test_environment();

    tzb_cmd(&home)
        .args([
            "-z",
            "America/Los_Angeles",
            "datetime",
            "commit",
            "2024-01-15T18:30",
        ])
        .assert()
        .success()
        .stdout("2024-01-16T02:30:00Z\n");
}

#[test]
fn test_cli_datetime_commit_empty_is_null() {
    let home = create_cli_test_environment();

    tzb_cmd(&home)
        .args(["-z", "UTC", "datetime", "commit", ""])
        .assert()
        .success()
        .stdout("null\n");

    tzb_cmd(&home)
        .args(["--json", "-z", "UTC", "dt", "c", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"value\": null"));
}

#[test]
fn test_cli_datetime_commit_required_rejects_empty() {
    let home = create_cli_test_environment();

    tzb_cmd(&home)
        .args(["-z", "UTC", "datetime", "commit", "", "--required", "-l", "Hearing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input for field 'Hearing'"));
}

#[test]
fn test_cli_datetime_commit_current_keeps_fold_side() {
    let home = create_cli_test_environment();

    tzb_cmd(&home)
        .args([
            "-z",
            "America/Los_Angeles",
            "datetime",
            "commit",
            "2024-11-03T01:30",
            "--current",
            "2024-11-03T09:30:00Z",
        ])
        .assert()
        .success()
        .stdout("2024-11-03T09:30:00Z\n");
}

#[test]
fn test_cli_date_render_dual_mode() {
    let home = create_cli_test_environment();

    tzb_cmd(&home)
        .args(["-z", "Asia/Tokyo", "date", "render", "2015-04-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Value**: 2015-04-02"));

    tzb_cmd(&home)
        .args([
            "-z",
            "America/Los_Angeles",
            "date",
            "render",
            "2024-01-16T02:30:00Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Value**: 2024-01-15"));
}

#[test]
fn test_cli_date_commit_modes() {
    let home = create_cli_test_environment();

    tzb_cmd(&home)
        .args(["-z", "America/Los_Angeles", "date", "commit", "2015-04-02"])
        .assert()
        .success()
        .stdout("2015-04-02\n");

    tzb_cmd(&home)
        .args([
            "-z",
            "America/Los_Angeles",
            "date",
            "commit",
            "2024-01-15",
            "--instant",
        ])
        .assert()
        .success()
        .stdout("2024-01-15T08:00:00Z\n");
}

#[test]
fn test_cli_time_passthrough() {
    let home = create_cli_test_environment();

    tzb_cmd(&home)
        .args(["-z", "Asia/Kolkata", "time", "commit", "18:30"])
        .assert()
        .success()
        .stdout("18:30\n");

    tzb_cmd(&home)
        .args([
            "-z",
            "America/Chicago",
            "time",
            "render",
            "18:30",
            "--label",
            "Pickup",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Pickup (CT)"))
        .stdout(predicate::str::contains("- **Value**: 18:30"));
}

#[test]
fn test_cli_no_zone_abbr() {
    let home = create_cli_test_environment();

    tzb_cmd(&home)
        .args([
            "--no-zone-abbr",
            "-z",
            "America/Chicago",
            "time",
            "render",
            "18:30",
            "--label",
            "Pickup",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Pickup\n"));
}

#[test]
fn test_cli_zone_report() {
    let home = create_cli_test_environment();

    tzb_cmd(&home)
        .args(["-z", "America/New_York", "zone"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## America/New_York"))
        .stdout(predicate::str::contains("- **Abbreviation**: ET"));
}

#[test]
fn test_cli_config_file_sets_timezone() {
    let home = create_cli_test_environment();
    let config_dir = home.path().join("tzbind");
    std::fs::create_dir_all(&config_dir).expect("Failed to create config dir");
    std::fs::write(
        config_dir.join("config.json"),
        r#"{"timezone": "America/Denver", "show_zone_abbr": false}"#,
    )
    .expect("Failed to write config");

    tzb_cmd(&home)
        .args(["--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"timezone\": \"America/Denver\""))
        .stdout(predicate::str::contains("\"show_zone_abbr\": false"));
}

#[test]
fn test_cli_unknown_timezone_fails() {
    let home = create_cli_test_environment();

    tzb_cmd(&home)
        .args(["-z", "Nowhere/Special", "zone"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown timezone 'Nowhere/Special'"));
}

#[test]
fn test_cli_malformed_stored_value_fails() {
    let home = create_cli_test_environment();

    tzb_cmd(&home)
        .args(["-z", "UTC", "datetime", "render", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid stored value 'yesterday'"));
}

#[test]
fn test_cli_datetime_commit_rejects_offset() {
    let home = create_cli_test_environment();

    tzb_cmd(&home)
        .args([
            "-z",
            "America/Los_Angeles",
            "datetime",
            "commit",
            "2024-07-04T12:00+09:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to commit datetime"));

    tzb_cmd(&home)
        .args([
            "-z",
            "America/Los_Angeles",
            "date",
            "commit",
            "2024-01-16T23:30:00-08:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to commit date"));
}

#[test]
fn test_cli_commit_has_no_display_flags() {
    let home = create_cli_test_environment();

    tzb_cmd(&home)
        .args(["-z", "UTC", "time", "commit", "18:30", "--disabled"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--disabled"));
}

#[test]
fn test_cli_time_render_blank_is_empty() {
    let home = create_cli_test_environment();

    tzb_cmd(&home)
        .args(["-z", "UTC", "time", "render", "  "])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Value**: (empty)"));
}
