//! Integration tests for the `servicedeck` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the caller's config files and environment.
fn servicedeck(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("servicedeck").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("NO_COLOR")
        .env_remove("RUST_LOG");
    cmd
}

fn write_fixture(dir: &Path, body: &str) -> String {
    let path = dir.join("fixture.json");
    fs::write(&path, body).unwrap();
    path.display().to_string()
}

// ── top level ─────────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    servicedeck(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("seed"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("demo"));
}

#[test]
fn version_flag() {
    let home = TempDir::new().unwrap();
    servicedeck(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_subcommand_is_usage_error() {
    let home = TempDir::new().unwrap();
    servicedeck(home.path()).assert().code(2);
}

// ── demo ──────────────────────────────────────────────────────────────────────

#[test]
fn demo_runs_every_scenario() {
    let home = TempDir::new().unwrap();
    servicedeck(home.path())
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "should display and click the Get Started button",
        ))
        .stdout(predicate::str::contains("should show a Our Services Label"))
        .stdout(predicate::str::contains("5 passing, 0 failing"));
}

#[test]
fn demo_json_report() {
    let home = TempDir::new().unwrap();
    let assert = servicedeck(home.path())
        .args(["--output-format", "json", "demo"])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["passed"], 5);
    assert_eq!(report["failed"], 0);
}

// ── list ──────────────────────────────────────────────────────────────────────

#[test]
fn list_on_fresh_backend_is_empty() {
    let home = TempDir::new().unwrap();
    servicedeck(home.path())
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn list_shows_fixture_records_with_glyphs() {
    let home = TempDir::new().unwrap();
    let fixture = write_fixture(
        home.path(),
        r#"[{"id":"a1","title":"Cognito","description":"Auth"},
            {"id":"b2","title":"Pinpoint","description":"Engagement"}]"#,
    );

    servicedeck(home.path())
        .env("SERVICEDECK_BACKEND__FIXTURE", &fixture)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("[C] a1"))
        .stdout(predicate::str::contains("[P] b2"));
}

#[test]
fn untitled_record_is_skipped_with_warning() {
    let home = TempDir::new().unwrap();
    let fixture = write_fixture(
        home.path(),
        r#"[{"id":"a1","title":"Cognito"},{"id":"b2","description":"no title"}]"#,
    );

    servicedeck(home.path())
        .env("SERVICEDECK_BACKEND__FIXTURE", &fixture)
        .args(["list", "--format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cognito"))
        .stdout(predicate::str::contains("incomplete"))
        .stdout(predicate::str::contains("title"));
}

#[test]
fn keep_previous_policy_fails_on_partial_listing() {
    let home = TempDir::new().unwrap();
    let fixture = write_fixture(home.path(), r#"[{"id":"b2"}]"#);

    servicedeck(home.path())
        .env("SERVICEDECK_BACKEND__FIXTURE", &fixture)
        .env("SERVICEDECK_SYNC__LIST_ERROR_POLICY", "keep-previous")
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("problem"));
}

#[test]
fn http_backend_without_outputs_is_configuration_error() {
    let home = TempDir::new().unwrap();
    servicedeck(home.path())
        .env("SERVICEDECK_BACKEND__KIND", "http")
        .arg("list")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("backend outputs"));
}

// ── seed / remove ─────────────────────────────────────────────────────────────

#[test]
fn seed_creates_catalog() {
    let home = TempDir::new().unwrap();
    servicedeck(home.path())
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 6 service(s)"))
        .stdout(predicate::str::contains("Amplify"))
        .stdout(predicate::str::contains("Device Farm"));
}

#[test]
fn seed_dry_run_lists_catalog() {
    let home = TempDir::new().unwrap();
    servicedeck(home.path())
        .args(["seed", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would create 6"))
        .stdout(predicate::str::contains("Location Service"));
}

#[test]
fn remove_fixture_record() {
    let home = TempDir::new().unwrap();
    let fixture = write_fixture(
        home.path(),
        r#"[{"id":"a1","title":"Cognito"},{"id":"b2","title":"Pinpoint"}]"#,
    );

    servicedeck(home.path())
        .env("SERVICEDECK_BACKEND__FIXTURE", &fixture)
        .args(["remove", "a1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed a1"))
        .stdout(predicate::str::contains("Pinpoint"))
        .stdout(predicate::str::contains("Cognito").not());
}

#[test]
fn seed_json_output_is_a_service_array() {
    let home = TempDir::new().unwrap();
    let assert = servicedeck(home.path())
        .args(["--output-format", "json", "seed"])
        .assert()
        .success();

    let rows: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0]["title"], "Amplify");
}

#[test]
fn seed_dry_run_json_lists_drafts() {
    let home = TempDir::new().unwrap();
    let assert = servicedeck(home.path())
        .args(["--output-format", "json", "seed", "--dry-run"])
        .assert()
        .success();

    let drafts: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(drafts.as_array().unwrap().len(), 6);
    assert_eq!(drafts[5]["title"], "Device Farm");
}

#[test]
fn remove_json_output_is_remaining_services() {
    let home = TempDir::new().unwrap();
    let fixture = write_fixture(
        home.path(),
        r#"[{"id":"a1","title":"Cognito"},{"id":"b2","title":"Pinpoint"}]"#,
    );

    let assert = servicedeck(home.path())
        .env("SERVICEDECK_BACKEND__FIXTURE", &fixture)
        .args(["--output-format", "json", "remove", "a1"])
        .assert()
        .success();

    let rows: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "b2");
}

#[test]
fn remove_unknown_id_is_not_found() {
    let home = TempDir::new().unwrap();
    servicedeck(home.path())
        .args(["remove", "nope"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Service not found"));
}

#[test]
fn remove_blank_id_is_user_error() {
    let home = TempDir::new().unwrap();
    servicedeck(home.path())
        .args(["remove", "  "])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid service id"));
}

// ── press / render ────────────────────────────────────────────────────────────

#[test]
fn press_shows_confirmation() {
    let home = TempDir::new().unwrap();
    servicedeck(home.path())
        .args(["press", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Button Pressed!"));
}

#[test]
fn render_outline_carries_accessibility_ids() {
    let home = TempDir::new().unwrap();
    servicedeck(home.path())
        .args(["render", "--theme", "dark"])
        .assert()
        .success()
        .stdout(predicate::str::contains("~get_started_button"))
        .stdout(predicate::str::contains("~learn_more_button"))
        .stdout(predicate::str::contains("~our_services_label"))
        .stdout(predicate::str::contains("#232F3E"))
        .stdout(predicate::str::contains("cards #1A232E"));
}

#[test]
fn render_header_reports_requested_width() {
    let home = TempDir::new().unwrap();
    servicedeck(home.path())
        .args(["render", "--width", "600"])
        .assert()
        .success()
        .stdout(predicate::str::contains("600 px"));
}

#[test]
fn render_rejects_narrow_viewport() {
    let home = TempDir::new().unwrap();
    servicedeck(home.path())
        .args(["render", "--width", "10"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("too narrow"));
}

// ── config / init / completions ──────────────────────────────────────────────

#[test]
fn config_get_reads_defaults_and_env() {
    let home = TempDir::new().unwrap();
    servicedeck(home.path())
        .args(["config", "get", "backend.kind"])
        .assert()
        .success()
        .stdout("memory\n");

    servicedeck(home.path())
        .env("SERVICEDECK_DISPLAY__THEME", "dark")
        .args(["config", "get", "display.theme"])
        .assert()
        .success()
        .stdout("dark\n");
}

#[test]
fn config_get_unknown_key() {
    let home = TempDir::new().unwrap();
    servicedeck(home.path())
        .args(["config", "get", "nope.nothing"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn explicit_config_file_is_used() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("custom.toml");
    fs::write(&path, "[harness]\nconnection_retry_count = 7\n").unwrap();

    servicedeck(home.path())
        .arg("--config")
        .arg(&path)
        .args(["config", "get", "harness.connection_retry_count"])
        .assert()
        .success()
        .stdout("7\n");
}

#[test]
fn missing_explicit_config_exits_4() {
    let home = TempDir::new().unwrap();
    servicedeck(home.path())
        .args(["--config", "does-not-exist.toml", "list"])
        .assert()
        .code(4);
}

#[test]
fn init_local_writes_config_once() {
    let home = TempDir::new().unwrap();
    servicedeck(home.path())
        .args(["init", "--local"])
        .assert()
        .success();

    let written = fs::read_to_string(home.path().join("servicedeck.toml")).unwrap();
    assert!(written.contains("[backend]"));
    assert!(written.contains("[harness]"));

    servicedeck(home.path())
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn shell_completions() {
    let home = TempDir::new().unwrap();
    servicedeck(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("servicedeck"));
}
