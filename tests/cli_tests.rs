//! Command-line tests for the `clock` binary.
//!
//! These tests run the compiled binary with piped stdin and a temporary
//! preferences file, so they never touch the user's home directory or an
//! audio device.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

fn clock() -> Command {
    let mut cmd = Command::cargo_bin("clock").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn prefs_file(dir: &TempDir) -> String {
    dir.path().join("prefs.json").display().to_string()
}

// ============================================================================
// Top-level
// ============================================================================

#[test]
fn help_lists_subcommands() {
    clock()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("prefs"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn completions_for_bash() {
    clock()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("clock"));
}

#[test]
fn out_of_range_session_is_rejected() {
    clock()
        .args(["run", "--session", "61"])
        .assert()
        .failure();
}

// ============================================================================
// prefs
// ============================================================================

#[test]
fn prefs_set_then_show() {
    let dir = TempDir::new().unwrap();
    let prefs = prefs_file(&dir);

    clock()
        .args(["prefs", "set", "session", "30", "--prefs", &prefs])
        .assert()
        .success()
        .stdout(predicate::str::contains("clock.sessionLength = 30"));

    clock()
        .args(["prefs", "show", "--prefs", &prefs])
        .assert()
        .success()
        .stdout(predicate::str::contains("clock.sessionLength = 30"));
}

#[test]
fn prefs_clear_empties_store() {
    let dir = TempDir::new().unwrap();
    let prefs = prefs_file(&dir);

    clock()
        .args(["prefs", "set", "break", "10", "--prefs", &prefs])
        .assert()
        .success();
    clock()
        .args(["prefs", "clear", "--prefs", &prefs])
        .assert()
        .success();

    clock()
        .args(["prefs", "show", "--prefs", &prefs])
        .assert()
        .success()
        .stdout(predicate::str::contains("no stored preferences"));
}

#[test]
fn prefs_show_lists_hand_edited_values() {
    let dir = TempDir::new().unwrap();
    let prefs = prefs_file(&dir);
    std::fs::write(&prefs, r#"{"clock.breakLength": 8}"#).unwrap();

    clock()
        .args(["prefs", "show", "--prefs", &prefs])
        .assert()
        .success()
        .stdout(predicate::str::contains("clock.breakLength = 8"));
}

#[test]
fn prefs_show_malformed_file_fails() {
    let dir = TempDir::new().unwrap();
    let prefs = prefs_file(&dir);
    std::fs::write(&prefs, "{broken").unwrap();

    clock()
        .args(["prefs", "show", "--prefs", &prefs])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// ============================================================================
// run
// ============================================================================

#[test]
fn run_prints_default_clock_and_quits() {
    clock()
        .args(["run", "--no-sound", "--no-prefs"])
        .write_stdin("status\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("25 + 5 Clock"))
        .stdout(predicate::str::contains("Session 25:00 ||"));
}

#[test]
fn run_exits_on_end_of_input() {
    clock()
        .args(["run", "--no-sound", "--no-prefs"])
        .write_stdin("b+\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Break length: 6"));
}

#[test]
fn run_uses_stored_preferences() {
    let dir = TempDir::new().unwrap();
    let prefs = prefs_file(&dir);
    clock()
        .args(["prefs", "set", "session", "30", "--prefs", &prefs])
        .assert()
        .success();

    clock()
        .args(["run", "--no-sound", "--prefs", &prefs])
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session 30:00"));
}

#[test]
fn run_reads_hand_edited_numeric_preferences() {
    let dir = TempDir::new().unwrap();
    let prefs = prefs_file(&dir);
    std::fs::write(
        &prefs,
        r#"{"clock.sessionLength": 30, "clock.breakLength": null}"#,
    )
    .unwrap();

    clock()
        .args(["run", "--no-sound", "--prefs", &prefs])
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session 30:00"))
        .stdout(predicate::str::contains("Break length: 5"));
}

#[test]
fn explicit_session_beats_stored_preference() {
    let dir = TempDir::new().unwrap();
    let prefs = prefs_file(&dir);
    clock()
        .args(["prefs", "set", "session", "30", "--prefs", &prefs])
        .assert()
        .success();

    clock()
        .args(["run", "--no-sound", "--session", "40", "--prefs", &prefs])
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session 40:00"));
}

#[test]
fn run_reports_unknown_command_and_continues() {
    clock()
        .args(["run", "--no-sound", "--no-prefs"])
        .write_stdin("warp\nsession +5\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("error: unknown command 'warp'"))
        .stdout(predicate::str::contains("Session 30:00"));
}

#[test]
fn run_in_polish() {
    clock()
        .args(["run", "--no-sound", "--no-prefs", "--lang", "pl"])
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Zegar 25 + 5"))
        .stdout(predicate::str::contains("Sesja 25:00"));
}

#[test]
fn run_json_output() {
    clock()
        .args(["run", "--no-sound", "--no-prefs", "--json"])
        .write_stdin("mute on\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"muted\":true"))
        .stdout(predicate::str::contains("\"display\":\"25:00\""));
}

#[test]
fn run_with_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("clock.json");
    std::fs::write(&config, r#"{"default_session_minutes": 15}"#).unwrap();

    clock()
        .args(["run", "--no-sound", "--no-prefs", "--config"])
        .arg(&config)
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session 15:00"));
}
