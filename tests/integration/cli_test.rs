//! Integration tests for the command-line binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{failed_patch_line, fixtures_dir, run_patchdump, session_dirs, write_metrics};

const SCENARIO_A: &str = r#"{"tool":"patch","status":"Failed","arguments":{"unified_diff":"--- a\n+++ b\n"},"failed_files_original_content":{"src/a.txt":"hello"}}"#;

fn patchdump() -> Command {
    let mut cmd = Command::cargo_bin("patchdump").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_exits_0_and_shows_usage() {
    let temp = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_patchdump(temp.path(), &["--help"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("<METRICS_FILE>"));
    assert!(stdout.contains("--output-dir"));
    assert!(stdout.contains("failed patch"));
}

#[test]
fn no_arguments_shows_usage_error() {
    let temp = TempDir::new().unwrap();
    let (_stdout, stderr, exit_code) = run_patchdump(temp.path(), &[]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("<METRICS_FILE>"));
}

// ============================================================================
// Extraction Scenarios
// ============================================================================

#[test]
fn single_failed_patch_is_extracted_into_cwd() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("metrics.jsonl"), format!("{SCENARIO_A}\n")).unwrap();

    patchdump()
        .current_dir(temp.path())
        .arg("metrics.jsonl")
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsing metrics file: metrics.jsonl"))
        .stdout(predicate::str::contains("Found a failed patch operation on line 1."))
        .stdout(predicate::str::contains(
            "Successfully extracted debug files for 1 failed patch operation(s).",
        ));

    let dir = temp.path().join("debug_session_0");
    assert_eq!(
        std::fs::read_to_string(dir.join("failed_patch.diff")).unwrap(),
        "--- a\n+++ b\n"
    );
    assert_eq!(std::fs::read_to_string(dir.join("src/a.txt")).unwrap(), "hello");
}

#[test]
fn successful_patch_reports_nothing_found() {
    let temp = TempDir::new().unwrap();
    let line = SCENARIO_A.replace("\"Failed\"", "\"Success\"");
    std::fs::write(temp.path().join("metrics.jsonl"), line).unwrap();

    patchdump()
        .current_dir(temp.path())
        .arg("metrics.jsonl")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No failed patch operations with debug information were found in the file.",
        ));

    assert!(session_dirs(temp.path()).is_empty());
}

#[test]
fn missing_file_exits_1_with_path_in_error() {
    let temp = TempDir::new().unwrap();
    let (stdout, stderr, exit_code) = run_patchdump(temp.path(), &["nonexistent.jsonl"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("File not found"));
    assert!(stderr.contains("nonexistent.jsonl"));
    assert!(!stdout.contains("Parsing metrics file"));
    assert!(!stderr.contains("panicked"));
    assert!(session_dirs(temp.path()).is_empty());
}

#[test]
fn two_failures_create_two_sessions() {
    let temp = TempDir::new().unwrap();
    write_metrics(
        temp.path(),
        &[
            failed_patch_line("first", &[("a/one.txt", "1")]),
            failed_patch_line("second", &[("b/two.txt", "2")]),
        ],
    );

    let (stdout, _stderr, exit_code) = run_patchdump(temp.path(), &["metrics.jsonl"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Successfully extracted debug files for 2 failed patch operation(s)."));
    assert_eq!(session_dirs(temp.path()), ["debug_session_0", "debug_session_1"]);
    assert_eq!(
        std::fs::read_to_string(temp.path().join("debug_session_1/b/two.txt")).unwrap(),
        "2"
    );
}

#[test]
fn malformed_line_prints_warning_and_continues() {
    let temp = TempDir::new().unwrap();
    let fixture = fixtures_dir().join("mixed.jsonl");

    patchdump()
        .current_dir(temp.path())
        .arg(&fixture)
        .assert()
        .success()
        .stdout(predicate::str::contains("Warning: Could not parse line 3 as JSON"))
        .stdout(predicate::str::contains("(logged 2025-07-01T09:00:05.000Z)"))
        .stdout(predicate::str::contains("for 2 failed patch operation(s)"));
}

#[test]
fn running_twice_succeeds() {
    let temp = TempDir::new().unwrap();
    write_metrics(temp.path(), &[failed_patch_line("d", &[("a.txt", "x")])]);

    for _ in 0..2 {
        let (_stdout, stderr, exit_code) = run_patchdump(temp.path(), &["metrics.jsonl"]);
        assert_eq!(exit_code, 0, "stderr: {}", stderr);
    }
    assert_eq!(session_dirs(temp.path()), ["debug_session_0"]);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn output_dir_flag_redirects_sessions() {
    let temp = TempDir::new().unwrap();
    write_metrics(temp.path(), &[failed_patch_line("d", &[("a.txt", "x")])]);

    patchdump()
        .current_dir(temp.path())
        .args(["--output-dir", "debug/out", "metrics.jsonl"])
        .assert()
        .success();

    assert!(session_dirs(temp.path()).is_empty());
    assert!(temp
        .path()
        .join("debug/out/debug_session_0/failed_patch.diff")
        .is_file());
}

#[test]
fn config_file_renames_session_layout() {
    let temp = TempDir::new().unwrap();
    write_metrics(temp.path(), &[failed_patch_line("d", &[("a.txt", "x")])]);
    std::fs::write(
        temp.path().join("patchdump.toml"),
        "[output]\nsession_prefix = \"failure-\"\ndiff_file_name = \"attempt.patch\"\n",
    )
    .unwrap();

    patchdump()
        .current_dir(temp.path())
        .args(["--config", "patchdump.toml", "metrics.jsonl"])
        .assert()
        .success();

    assert!(temp.path().join("failure-0/attempt.patch").is_file());
    assert!(temp.path().join("failure-0/a.txt").is_file());
}

#[test]
fn invalid_config_exits_1() {
    let temp = TempDir::new().unwrap();
    write_metrics(temp.path(), &[failed_patch_line("d", &[])]);
    std::fs::write(
        temp.path().join("bad.toml"),
        "[output]\nsession_prefix = \"a/b\"\n",
    )
    .unwrap();

    patchdump()
        .current_dir(temp.path())
        .args(["-c", "bad.toml", "metrics.jsonl"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("output.session_prefix"));

    assert!(!temp.path().join("a").exists());
}

// ============================================================================
// I/O Failures
// ============================================================================

#[test]
fn io_failure_exits_1_with_path_in_error() {
    let temp = TempDir::new().unwrap();
    write_metrics(temp.path(), &[failed_patch_line("d", &[("a.txt", "x")])]);
    std::fs::write(temp.path().join("blocker"), "not a directory").unwrap();

    let (_stdout, stderr, exit_code) =
        run_patchdump(temp.path(), &["-o", "blocker", "metrics.jsonl"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("I/O failure"), "stderr: {}", stderr);
    assert!(stderr.contains("blocker"));
    assert!(!stderr.contains("panicked"));
}

#[test]
fn directory_as_input_exits_1_with_path_in_error() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join("logs")).unwrap();

    let (_stdout, stderr, exit_code) = run_patchdump(temp.path(), &["logs"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("I/O failure on 'logs'"), "stderr: {}", stderr);
    assert!(!stderr.contains("panicked"));
    assert!(session_dirs(temp.path()).is_empty());
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn verbose_logs_skipped_records_to_stderr_only() {
    let temp = TempDir::new().unwrap();
    write_metrics(
        temp.path(),
        &[
            r#"{"tool":"read_file","status":"Success"}"#.to_string(),
            failed_patch_line("d", &[("a.txt", "x")]),
        ],
    );

    let quiet = patchdump()
        .current_dir(temp.path())
        .env("NO_COLOR", "1")
        .arg("metrics.jsonl")
        .output()
        .unwrap();
    let verbose = patchdump()
        .current_dir(temp.path())
        .env("NO_COLOR", "1")
        .args(["-v", "metrics.jsonl"])
        .output()
        .unwrap();

    assert!(verbose.status.success());
    let verbose_stderr = String::from_utf8_lossy(&verbose.stderr);
    assert!(verbose_stderr.contains("skipping record"), "stderr: {}", verbose_stderr);
    assert!(!String::from_utf8_lossy(&quiet.stderr).contains("skipping record"));
    assert_eq!(verbose.stdout, quiet.stdout);
}

#[test]
fn non_text_content_is_warned_about() {
    let temp = TempDir::new().unwrap();
    write_metrics(
        temp.path(),
        &[r#"{"tool":"patch","status":"Failed","arguments":{"unified_diff":"d"},"failed_files_original_content":{"img.png":[137,80]}}"#.to_string()],
    );

    patchdump()
        .current_dir(temp.path())
        .arg("metrics.jsonl")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Warning: Failed patch on line 1 has non-text original content for 'img.png'",
        ));

    assert!(session_dirs(temp.path()).is_empty());
}
