//! Integration tests for top-level CLI behavior.
//!
//! Everything here stays off the network: remote-touching commands are
//! only exercised up to their local validation errors.

use std::path::PathBuf;
use std::process::Command;

fn run_roster(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_roster");
    Command::new(bin).args(args).output().expect("failed to run roster binary")
}

/// A temp dir with a config path the binary can create on first use.
fn temp_config(name: &str) -> (PathBuf, PathBuf) {
    let dir = std::env::temp_dir().join("roster_cli_test").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    let config = dir.join("config.json");
    let _ = std::fs::remove_file(&config);
    (dir, config)
}

#[test]
fn help_lists_all_subcommands() {
    let output = run_roster(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    for subcommand in ["validate", "analyze", "sync", "clear"] {
        assert!(stdout.contains(subcommand), "help is missing {subcommand}");
    }
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_roster(&["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn validate_accepts_a_csv_with_known_headers() {
    let (dir, config) = temp_config("validate_ok");
    let csv = dir.join("contacts.csv");
    std::fs::write(&csv, "NOME,EMAIL\nAna,ana@x.com\n").unwrap();

    let output = run_roster(&[
        "validate",
        "--config",
        config.to_str().unwrap(),
        "--source",
        csv.to_str().unwrap(),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("validated successfully"));
}

#[test]
fn validate_warns_on_missing_columns() {
    let (dir, config) = temp_config("validate_missing");
    let csv = dir.join("contacts.csv");
    std::fs::write(&csv, "Phone,City\n555,Lisbon\n").unwrap();

    let output = run_roster(&[
        "validate",
        "--config",
        config.to_str().unwrap(),
        "--source",
        csv.to_str().unwrap(),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    // Missing columns are a warning, not a hard failure.
    assert!(output.status.success());
    assert!(stdout.contains("missing required column"));
}

#[test]
fn validate_without_a_source_fails() {
    let (_dir, config) = temp_config("validate_none");
    let output = run_roster(&["validate", "--config", config.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("--source"));
}

#[test]
fn validate_rejects_unknown_extensions() {
    let (dir, config) = temp_config("validate_xlsx");
    let xlsx = dir.join("contacts.xlsx");
    std::fs::write(&xlsx, "not a workbook").unwrap();

    let output = run_roster(&[
        "validate",
        "--config",
        config.to_str().unwrap(),
        "--source",
        xlsx.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported source file"));
}

#[test]
fn analyze_without_settings_fails_before_any_remote_work() {
    let (_dir, config) = temp_config("analyze_unconfigured");
    let output = run_roster(&["analyze", "--config", config.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("required"));
}

#[test]
fn clear_without_settings_fails_before_any_remote_work() {
    let (_dir, config) = temp_config("clear_unconfigured");
    let output = run_roster(&["clear", "--yes", "--config", config.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("required"));
}

#[test]
fn first_run_writes_a_default_config_file() {
    let (_dir, config) = temp_config("config_created");
    let _ = run_roster(&["analyze", "--config", config.to_str().unwrap()]);
    let contents = std::fs::read_to_string(&config).unwrap();
    assert!(contents.contains("candidate_name_columns"));
    assert!(contents.contains("template_url"));
}
