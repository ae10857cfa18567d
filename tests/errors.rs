use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

// Point the config home at an empty dir so a developer's own bfi.toml can't leak in.
fn cargo_bin(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bfi").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path())
        .env_remove("BFI_MAX_STEPS")
        .env_remove("BFI_STREAM");
    cmd
}

#[test]
fn test_unmatched_brackets_reported_and_exit_clean() {
    let home = tempfile::tempdir().unwrap();
    cargo_bin(&home)
        .timeout(Duration::from_secs(2)).arg("+[")
        .assert()
        .success()
        .stderr(predicate::str::contains("Brackets not matched").and(predicate::str::contains("^")))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_close_before_open_is_unbalanced() {
    let home = tempfile::tempdir().unwrap();
    cargo_bin(&home)
        .timeout(Duration::from_secs(2)).arg("][")
        .assert()
        .success()
        .stderr(predicate::str::contains("Brackets not matched"));
}

#[test]
fn test_not_enough_inputs_reported() {
    let home = tempfile::tempdir().unwrap();
    cargo_bin(&home)
        .timeout(Duration::from_secs(2)).args([",,", "a"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Not enough inputs for code"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_pointer_underflow_is_a_runtime_failure() {
    let home = tempfile::tempdir().unwrap();
    cargo_bin(&home)
        .timeout(Duration::from_secs(2)).arg("+.<")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Pointer underflow"))
        // Output produced before the abort is still printed.
        .stdout("\u{1}\n");
}

#[test]
fn test_missing_code_file_fails() {
    let home = tempfile::tempdir().unwrap();
    cargo_bin(&home)
        .timeout(Duration::from_secs(2)).args(["--file", "/definitely/not/here.bf"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read code file"));
}

#[test]
fn test_input_shortage_reported_before_unbalanced_brackets() {
    let home = tempfile::tempdir().unwrap();
    cargo_bin(&home)
        .timeout(Duration::from_secs(2)).arg(",]")
        .assert()
        .success()
        .stderr(predicate::str::contains("Not enough inputs for code")
            .and(predicate::str::contains("Brackets not matched").not()));
}

#[test]
fn test_pointer_underflow_logs_warning() {
    let home = tempfile::tempdir().unwrap();
    cargo_bin(&home)
        .timeout(Duration::from_secs(2))
        .env_remove("RUST_LOG")
        .arg("<")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("WARN").and(predicate::str::contains("pointer moved left of cell 0")));
}
