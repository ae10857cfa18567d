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

fn infinite_bf() -> &'static str { "+[]" }

#[test]
fn test_stdout_only_for_program_output() {
    let home = tempfile::tempdir().unwrap();
    cargo_bin(&home)
        .timeout(Duration::from_secs(2))
        .args([",.", "Q"])
        .assert()
        .success()
        .stdout("Q\n")
        .stderr(predicate::str::contains("Q").not());
}

#[test]
fn test_step_limit_flag_aborts_runaway_loop() {
    let home = tempfile::tempdir().unwrap();
    cargo_bin(&home)
        .timeout(Duration::from_secs(5))
        .args(["--max-steps", "1000", infinite_bf()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Execution aborted: step limit exceeded (1000)"))
        .stdout(predicate::str::contains("Execution aborted").not());
}

#[test]
fn test_step_limit_from_env() {
    let home = tempfile::tempdir().unwrap();
    cargo_bin(&home)
        .timeout(Duration::from_secs(5))
        .env("BFI_MAX_STEPS", "50")
        .arg(infinite_bf())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("step limit exceeded (50)"));
}

#[test]
fn test_flag_overrides_env_step_limit() {
    let home = tempfile::tempdir().unwrap();
    cargo_bin(&home)
        .timeout(Duration::from_secs(5))
        .env("BFI_MAX_STEPS", "50")
        .args(["--max-steps", "70", infinite_bf()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("(70)"));
}

#[test]
fn test_stream_mode_produces_same_output() {
    let home = tempfile::tempdir().unwrap();
    cargo_bin(&home)
        .timeout(Duration::from_secs(2))
        .args(["--stream", ",[.[-],]", "live\0"])
        .assert()
        .success()
        .stdout("live\n");
}

#[test]
fn test_partial_output_kept_when_step_limit_hits() {
    let home = tempfile::tempdir().unwrap();
    // Prints 'A' then spins forever.
    cargo_bin(&home)
        .timeout(Duration::from_secs(5))
        .args(["--max-steps", "200", ",.[]", "A"])
        .assert()
        .code(1)
        .stdout("A\n");
}
