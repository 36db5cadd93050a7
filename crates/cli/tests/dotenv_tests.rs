//! Integration tests for `.env` handling at startup.
//!
//! Responsibilities:
//! - Prove that a malformed `.env` stops the CLI before any command runs.
//! - Prove that parse errors never echo `.env` contents.
//! - Prove that `.env` values feed clap's `VITALS_*` defaults.
//!
//! Invariants:
//! - Tests clear `DOTENV_DISABLED` explicitly and run inside a temp directory.

mod common;

use common::vitals_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn dotenv_cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = vitals_cmd();
    cmd.current_dir(dir.path()).env_remove("DOTENV_DISABLED");
    cmd
}

#[test]
fn test_invalid_dotenv_causes_cli_failure() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    dotenv_cmd(&dir)
        .arg("jobs")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(".env"));
}

#[test]
fn test_invalid_dotenv_does_not_leak_secrets() {
    let dir = TempDir::new().unwrap();
    let secret = "supersecret_vitals_token_12345";
    fs::write(
        dir.path().join(".env"),
        format!("VITALS_TOKEN={secret}\nINVALID_LINE"),
    )
    .unwrap();

    let output = dotenv_cmd(&dir).arg("jobs").output().unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(!stderr.contains(secret), "stderr leaked the token: {stderr}");
}

#[test]
fn test_dotenv_disabled_skips_malformed_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    vitals_cmd()
        .current_dir(dir.path())
        .arg("jobs")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("VITALS_REPO"))
        .stderr(predicate::str::contains(".env").not());
}

#[test]
fn test_dotenv_supplies_repository() {
    let dir = TempDir::new().unwrap();
    let repo = common::file_repo(dir.path());
    fs::write(dir.path().join(".env"), format!("VITALS_REPO={repo}\n")).unwrap();

    // No snapshot exists yet, so the configured repository is read and found empty.
    dotenv_cmd(&dir)
        .arg("jobs")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("summary.md"));
}
