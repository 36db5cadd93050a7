//! Shared test utilities for `vitals` integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Provide scratch git repositories for `file://` tests.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.
//! - No `VITALS_*` or `GITHUB_TOKEN` value leaks in from the host.

use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;

/// Returns a hermetic `vitals` command for integration testing.
pub fn vitals_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("vitals");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    for var in [
        "VITALS_TOKEN",
        "GITHUB_TOKEN",
        "VITALS_OWNER",
        "VITALS_REPO",
        "VITALS_API_URL",
        "VITALS_BRANCH",
        "VITALS_TIMEOUT",
        "VITALS_MAX_RETRIES",
        "VITALS_GIT",
        "VITALS_NOTIFY",
    ] {
        cmd.env_remove(var);
    }

    cmd
}

/// `vitals` against a mock GitHub API for `acme/status`.
#[allow(dead_code)]
pub fn vitals_cmd_with_api(api_url: &str) -> Command {
    let mut cmd = vitals_cmd();
    cmd.env("VITALS_API_URL", api_url)
        .env("VITALS_TOKEN", "test-token")
        .env("VITALS_OWNER", "acme")
        .env("VITALS_REPO", "status")
        .env("VITALS_MAX_RETRIES", "0");
    cmd
}

#[allow(dead_code)]
pub fn git_available() -> bool {
    StdCommand::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

/// Initialise an empty git repository in `dir`.
#[allow(dead_code)]
pub fn init_repo(dir: &Path) {
    let status = StdCommand::new("git")
        .arg("-C")
        .arg(dir)
        .args(["init", "--quiet"])
        .status()
        .unwrap();
    assert!(status.success());
}

/// `--repo` value for a local working tree.
#[allow(dead_code)]
pub fn file_repo(dir: &Path) -> String {
    format!("file://{}", dir.display())
}
