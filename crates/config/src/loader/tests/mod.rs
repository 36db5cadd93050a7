//! Tests for the configuration loader builder.
//!
//! Invariants:
//! - Tests use `serial_test` and `global_test_lock()` to prevent environment
//!   variable pollution across threads.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

pub mod basic_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Every variable `apply_env` reads, unset.
pub fn cleared_env() -> [(&'static str, Option<&'static str>); 9] {
    [
        ("VITALS_TOKEN", None),
        ("GITHUB_TOKEN", None),
        ("VITALS_OWNER", None),
        ("VITALS_REPO", None),
        ("VITALS_API_URL", None),
        ("VITALS_BRANCH", None),
        ("VITALS_GIT", None),
        ("VITALS_TIMEOUT", None),
        ("VITALS_MAX_RETRIES", None),
    ]
}
