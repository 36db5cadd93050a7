//! Centralized constants for the vitals workspace.
//!
//! Default values used across crates live here to avoid magic number
//! duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default GitHub REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default branch that artifacts are read from and committed to.
pub const DEFAULT_BRANCH: &str = "main";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of retries for failed reads.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Upper bound for configured retries.
pub const MAX_MAX_RETRIES: usize = 10;

/// User-Agent sent with every GitHub request.
pub const USER_AGENT: &str = "vitals";

// =============================================================================
// Local Repository Defaults
// =============================================================================

/// Git executable used for `file://` repositories.
pub const DEFAULT_GIT: &str = "git";

// =============================================================================
// Dashboard Defaults
// =============================================================================

/// Default path of the rendered dashboard summary.
pub const DEFAULT_SUMMARY_PATH: &str = "summary.md";

/// Commit message used when a dashboard pass writes its files.
pub const SUMMARY_COMMIT_MESSAGE: &str = "Update summary files";

/// Default Telegram Bot API base URL for notifications.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
