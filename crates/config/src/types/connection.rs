//! Connection configuration types.
//!
//! Responsibilities:
//! - Define connection settings (API URL, branch, timeouts, retries, git binary).
//! - Define the main `Config` combining connection settings with the token and
//!   repository coordinates.
//!
//! Does NOT handle:
//! - Configuration loading from env or `.env` (see `loader` module).
//! - Interpreting `repo` as a GitHub name or `file://` path (see the client crate).

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_BRANCH, DEFAULT_GIT, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS,
};
use crate::loader::ConfigError;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// How to reach the artifact store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// GitHub REST API base URL, without trailing slash
    pub api_url: String,
    /// Branch to read from and commit to
    pub branch: String,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Maximum number of retries for transient read failures
    pub max_retries: usize,
    /// Git executable for local repositories
    pub git: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            git: DEFAULT_GIT.to_string(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub connection: ConnectionConfig,
    /// GitHub token; not needed for `file://` repositories
    pub token: Option<SecretString>,
    /// Repository owner on GitHub
    pub owner: Option<String>,
    /// Repository name, or `file:///path` for a local working tree
    pub repo: Option<String>,
}

impl Config {
    /// The configured repository.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRepo`] when none was configured.
    pub fn require_repo(&self) -> Result<&str, ConfigError> {
        self.repo.as_deref().ok_or(ConfigError::MissingRepo)
    }

    /// Whether `repo` names a local working tree.
    pub fn is_local(&self) -> bool {
        self.repo
            .as_deref()
            .is_some_and(|repo| repo.starts_with("file://"))
    }
}
