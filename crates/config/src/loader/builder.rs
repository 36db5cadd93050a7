//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Collect settings from builder methods (CLI flags) and the environment.
//! - Validate and build the final `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables, so callers
//!   apply CLI overrides before `from_env()`.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::SecretString;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_API_URL, DEFAULT_BRANCH, DEFAULT_GIT, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS,
    MAX_MAX_RETRIES, MAX_TIMEOUT_SECS,
};
use crate::types::{Config, ConnectionConfig};

/// Configuration loader that builds config from overrides and environment variables.
#[derive(Default)]
pub struct ConfigLoader {
    token: Option<SecretString>,
    owner: Option<String>,
    repo: Option<String>,
    api_url: Option<String>,
    branch: Option<String>,
    git: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DotenvParse` for invalid syntax and
    /// `ConfigError::DotenvIo` when the file exists but cannot be read.
    /// Missing `.env` files are silently ignored.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    ///
    /// Only fills settings that were not already set through builder methods.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the GitHub token.
    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(SecretString::new(token.into()));
        self
    }

    /// Set the repository owner.
    pub fn with_owner(mut self, owner: String) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the repository name or `file://` path.
    pub fn with_repo(mut self, repo: String) -> Self {
        self.repo = Some(repo);
        self
    }

    /// Set the API base URL.
    pub fn with_api_url(mut self, url: String) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Set the branch.
    pub fn with_branch(mut self, branch: String) -> Self {
        self.branch = Some(branch);
        self
    }

    /// Set the git executable.
    pub fn with_git(mut self, git: String) -> Self {
        self.git = Some(git);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let api_url = validate_and_normalize_api_url(
            self.api_url.as_deref().unwrap_or(DEFAULT_API_URL),
        )?;

        let branch = self
            .branch
            .map(|b| b.trim().to_string())
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string());
        if branch.is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "branch".to_string(),
                message: "cannot be empty".to_string(),
            });
        }

        let connection = ConnectionConfig {
            api_url,
            branch,
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            git: self.git.unwrap_or_else(|| DEFAULT_GIT.to_string()),
        };
        Self::validate_connection(&connection)?;

        Ok(Config {
            connection,
            token: self.token,
            owner: non_blank(self.owner),
            repo: non_blank(self.repo),
        })
    }

    /// Checks timeout and retry bounds.
    fn validate_connection(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }

        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        if connection.max_retries > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!(
                    "must be between 0 and {} (got {})",
                    MAX_MAX_RETRIES, connection.max_retries
                ),
            });
        }

        Ok(())
    }

    // Internal accessor methods for use by other loader modules

    pub(crate) fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    pub(crate) fn owner(&self) -> Option<&String> {
        self.owner.as_ref()
    }

    pub(crate) fn repo(&self) -> Option<&String> {
        self.repo.as_ref()
    }

    pub(crate) fn api_url(&self) -> Option<&String> {
        self.api_url.as_ref()
    }

    pub(crate) fn branch(&self) -> Option<&String> {
        self.branch.as_ref()
    }

    pub(crate) fn git(&self) -> Option<&String> {
        self.git.as_ref()
    }

    pub(crate) fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn max_retries(&self) -> Option<usize> {
        self.max_retries
    }

    pub(crate) fn set_token(&mut self, token: Option<SecretString>) {
        self.token = token;
    }

    pub(crate) fn set_owner(&mut self, owner: Option<String>) {
        self.owner = owner;
    }

    pub(crate) fn set_repo(&mut self, repo: Option<String>) {
        self.repo = repo;
    }

    pub(crate) fn set_api_url(&mut self, url: Option<String>) {
        self.api_url = url;
    }

    pub(crate) fn set_branch(&mut self, branch: Option<String>) {
        self.branch = branch;
    }

    pub(crate) fn set_git(&mut self, git: Option<String>) {
        self.git = git;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_max_retries(&mut self, retries: Option<usize>) {
        self.max_retries = retries;
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validates and normalizes the API base URL.
///
/// Validation rules:
/// - Trim surrounding whitespace
/// - Parse as an absolute URL with an http or https scheme and a host
/// - Normalize by stripping trailing slash
fn validate_and_normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let invalid = |message: String| ConfigError::InvalidValue {
        var: "api_url".into(),
        message,
    };

    if trimmed.is_empty() {
        return Err(invalid("cannot be empty".into()));
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| {
        invalid(format!(
            "must be an absolute http(s) URL with a host (e.g. https://api.github.com): {e}"
        ))
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(invalid(format!(
            "scheme must be http or https (e.g. https://api.github.com), got: {scheme}"
        )));
    }

    if parsed.host_str().is_none() {
        return Err(invalid("host is required (e.g. https://api.github.com)".into()));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
