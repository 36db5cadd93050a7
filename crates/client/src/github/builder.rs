//! Client builder for constructing [`GitHubClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Normalizing the API base URL (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeout, user agent)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by the `contents` and `git_data` modules)
//! - Retry logic for failed requests (handled by [`crate::request`])
//!
//! # Invariants
//! - The base URL is always normalized to have no trailing slashes
//! - The branch is never empty

use std::time::Duration;

use secrecy::SecretString;
use vitals_config::{
    Config,
    constants::{DEFAULT_API_URL, DEFAULT_BRANCH, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS, USER_AGENT},
};

use super::GitHubClient;
use crate::error::{ClientError, Result};

/// Builder for creating a new [`GitHubClient`].
///
/// Every option has a default: the public GitHub API, the `main` branch, a
/// 30 second timeout, three retries and no token.
pub struct GitHubClientBuilder {
    api_url: String,
    token: Option<SecretString>,
    branch: String,
    timeout: Duration,
    max_retries: usize,
}

impl Default for GitHubClientBuilder {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            branch: DEFAULT_BRANCH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl GitHubClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL. Trailing slashes will be removed.
    pub fn api_url(mut self, url: String) -> Self {
        self.api_url = url;
        self
    }

    /// Set the access token.
    pub fn token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    /// Set the branch to read from and commit to.
    pub fn branch(mut self, branch: String) -> Self {
        self.branch = branch;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retries for transient read failures.
    ///
    /// Default is 3 retries with exponential backoff (1s, 2s, 4s delays).
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Create a client builder from configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.api_url = config.connection.api_url.clone();
        self.token = config.token.clone();
        self.branch = config.connection.branch.clone();
        self.timeout = config.connection.timeout;
        self.max_retries = config.connection.max_retries;
        self
    }

    /// Normalize a base URL by removing trailing slashes.
    ///
    /// - `"https://api.github.com/"` -> `"https://api.github.com"`
    /// - `"http://localhost:8080//"` -> `"http://localhost:8080"`
    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`GitHubClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the API URL is blank or the
    /// branch is empty. Returns `ClientError::HttpError` if the HTTP client
    /// fails to build.
    pub fn build(self) -> Result<GitHubClient> {
        let api_url = Self::normalize_base_url(self.api_url);
        if api_url.trim().is_empty() {
            return Err(ClientError::InvalidUrl("api_url is required".to_string()));
        }
        let branch = self.branch.trim().to_string();
        if branch.is_empty() {
            return Err(ClientError::InvalidUrl("branch must not be empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(GitHubClient {
            http,
            api_url,
            token: self.token,
            branch,
            max_retries: self.max_retries,
        })
    }
}
