//! GitHub REST API client for reading and writing repository files.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `contents`: Single-file reads and writes through the contents API
//! - `git_data`: Multi-file commits through the git data API
//!
//! # What this module does NOT handle:
//! - Retry policy (delegated to [`crate::request`])
//! - Choosing between GitHub and a local repository (see [`crate::store`])
//!
//! # Invariants
//! - Every request carries `Accept: application/vnd.github.v3+json` and the
//!   `vitals` user agent; `Authorization` is sent only when a token is set.
//! - Reads go through the retry helper, writes are sent once.

pub mod builder;
mod contents;
mod git_data;

use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};

pub use contents::FileContent;

use crate::error::{ClientError, Result};
use crate::url_encoding::encode_path_segment;

/// Media type requested from the GitHub API.
pub(crate) const ACCEPT: &str = "application/vnd.github.v3+json";

/// GitHub REST API client bound to one branch.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use vitals_client::GitHubClient;
///
/// let client = GitHubClient::builder()
///     .api_url("https://api.github.com".to_string())
///     .token(SecretString::new("ghp_...".to_string().into()))
///     .build()?;
/// let file = client.get_file("acme", "status", "nightly.md").await?;
/// ```
#[derive(Debug, Clone)]
pub struct GitHubClient {
    pub(crate) http: reqwest::Client,
    pub(crate) api_url: String,
    pub(crate) token: Option<SecretString>,
    pub(crate) branch: String,
    pub(crate) max_retries: usize,
}

impl GitHubClient {
    /// Create a new client builder.
    pub fn builder() -> builder::GitHubClientBuilder {
        builder::GitHubClientBuilder::new()
    }

    /// Get the API base URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Branch that reads and writes target.
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Whether requests are authenticated.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// `{api_url}/repos/{owner}/{repo}`
    pub(crate) fn repo_url(&self, owner: &str, repo: &str) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_url,
            encode_path_segment(owner),
            encode_path_segment(repo)
        )
    }

    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, ACCEPT);
        match &self.token {
            Some(token) => builder.header(
                reqwest::header::AUTHORIZATION,
                format!("token {}", token.expose_secret()),
            ),
            None => builder,
        }
    }

    /// Writes always need credentials; fail before touching the network.
    pub(crate) fn require_token(&self) -> Result<()> {
        if self.token.is_some() {
            Ok(())
        } else {
            Err(ClientError::AuthFailed(
                "a GitHub token is required to write (set VITALS_TOKEN or --token)".to_string(),
            ))
        }
    }
}
