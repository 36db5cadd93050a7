//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read `VITALS_*` variables (and the `GITHUB_TOKEN` fallback) into a loader.
//! - Provide a helper that treats empty or whitespace-only values as unset.
//!
//! Invariants:
//! - Values set through builder methods are never overwritten here.
//! - Returned values are trimmed.
//! - Invalid numeric values return `ConfigError::InvalidValue`.

use secrecy::SecretString;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::MAX_MAX_RETRIES;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_number<T: std::str::FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        var: var.to_string(),
        message: "must be a non-negative integer".to_string(),
    })
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if loader.token().is_none()
        && let Some(token) = env_var_or_none("VITALS_TOKEN").or_else(|| env_var_or_none("GITHUB_TOKEN"))
    {
        loader.set_token(Some(SecretString::new(token.into())));
    }
    if loader.owner().is_none() {
        loader.set_owner(env_var_or_none("VITALS_OWNER"));
    }
    if loader.repo().is_none() {
        loader.set_repo(env_var_or_none("VITALS_REPO"));
    }
    if loader.api_url().is_none() {
        loader.set_api_url(env_var_or_none("VITALS_API_URL"));
    }
    if loader.branch().is_none() {
        loader.set_branch(env_var_or_none("VITALS_BRANCH"));
    }
    if loader.git().is_none() {
        loader.set_git(env_var_or_none("VITALS_GIT"));
    }
    if loader.timeout().is_none()
        && let Some(timeout) = env_var_or_none("VITALS_TIMEOUT")
    {
        let secs: u64 = parse_number("VITALS_TIMEOUT", &timeout)?;
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if loader.max_retries().is_none()
        && let Some(retries) = env_var_or_none("VITALS_MAX_RETRIES")
    {
        let value: usize = parse_number("VITALS_MAX_RETRIES", &retries)?;
        if value > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!("must be between 0 and {} (got {})", MAX_MAX_RETRIES, value),
            });
        }
        loader.set_max_retries(Some(value));
    }

    Ok(())
}
