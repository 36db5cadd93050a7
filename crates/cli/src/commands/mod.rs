//! CLI command implementations.

pub mod check_files;
pub mod dashboard;
pub mod jobs;
pub mod post;

use anyhow::{Context, Result};
use vitals_client::Store;
use vitals_config::Config;
use vitals_engine::Location;

/// Repository named by `--owner` / `--repo`.
pub fn configured_location(config: &Config) -> Result<Location> {
    let repo = config.require_repo()?;
    Location::parse(config.owner.as_deref(), repo).context("Invalid repository")
}

/// Store for the configured repository.
pub fn open_store(config: &Config) -> Result<Store> {
    let location = configured_location(config)?;
    Store::open(&location, config).with_context(|| format!("Failed to open {location}"))
}
