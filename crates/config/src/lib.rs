//! Configuration management for vitals.
//!
//! This crate provides the types and loader that turn `.env` files,
//! environment variables and command-line overrides into a validated
//! [`Config`] for the store clients.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{Config, ConnectionConfig};
