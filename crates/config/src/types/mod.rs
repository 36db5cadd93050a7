//! Configuration type definitions for vitals.
//!
//! Invariants:
//! - The GitHub token is held in `secrecy::SecretString` so it never lands in logs.
//! - Durations serialize as whole seconds.

pub(crate) mod connection;

pub use connection::{Config, ConnectionConfig};
