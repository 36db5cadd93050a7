//! Error types for the status engine.
//!
//! Every variant is a configuration error: something wrong with what the
//! caller asked the engine to track, or a persisted snapshot it cannot read.
//! Fetch failures and malformed metadata are not errors at this level; the
//! resolver folds them into a MISSING status.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Configuration errors raised while constructing engine inputs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The path does not end in a supported markup extension.
    #[error("Unsupported file extension for '{0}': expected .md or .org")]
    UnsupportedExtension(String),

    /// The cadence is neither a duration like `10m` nor a valid cron expression.
    #[error("Invalid cadence '{cadence}': {message}")]
    InvalidCadence { cadence: String, message: String },

    /// A job or summary path was empty.
    #[error("Path cannot be empty")]
    EmptyPath,

    /// The repository location could not be interpreted.
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// A report label given by a caller was not GOOD or BAD.
    #[error("Invalid report '{0}': expected GOOD or BAD")]
    InvalidReport(String),

    /// A persisted dashboard snapshot could not be encoded or decoded.
    #[error("Invalid dashboard snapshot: {0}")]
    InvalidSnapshot(String),
}
