//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ClientError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-8 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use vitals_client::ClientError;
use vitals_engine::EngineError;

/// Structured exit codes for `vitals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure, including git failures.
    GeneralError = 1,

    /// Authentication failure - missing or rejected token.
    AuthenticationFailed = 2,

    /// Connection error - network, timeout, or DNS failure.
    ConnectionError = 3,

    /// Resource not found - report file, snapshot or tracked job.
    NotFound = 4,

    /// Validation error - bad path, cadence, report label or response.
    ValidationError = 5,

    /// Permission denied - token lacks access to the repository.
    PermissionDenied = 6,

    /// Rate limited - HTTP 429 Too Many Requests.
    RateLimited = 7,

    /// Service unavailable - HTTP 502, 503 or 504.
    ServiceUnavailable = 8,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }

    fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => ExitCode::ValidationError,
            401 => ExitCode::AuthenticationFailed,
            403 => ExitCode::PermissionDenied,
            404 => ExitCode::NotFound,
            429 => ExitCode::RateLimited,
            502..=504 => ExitCode::ServiceUnavailable,
            _ => ExitCode::GeneralError,
        }
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::AuthFailed(_) => ExitCode::AuthenticationFailed,

            ClientError::InvalidUrl(_) => ExitCode::ConnectionError,
            ClientError::HttpError(e) if e.is_connect() || e.is_timeout() => {
                ExitCode::ConnectionError
            }
            ClientError::HttpError(e) => e
                .status()
                .map_or(ExitCode::GeneralError, |s| Self::from_status(s.as_u16())),

            ClientError::NotFound(_) => ExitCode::NotFound,

            ClientError::InvalidResponse(_)
            | ClientError::InvalidNotifyConfig(_)
            | ClientError::InvalidPath(_)
            | ClientError::Engine(_) => ExitCode::ValidationError,

            ClientError::ApiError { status, .. }
            | ClientError::MaxRetriesExceeded { status, .. } => Self::from_status(*status),

            ClientError::Git { .. } | ClientError::Io(_) | ClientError::UnsupportedLocation(_) => {
                ExitCode::GeneralError
            }
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if cause.downcast_ref::<EngineError>().is_some() {
                return ExitCode::ValidationError;
            }
        }
        ExitCode::GeneralError
    }
}
