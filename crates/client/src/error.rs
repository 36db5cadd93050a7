//! Error types for the store clients.

use thiserror::Error;
use vitals_engine::EngineError;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to GitHub or a local git repository.
#[derive(Error, Debug)]
pub enum ClientError {
    /// No usable credentials for an operation that needs them.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API error response from GitHub.
    #[error("API error ({status}) at {url}: {message}{}", .request_id.as_ref().map(|id| format!(" [Request ID: {id}]")).unwrap_or_default())]
    ApiError {
        status: u16,
        url: String,
        message: String,
        request_id: Option<String>,
    },

    /// Response did not have the expected shape or encoding.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Maximum retries exceeded.
    #[error("Maximum retries exceeded ({attempts} attempts, last status {status})")]
    MaxRetriesExceeded { attempts: usize, status: u16 },

    /// The `--notify` provider mapping could not be parsed.
    #[error("Invalid notify config: {0}")]
    InvalidNotifyConfig(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A repository-relative path was absolute or escaped the repository.
    #[error("Invalid path '{0}': must be relative to the repository root")]
    InvalidPath(String),

    /// File not found in a local repository.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A git command exited unsuccessfully.
    #[error("git {command} failed: {message}")]
    Git { command: String, message: String },

    /// Filesystem error in a local repository.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The store does not serve the requested location.
    #[error("Location {0} is not served by this store")]
    UnsupportedLocation(String),

    /// Invalid job, path or snapshot.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ClientError {
    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError(e) => e.is_timeout() || e.is_connect(),
            Self::ApiError { status, .. } => Self::is_retryable_status(*status),
            _ => false,
        }
    }

    /// Check if an HTTP status code is retryable.
    ///
    /// Retryable status codes:
    /// - 429: Too Many Requests (rate limiting)
    /// - 502: Bad Gateway (transient server error)
    /// - 503: Service Unavailable (transient server error)
    /// - 504: Gateway Timeout (transient server error)
    ///
    /// 500 and 4xx fail immediately.
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 502 | 503 | 504)
    }

    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::AuthFailed(_) | Self::ApiError { status: 401, .. }
        )
    }

    /// Check if the requested file or ref does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::ApiError { status: 404, .. })
    }

    /// HTTP status behind this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } | Self::MaxRetriesExceeded { status, .. } => {
                Some(*status)
            }
            Self::NotFound(_) => Some(404),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Short description used as the note of a job whose artifact could not
    /// be fetched, e.g. `error: (status_code=404) NOT FOUND`.
    pub fn fetch_description(&self) -> String {
        match self {
            Self::HttpError(e) if e.status().is_none() => format!("network error: {e}"),
            _ => match self.status() {
                Some(status) => {
                    let reason = reqwest::StatusCode::from_u16(status)
                        .ok()
                        .and_then(|s| s.canonical_reason())
                        .unwrap_or("UNKNOWN");
                    format!(
                        "error: (status_code={status}) {}",
                        reason.to_ascii_uppercase()
                    )
                }
                None => format!("error: {self}"),
            },
        }
    }
}
