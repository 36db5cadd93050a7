//! Request execution with retry and error mapping.
//!
//! Responsibilities:
//! - Send read requests with exponential backoff on transient statuses.
//! - Send write requests exactly once.
//! - Map non-success responses to [`ClientError::ApiError`].
//!
//! Does NOT handle:
//! - Building URLs or request bodies (see the `github` module).
//!
//! Invariants:
//! - Backoff is `2^attempt` seconds (1s, 2s, 4s, ...).
//! - Only 429, 502, 503 and 504 are retried; everything else fails at once.

use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Header GitHub uses to identify a request in support tickets.
const REQUEST_ID_HEADER: &str = "X-GitHub-Request-Id";

/// GitHub error payload: `{"message": "...", "documentation_url": "..."}`.
#[derive(Debug, Deserialize)]
struct GitHubErrorBody {
    message: String,
}

/// Sends an idempotent request, retrying transient failures.
///
/// `max_retries` is the number of retries after the first attempt, so the
/// request is sent at most `max_retries + 1` times.
///
/// # Errors
///
/// Returns `ClientError::MaxRetriesExceeded` when every attempt returned a
/// retryable status, `ClientError::ApiError` for any other non-success
/// status, and `ClientError::HttpError` for transport failures.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
) -> Result<Response> {
    for attempt in 0..=max_retries {
        let Some(attempt_builder) = builder.try_clone() else {
            debug!("Request builder cannot be cloned, single attempt only");
            return send_request(builder).await;
        };

        let response = attempt_builder.send().await?;
        let status = response.status().as_u16();

        if response.status().is_success() {
            if attempt > 0 {
                debug!(attempt = attempt + 1, "Request succeeded after retry");
            }
            return Ok(response);
        }

        if !ClientError::is_retryable_status(status) {
            return Err(error_from_response(response).await);
        }

        if attempt == max_retries {
            debug!(attempts = attempt + 1, status, "Max retries exhausted");
            return Err(ClientError::MaxRetriesExceeded {
                attempts: attempt + 1,
                status,
            });
        }

        let backoff_secs = 2u64.pow(attempt as u32);
        debug!(
            attempt = attempt + 1,
            max_retries = max_retries + 1,
            backoff_secs,
            status,
            "Transient failure, retrying with exponential backoff"
        );
        tokio::time::sleep(tokio::time::Duration::from_secs(backoff_secs)).await;
    }

    Err(ClientError::MaxRetriesExceeded {
        attempts: max_retries + 1,
        status: 0,
    })
}

/// Sends a request once. Used for writes, which are not safe to repeat.
pub async fn send_request(builder: RequestBuilder) -> Result<Response> {
    let response = builder.send().await?;
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(error_from_response(response).await)
    }
}

async fn error_from_response(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let url = response.url().to_string();
    let request_id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    let message = match serde_json::from_str::<GitHubErrorBody>(&body) {
        Ok(parsed) => parsed.message,
        Err(_) => body,
    };

    ClientError::ApiError {
        status,
        url,
        message,
        request_id,
    }
}
