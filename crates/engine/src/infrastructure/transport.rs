//! Shared HTTP plumbing for backend adapters.

use std::time::Duration;

use reqwest::{Client, Response};

use crate::infrastructure::ports::BackendError;

/// Longest error body kept in a `BackendError::Status`.
const MAX_ERROR_BODY: usize = 512;

/// Build a client with a hard per-request timeout.
pub(crate) fn client_with_timeout(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Map a reqwest failure into the transport taxonomy.
pub(crate) fn map_transport(error: reqwest::Error, timeout: Duration) -> BackendError {
    if error.is_timeout() {
        BackendError::Timeout(timeout)
    } else {
        BackendError::Network(error.to_string())
    }
}

/// Fail on non-success status, keeping a truncated copy of the error body.
pub(crate) async fn ensure_success(
    response: Response,
    timeout: Duration,
) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .map_err(|e| map_transport(e, timeout))?;
    Err(BackendError::Status {
        status: status.as_u16(),
        body: truncate(&body, MAX_ERROR_BODY),
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    }
}

/// Reject empty or whitespace-only completions.
pub(crate) fn non_empty(text: String) -> Result<String, BackendError> {
    if text.trim().is_empty() {
        Err(BackendError::EmptyBody)
    } else {
        Ok(text)
    }
}
