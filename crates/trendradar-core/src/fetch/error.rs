//! Per-platform error type and its coarse classification.

use std::time::Duration;
use thiserror::Error;

/// Coarse kind of a per-platform failure, as reported in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Request exceeded the configured timeout.
    Timeout,
    /// Any other network/transport failure (DNS, connect, proxy, HTTP status).
    Fetch,
    /// Body could not be decoded into the expected shape.
    Decode,
    /// Result could not be merged into the batch output.
    Merge,
}

/// Error for one platform's fetch-parse-merge cycle. Never aborts the batch;
/// the platform id lands in the failed list instead.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),
    #[error("request failed: {0}")]
    Transport(#[source] curl::Error),
    #[error("HTTP {0}")]
    Http(u32),
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("merge failed: {0}")]
    Merge(String),
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Timeout(_) => ErrorKind::Timeout,
            FetchError::Transport(_) | FetchError::Http(_) | FetchError::InvalidUrl(_) => {
                ErrorKind::Fetch
            }
            FetchError::Decode(_) | FetchError::Malformed(_) => ErrorKind::Decode,
            FetchError::Merge(_) => ErrorKind::Merge,
        }
    }
}
