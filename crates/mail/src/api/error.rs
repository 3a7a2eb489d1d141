//! Classified errors for remote calls

use crate::models::ThreadId;

/// Failure of a single remote call
///
/// Transient failures (`is_retryable`) are worth another attempt;
/// the rest should be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Connection, DNS, TLS or timeout failure
    #[error("network error: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("server returned HTTP {0}")]
    Status(u16),

    /// 401/403 - the bearer token was rejected
    #[error("not authorized (HTTP {0})")]
    Unauthorized(u16),

    /// The thread does not exist remotely (or in the mock set)
    #[error("thread {0} not found")]
    NotFound(ThreadId),

    /// The response body could not be decoded
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether retrying the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Status(code) => *code == 408 || *code == 429 || *code >= 500,
            ApiError::Unauthorized(_) | ApiError::NotFound(_) | ApiError::Decode(_) => false,
        }
    }

    /// Whether the failure should be surfaced instead of retried
    pub fn is_terminal(&self) -> bool {
        !self.is_retryable()
    }

    /// Map a non-success status code for a request about `thread`
    pub(crate) fn from_status(code: u16, thread: Option<&ThreadId>) -> Self {
        match (code, thread) {
            (401 | 403, _) => ApiError::Unauthorized(code),
            (404, Some(id)) => ApiError::NotFound(id.clone()),
            _ => ApiError::Status(code),
        }
    }
}
