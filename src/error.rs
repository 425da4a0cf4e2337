use thiserror::Error;

/// Typed errors for calls against the Notion and LeetCode APIs.
///
/// `is_connectivity()` separates "the network is gone" from "the remote
/// answered with something we can't use", so each stage can choose between
/// waiting for the network and giving up with what it has.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The request never reached the server.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The request may have been delivered; the reply never came.
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP {status} from {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Unexpected response: {0}")]
    Protocol(String),

    #[error("Invalid problem id {0:?}")]
    InvalidProblemId(String),

    #[error(transparent)]
    Http(reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            SyncError::Connection(e.to_string())
        } else if e.is_timeout() {
            SyncError::Timeout(e.to_string())
        } else {
            SyncError::Http(e)
        }
    }
}

impl SyncError {
    /// Whether the failure means the network itself is unreachable.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, SyncError::Connection(_) | SyncError::Timeout(_))
    }

    /// Whether the request certainly had no effect on the server, so a
    /// non-idempotent call can be sent again.
    pub fn is_unsent(&self) -> bool {
        matches!(self, SyncError::Connection(_))
    }
}
