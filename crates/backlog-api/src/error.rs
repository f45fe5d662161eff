//! Error types for Backlog API calls.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by [`BacklogClient`](crate::BacklogClient).
#[derive(Debug, Error)]
pub enum BacklogError {
    /// The request failed at the HTTP level.
    ///
    /// Covers both non-2xx responses and failures where no response arrived
    /// at all. `status` is `None` in the second case and `status_text` then
    /// holds the transport's description of the failure.
    #[error("Backlog API Error: {}", describe_failure(.status, .status_text))]
    Api {
        /// HTTP status code, if a response was received.
        status: Option<u16>,
        /// Reason phrase of the status, or the transport failure message.
        status_text: String,
    },

    /// A 2xx response body could not be decoded as the expected JSON.
    #[error("Failed to decode Backlog response: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured host does not form a valid API URL.
    #[error("Invalid Backlog URL: {0}")]
    InvalidUrl(String),

    /// The client configuration is unusable.
    #[error("Invalid Backlog configuration: {0}")]
    Config(String),
}

impl BacklogError {
    /// Build an [`BacklogError::Api`] from a non-success status code.
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        Self::Api {
            status: Some(status.as_u16()),
            status_text: status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string(),
        }
    }

    /// HTTP status code carried by this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BacklogError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key; keep it out of messages.
        let err = err.without_url();
        match err.status() {
            Some(status) => Self::from_status(status),
            None => Self::Api {
                status: None,
                status_text: err.to_string(),
            },
        }
    }
}

fn describe_failure(status: &Option<u16>, status_text: &str) -> String {
    match status {
        Some(code) => format!("{code} - {status_text}"),
        None => format!("no response - {status_text}"),
    }
}

/// Result type for Backlog API operations.
pub type Result<T> = std::result::Result<T, BacklogError>;
