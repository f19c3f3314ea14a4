//! Error types returned by the host pool.

use std::time::Duration;
use reqwest::StatusCode;
use thiserror::Error;

/// Message used when a request finds no host in rotation.
pub const NO_HOST_AVAILABLE: &str = "No host available";

/// Why a single attempt against one host failed.
///
/// These never reach the caller directly. They are absorbed by the retry
/// walk and only show up as the `source` of
/// [`PoolError::ServiceNotAvailable`].
#[derive(Debug, Error)]
pub enum AttemptError {
    /// Connection refused, DNS failure, reset while reading the body, ...
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The host did not answer within the deadline.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The host answered with a 5xx status.
    #[error("{}", status_message(.status, .body))]
    Status { status: StatusCode, body: String },
}

/// Errors that can occur when executing a request through the pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// No host was in rotation, or every candidate failed.
    #[error("{message}")]
    ServiceNotAvailable {
        message: String,
        #[source]
        source: Option<AttemptError>,
    },

    /// A host rejected the request with a 4xx status.
    #[error("{}", status_message(.status, .body))]
    Request { status: StatusCode, body: String },

    /// The response body was not valid JSON.
    #[error("failed to parse response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// A host could not be registered.
    #[error("invalid host: {0}")]
    InvalidHost(String),
}

impl PoolError {
    /// No host was in rotation when the request was dispatched.
    pub fn no_host_available() -> Self {
        PoolError::ServiceNotAvailable {
            message: NO_HOST_AVAILABLE.to_string(),
            source: None,
        }
    }

    /// Every candidate was tried and none is left in rotation.
    ///
    /// `last` is the final failure seen, kept as the error source.
    pub fn exhausted(last: Option<AttemptError>) -> Self {
        PoolError::ServiceNotAvailable {
            message: NO_HOST_AVAILABLE.to_string(),
            source: last,
        }
    }

    /// Status code for errors that carry one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            PoolError::Request { status, .. } => Some(*status),
            PoolError::ServiceNotAvailable {
                source: Some(AttemptError::Status { status, .. }),
                ..
            } => Some(*status),
            _ => None,
        }
    }

    pub fn is_service_not_available(&self) -> bool {
        matches!(self, PoolError::ServiceNotAvailable { .. })
    }
}

/// Result type for pool operations.
pub type PoolResult<T> = Result<T, PoolError>;

fn status_message(status: &StatusCode, body: &str) -> String {
    format!(
        "A {} {} error occurred: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown"),
        body
    )
}
