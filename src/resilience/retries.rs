//! Retry classification.
//!
//! # Responsibilities
//! - Decide whether a host's answer ends the request or moves it on to the
//!   next candidate
//! - Bound the number of hosts tried per request
//!
//! # Design Decisions
//! - Transport errors and timeouts are always retryable
//! - 5xx is retryable: the host is overloaded or broken
//! - 4xx is final: the request itself is wrong, another host won't help

use reqwest::StatusCode;

/// How the pool treats a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// Request served; decode the body.
    Success,
    /// Caller error. Surface immediately, do not penalize the host.
    ClientError,
    /// Host error. Penalize the host and try the next candidate.
    ServerError,
}

/// Classify a response status.
pub fn classify_status(status: StatusCode) -> StatusClass {
    match status.as_u16() {
        500..=u16::MAX => StatusClass::ServerError,
        400..=499 => StatusClass::ClientError,
        _ => StatusClass::Success,
    }
}

/// Number of candidates a single request may try.
pub fn attempt_budget(max_attempts: Option<usize>, candidates: usize) -> usize {
    match max_attempts {
        Some(max) => candidates.min(max.max(1)),
        None => candidates,
    }
}
