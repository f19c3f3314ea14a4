//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Call to a host:
//!     → timeouts.rs (bind the call to a deadline)
//!     → retries.rs (classify the outcome: success / final / retryable)
//!     → On retryable failure: backoff.rs (how long the host stays out)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every call to a host has a deadline
//! - Retries move to another host immediately, there is no sleep between attempts
//! - Backoff is per host and only decides when the host is eligible again

pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use backoff::{BackoffOptions, BackoffStrategy, ExponentialBackoff};
