//! Host health snapshot.
//!
//! # States
//! - Available: never failed, or the backoff window has elapsed
//! - Disabled: failed at `failed_at`, out of rotation until `retry_at`
//!
//! # State Transitions
//! ```text
//! Available → Disabled: request failure (delay sampled from backoff, backoff advanced)
//! Disabled  → Available: clock passes retry_at (no write needed)
//! any       → Available: request success (backoff reset, failure cleared)
//! ```
//!
//! Snapshots are immutable. A host replaces its snapshot as a whole, so the
//! backoff counter and the failure timestamps can never disagree.

use std::time::Instant;

use crate::resilience::BackoffStrategy;

/// Health state of one host at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct HostHealth<B> {
    backoff: B,
    failed_at: Option<Instant>,
    retry_at: Option<Instant>,
}

impl<B: BackoffStrategy> HostHealth<B> {
    /// A host with no failure history.
    pub fn new(backoff: B) -> Self {
        Self {
            backoff: backoff.reset(),
            failed_at: None,
            retry_at: None,
        }
    }

    /// Current backoff strategy.
    pub fn backoff(&self) -> &B {
        &self.backoff
    }

    /// When the most recent failure was recorded.
    pub fn failed_at(&self) -> Option<Instant> {
        self.failed_at
    }

    /// When the host becomes eligible again.
    pub fn retry_at(&self) -> Option<Instant> {
        self.retry_at
    }

    pub fn has_failed(&self) -> bool {
        self.failed_at.is_some()
    }

    pub fn is_available_at(&self, now: Instant) -> bool {
        match self.retry_at {
            None => true,
            Some(retry_at) => now >= retry_at,
        }
    }

    /// Snapshot after a failure observed at `now`.
    ///
    /// The delay is sampled from the backoff *before* it advances, so the
    /// first failure keeps the host out for the initial delay.
    pub fn failed(&self, now: Instant) -> Self {
        let delay = self.backoff.delay();
        Self {
            backoff: self.backoff.next(),
            failed_at: Some(now),
            retry_at: Some(now.checked_add(delay).unwrap_or(now)),
        }
    }

    /// Snapshot after a successful request.
    pub fn succeeded(&self) -> Self {
        Self::new(self.backoff.reset())
    }
}
