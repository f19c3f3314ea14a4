//! Passive health checking (failure detection).
//!
//! # Responsibilities
//! - Observe request outcomes reported by the pool
//! - Update the host's health snapshot
//! - Log and export every state change
//!
//! # Design Decisions
//! - Only transport errors, timeouts and 5xx count as failures
//! - 4xx are NOT failures (client error, not host) and never reach here

use std::time::Instant;

use crate::error::AttemptError;
use crate::load_balancer::host::Host;
use crate::observability::metrics;
use crate::resilience::BackoffStrategy;

/// Take `host` out of rotation after a retryable failure.
pub fn report_failure<B: BackoffStrategy>(host: &Host<B>, cause: &AttemptError, request_id: &str) {
    let now = Instant::now();
    let health = host.record_failure(now);
    let delay = health
        .retry_at()
        .map(|retry_at| retry_at.saturating_duration_since(now))
        .unwrap_or_default();

    tracing::warn!(
        request_id = %request_id,
        host = %host.url(),
        error = %cause,
        failures = health.backoff().failures(),
        delay = ?delay,
        "Host failed, taking it out of rotation"
    );

    metrics::record_host_failure(host.url().as_str());
    metrics::record_host_available(host.url().as_str(), false);
}

/// Mark `host` as back in rotation once its backoff window has passed.
///
/// Called when the pool picks the host as a candidate again, before the
/// outcome of that attempt is known.
pub fn report_eligible<B: BackoffStrategy>(host: &Host<B>, request_id: &str) {
    let health = host.health();
    if health.has_failed() && health.is_available_at(Instant::now()) {
        tracing::debug!(
            request_id = %request_id,
            host = %host.url(),
            failures = health.backoff().failures(),
            "Host back in rotation after backoff"
        );
        metrics::record_host_available(host.url().as_str(), true);
    }
}

/// Clear `host`'s failure history after it served a request.
pub fn report_success<B: BackoffStrategy>(host: &Host<B>, request_id: &str) {
    if host.record_success() {
        tracing::info!(
            request_id = %request_id,
            host = %host.url(),
            "Host recovered, backoff reset"
        );
        metrics::record_host_available(host.url().as_str(), true);
    }
}
