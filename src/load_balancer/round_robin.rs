//! Round-robin candidate selection.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use crate::load_balancer::host::Host;
use crate::resilience::BackoffStrategy;

/// Round-robin selector.
/// Stores an internal counter to rotate the starting host between requests.
#[derive(Debug, Default)]
pub struct RoundRobin {
    counter: AtomicUsize,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hosts available at `now`, in rotation order.
    ///
    /// The walk starts at the cursor and wraps once around the list. The
    /// cursor advances by one on every call, whatever the request's outcome.
    pub fn candidates<B: BackoffStrategy>(
        &self,
        hosts: &[Arc<Host<B>>],
        now: Instant,
    ) -> Vec<Arc<Host<B>>> {
        if hosts.is_empty() {
            return Vec::new();
        }

        let len = hosts.len();
        let start = self.counter.fetch_add(1, Ordering::Relaxed) % len;

        (0..len)
            .map(|i| &hosts[(start + i) % len])
            .filter(|host| host.is_available_at(now))
            .cloned()
            .collect()
    }
}
