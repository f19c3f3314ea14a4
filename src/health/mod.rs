//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Passive health checks (passive.rs):
//!     Request failure observed by the pool
//!     → record failure, sample backoff delay
//!     → host out of rotation until the delay passes
//!
//! Active health checks (active.rs):
//!     Caller asks for ping()
//!     → probe every host concurrently
//!     → report online / rtt / version (state untouched)
//!
//! State (state.rs):
//!     Immutable HostHealth snapshot, swapped as a whole
//! ```
//!
//! # Design Decisions
//! - Recovery is time-based: no probe is needed to bring a host back
//! - Active probes are diagnostic and never change rotation
//! - Health state is per-host, not per-pool

pub mod active;
pub mod passive;
pub mod state;

pub use active::{PingStats, DEFAULT_PING_PATH};
pub use state::HostHealth;
