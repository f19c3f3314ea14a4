//! Load balancing subsystem.
//!
//! # Data Flow
//! ```text
//! Caller → pool.rs (HostPool::execute)
//!     → round_robin.rs (available hosts, rotated by the cursor)
//!     → host.rs (HTTP client of the chosen host)
//!     → on retryable failure: next candidate
//!     → Return decoded body or error
//! ```
//!
//! # Design Decisions
//! - Hosts live in an ordered Vec; the cursor is a plain modulo index
//! - Host list and per-host health are swapped atomically (arc-swap)
//! - Unavailable hosts are excluded from selection, never removed

pub mod host;
pub mod pool;
pub mod round_robin;

pub use host::{Host, TransportOptions};
pub use pool::{HostPool, PoolOptions};
pub use round_robin::RoundRobin;
