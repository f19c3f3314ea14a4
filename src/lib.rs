//! Client-side host pool for a time-series database reached over HTTP.
//!
//! Requests are spread round-robin over the registered hosts. A host that
//! fails (transport error, timeout, 5xx) is taken out of rotation for an
//! exponentially growing delay and the request moves on to the next
//! candidate. A 4xx answer is returned as-is and never penalizes the host.

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod load_balancer;
pub mod observability;
pub mod resilience;

pub use config::PoolConfig;
pub use error::{PoolError, PoolResult};
pub use health::PingStats;
pub use http::{DecodeMode, Decoded, PoolRequest};
pub use load_balancer::{Host, HostPool, PoolOptions, TransportOptions};
pub use resilience::{BackoffOptions, BackoffStrategy, ExponentialBackoff};
