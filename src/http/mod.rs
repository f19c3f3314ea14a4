//! HTTP request/response handling.
//!
//! # Data Flow
//! ```text
//! Caller
//!     → request.rs (PoolRequest: method, path, query, body, timeout)
//!     → [load balancer resolves it against a host URL]
//!     → reqwest client of that host
//!     → response.rs (discard / text / JSON)
//!     → Caller
//! ```

pub mod request;
pub mod response;

pub use request::{PoolRequest, X_REQUEST_ID};
pub use response::{DecodeMode, Decoded};
