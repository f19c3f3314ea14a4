//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Pool and health subsystems produce:
//!     → tracing events (request ID, host, outcome)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Library code only emits; installing subscribers/recorders is left to
//!   the application (the CLI does both)
//! - Request ID ties together all attempts of one call

pub mod logging;
pub mod metrics;
