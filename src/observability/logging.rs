//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` overrides the configured level
//! - Installing twice is an error, not a panic, so tests and embedding
//!   applications can call it freely

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter};

/// Filter directive for a configured level, e.g. `"info"` → `"tsdb_pool=info"`.
pub fn default_directive(level: &str) -> String {
    format!("tsdb_pool={level}")
}

/// Install the global tracing subscriber.
pub fn init_logging(level: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive(level))),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
