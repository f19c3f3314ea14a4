//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → PoolConfig (validated, immutable)
//!     → HostPool::from_config
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; the pool owns its state afterwards
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{BackoffConfig, HostConfig, PingConfig, PoolConfig, RetryConfig, TimeoutConfig};
pub use validation::{validate_config, ValidationError};
