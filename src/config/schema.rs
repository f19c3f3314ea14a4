//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the pool.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::load_balancer::host::TransportOptions;
use crate::resilience::BackoffOptions;

/// Root configuration for the host pool.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct PoolConfig {
    /// Database hosts, in rotation order.
    pub hosts: Vec<HostConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Retry configuration.
    pub retries: RetryConfig,

    /// Backoff applied to failing hosts.
    pub backoff: BackoffConfig,

    /// Ping (active health probe) settings.
    pub ping: PingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// One database host.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct HostConfig {
    /// Base URL (e.g., "http://127.0.0.1:8086").
    pub url: String,

    /// Skip TLS certificate verification.
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// TCP/TLS connect timeout in milliseconds.
    #[serde(default)]
    pub connect_timeout_ms: Option<u64>,

    /// User-Agent header override.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl HostConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            accept_invalid_certs: false,
            connect_timeout_ms: None,
            user_agent: None,
        }
    }

    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            accept_invalid_certs: self.accept_invalid_certs,
            connect_timeout: self.connect_timeout_ms.map(Duration::from_millis),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Default per-request timeout (send + full body) in milliseconds.
    pub request_ms: u64,
}

impl TimeoutConfig {
    pub fn request(&self) -> Duration {
        Duration::from_millis(self.request_ms)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_ms: 30_000 }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of hosts tried per request. Unset = every available host.
    pub max_attempts: Option<usize>,
}

/// Exponential backoff configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BackoffConfig {
    /// Delay after the first failure in milliseconds.
    pub initial_ms: u64,

    /// Maximum delay in milliseconds.
    pub max_ms: u64,

    /// Jitter magnitude (number of doublings that may be randomly skipped).
    pub jitter: f64,
}

impl BackoffConfig {
    pub fn options(&self) -> BackoffOptions {
        BackoffOptions {
            initial: Duration::from_millis(self.initial_ms),
            max: Duration::from_millis(self.max_ms),
            jitter: self.jitter,
        }
    }
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_ms: 300,
            max_ms: 10_000,
            jitter: 1.0,
        }
    }
}

/// Ping configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PingConfig {
    /// Path to probe.
    pub path: String,

    /// Per-probe timeout in milliseconds.
    pub timeout_ms: u64,
}

impl PingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for PingConfig {
    fn default() -> Self {
        Self {
            path: "/ping".to_string(),
            timeout_ms: 5_000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
