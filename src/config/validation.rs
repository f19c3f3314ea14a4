//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, backoff bounds ordered)
//! - Check host URLs are usable base URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PoolConfig → Result<(), Vec<ValidationError>>
//! - Duplicate hosts are allowed; each entry is its own rotation slot

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::PoolConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("host '{url}' is invalid: {reason}")]
    InvalidHost { url: String, reason: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("backoff.initial_ms ({initial_ms}) exceeds backoff.max_ms ({max_ms})")]
    BackoffBounds { initial_ms: u64, max_ms: u64 },

    #[error("backoff.jitter must be a finite, non-negative number (got {0})")]
    Jitter(f64),

    #[error("ping.path must start with '/' (got '{0}')")]
    PingPath(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &PoolConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for host in &config.hosts {
        if let Err(reason) = check_host_url(&host.url) {
            errors.push(ValidationError::InvalidHost {
                url: host.url.clone(),
                reason,
            });
        }
    }

    if config.timeouts.request_ms == 0 {
        errors.push(ValidationError::Zero("timeouts.request_ms"));
    }
    if config.retries.max_attempts == Some(0) {
        errors.push(ValidationError::Zero("retries.max_attempts"));
    }
    if config.backoff.initial_ms == 0 {
        errors.push(ValidationError::Zero("backoff.initial_ms"));
    }
    if config.backoff.initial_ms > config.backoff.max_ms {
        errors.push(ValidationError::BackoffBounds {
            initial_ms: config.backoff.initial_ms,
            max_ms: config.backoff.max_ms,
        });
    }
    if !config.backoff.jitter.is_finite() || config.backoff.jitter < 0.0 {
        errors.push(ValidationError::Jitter(config.backoff.jitter));
    }
    if config.ping.timeout_ms == 0 {
        errors.push(ValidationError::Zero("ping.timeout_ms"));
    }
    if !config.ping.path.starts_with('/') {
        errors.push(ValidationError::PingPath(config.ping.path.clone()));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_host_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::HostConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&PoolConfig::default()).is_ok());
    }

    #[test]
    fn test_duplicate_hosts_allowed() {
        let mut config = PoolConfig::default();
        config.hosts.push(HostConfig::new("http://127.0.0.1:8086"));
        config.hosts.push(HostConfig::new("http://127.0.0.1:8086"));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = PoolConfig::default();
        config.hosts.push(HostConfig::new("not a url"));
        config.hosts.push(HostConfig::new("ftp://127.0.0.1"));
        config.timeouts.request_ms = 0;
        config.retries.max_attempts = Some(0);
        config.backoff.initial_ms = 20_000;
        config.backoff.jitter = -1.0;
        config.ping.path = "ping".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 7);
        assert!(errors.contains(&ValidationError::Zero("timeouts.request_ms")));
        assert!(errors.contains(&ValidationError::Zero("retries.max_attempts")));
        assert!(errors.contains(&ValidationError::BackoffBounds {
            initial_ms: 20_000,
            max_ms: 10_000
        }));
        assert!(errors.contains(&ValidationError::Jitter(-1.0)));
        assert!(errors.contains(&ValidationError::PingPath("ping".into())));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = PoolConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MetricsAddress("nowhere".into())]);
    }
}
