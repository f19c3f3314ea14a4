//! Host abstraction.
//!
//! # Responsibilities
//! - Represent a single database endpoint
//! - Own the HTTP client built from the host's transport options
//! - Hold the current health snapshot and swap it atomically

use std::sync::Arc;
use std::time::{Duration, Instant};
use arc_swap::ArcSwap;
use url::Url;

use crate::error::{PoolError, PoolResult};
use crate::health::state::HostHealth;
use crate::resilience::{BackoffStrategy, ExponentialBackoff};

/// Transport-level settings for one host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOptions {
    /// Skip TLS certificate verification.
    pub accept_invalid_certs: bool,
    /// Timeout for establishing the TCP/TLS connection.
    pub connect_timeout: Option<Duration>,
    /// User-Agent header sent with every request.
    pub user_agent: Option<String>,
}

/// A single database host.
#[derive(Debug)]
pub struct Host<B = ExponentialBackoff> {
    url: Url,
    options: TransportOptions,
    client: reqwest::Client,
    health: ArcSwap<HostHealth<B>>,
}

impl<B: BackoffStrategy> Host<B> {
    /// Create a host with no failure history.
    pub fn new(url: Url, options: TransportOptions, backoff: B) -> PoolResult<Self> {
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(PoolError::InvalidHost(format!(
                "{url}: expected an http or https URL"
            )));
        }

        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(options.accept_invalid_certs);
        if let Some(timeout) = options.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(user_agent) = &options.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let client = builder
            .build()
            .map_err(|e| PoolError::InvalidHost(format!("{url}: {e}")))?;

        Ok(Self {
            url,
            options,
            client,
            health: ArcSwap::from_pointee(HostHealth::new(backoff)),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn options(&self) -> &TransportOptions {
        &self.options
    }

    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Current health snapshot.
    pub fn health(&self) -> Arc<HostHealth<B>> {
        self.health.load_full()
    }

    pub fn is_available(&self) -> bool {
        self.is_available_at(Instant::now())
    }

    pub fn is_available_at(&self, now: Instant) -> bool {
        self.health.load().is_available_at(now)
    }

    /// Record a failure observed at `now` and return the installed snapshot.
    ///
    /// Concurrent failures are all counted: the update is retried against
    /// the latest snapshot until it wins the swap.
    pub fn record_failure(&self, now: Instant) -> Arc<HostHealth<B>> {
        self.update(|current| current.failed(now))
    }

    /// Record a success. Returns true if the host had failures to clear.
    pub fn record_success(&self) -> bool {
        if !self.health.load().has_failed() {
            return false;
        }
        let previous = self.health.rcu(|current| Arc::new(current.succeeded()));
        previous.has_failed()
    }

    fn update(&self, f: impl Fn(&HostHealth<B>) -> HostHealth<B>) -> Arc<HostHealth<B>> {
        let mut installed = None;
        self.health.rcu(|current| {
            let next = Arc::new(f(&**current));
            installed = Some(Arc::clone(&next));
            next
        });
        installed.unwrap_or_else(|| self.health.load_full())
    }
}
