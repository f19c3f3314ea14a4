//! Active health checking (ping).
//!
//! # Responsibilities
//! - Probe every registered host concurrently
//! - Report reachability, round-trip time and server version
//!
//! Probes are diagnostic only. They never touch a host's backoff state, and
//! a failed probe is reported as `online: false` rather than an error.

use std::sync::Arc;
use std::time::{Duration, Instant};
use futures_util::future::join_all;
use tokio::time;
use url::Url;

use crate::http::request::PoolRequest;
use crate::load_balancer::host::Host;
use crate::observability::metrics;
use crate::resilience::BackoffStrategy;

/// Path probed when the caller does not pass one.
pub const DEFAULT_PING_PATH: &str = "/ping";

/// Response header carrying the server version.
pub const VERSION_HEADER: &str = "x-influxdb-version";

/// Result of probing one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingStats {
    pub url: Url,
    /// The host answered with a status below 300.
    pub online: bool,
    /// Time until response headers arrived. `None` if nothing arrived.
    pub rtt: Option<Duration>,
    pub version: Option<String>,
}

impl PingStats {
    fn offline(url: Url) -> Self {
        Self {
            url,
            online: false,
            rtt: None,
            version: None,
        }
    }
}

/// Probe one host.
pub async fn probe<B: BackoffStrategy>(host: &Host<B>, timeout: Duration, path: &str) -> PingStats {
    let url = PoolRequest::get(path).url_for(host.url());
    let start = Instant::now();

    let stats = match time::timeout(timeout, host.client().get(url).send()).await {
        Ok(Ok(response)) => {
            let status = response.status();
            let version = response
                .headers()
                .get(VERSION_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            tracing::debug!(host = %host.url(), status = %status, "Ping answered");
            PingStats {
                url: host.url().clone(),
                online: status.as_u16() < 300,
                rtt: Some(start.elapsed()),
                version,
            }
        }
        Ok(Err(e)) => {
            tracing::debug!(host = %host.url(), error = %e, "Ping failed: connection error");
            PingStats::offline(host.url().clone())
        }
        Err(_) => {
            tracing::debug!(host = %host.url(), timeout = ?timeout, "Ping failed: timeout");
            PingStats::offline(host.url().clone())
        }
    };

    metrics::record_host_online(host.url().as_str(), stats.online);
    stats
}

/// Probe all hosts concurrently. Results follow the order of `hosts`.
pub async fn ping_all<B: BackoffStrategy>(
    hosts: &[Arc<Host<B>>],
    timeout: Duration,
    path: Option<&str>,
) -> Vec<PingStats> {
    let path = path.unwrap_or(DEFAULT_PING_PATH);
    join_all(hosts.iter().map(|host| probe(host, timeout, path))).await
}
