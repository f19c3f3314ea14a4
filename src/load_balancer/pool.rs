//! Host pool management.
//!
//! # Responsibilities
//! - Keep the ordered list of registered hosts
//! - Pick candidates in round-robin order for each request
//! - Walk candidates until one serves the request, recording failures and
//!   successes on the hosts as it goes
//! - Answer availability queries and run pings

use std::sync::Arc;
use std::time::{Duration, Instant};
use arc_swap::ArcSwap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::PoolConfig;
use crate::error::{AttemptError, PoolError, PoolResult};
use crate::health::active::{self, PingStats};
use crate::health::passive::{report_eligible, report_failure, report_success};
use crate::http::request::{new_request_id, PoolRequest, X_REQUEST_ID};
use crate::http::response::{self, DecodeMode, Decoded};
use crate::load_balancer::host::{Host, TransportOptions};
use crate::load_balancer::round_robin::RoundRobin;
use crate::observability::metrics;
use crate::resilience::retries::{attempt_budget, classify_status, StatusClass};
use crate::resilience::timeouts::with_deadline;
use crate::resilience::{BackoffStrategy, ExponentialBackoff};

/// Pool-wide request settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolOptions {
    /// Default timeout for one attempt (send + full body).
    pub timeout: Duration,
    /// Maximum hosts tried per request. `None` tries every available host.
    pub max_attempts: Option<usize>,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: None,
        }
    }
}

/// Distributes requests over a set of database hosts with failover.
#[derive(Debug)]
pub struct HostPool<B = ExponentialBackoff> {
    hosts: ArcSwap<Vec<Arc<Host<B>>>>,
    balancer: RoundRobin,
    /// Template for the backoff state of newly added hosts.
    backoff: B,
    options: PoolOptions,
}

impl HostPool<ExponentialBackoff> {
    /// Build a pool with every host from a validated configuration.
    pub fn from_config(config: &PoolConfig) -> PoolResult<Self> {
        let pool = Self::new(
            PoolOptions {
                timeout: config.timeouts.request(),
                max_attempts: config.retries.max_attempts,
            },
            ExponentialBackoff::new(config.backoff.options()),
        );

        for host in &config.hosts {
            let url = Url::parse(&host.url)
                .map_err(|e| PoolError::InvalidHost(format!("{}: {}", host.url, e)))?;
            pool.add_host(url, host.transport_options())?;
        }

        Ok(pool)
    }
}

impl Default for HostPool<ExponentialBackoff> {
    fn default() -> Self {
        Self::new(PoolOptions::default(), ExponentialBackoff::default())
    }
}

impl<B: BackoffStrategy> HostPool<B> {
    /// Create an empty pool.
    pub fn new(options: PoolOptions, backoff: B) -> Self {
        Self {
            hosts: ArcSwap::from_pointee(Vec::new()),
            balancer: RoundRobin::new(),
            backoff: backoff.reset(),
            options,
        }
    }

    pub fn options(&self) -> &PoolOptions {
        &self.options
    }

    /// Register a host at the end of the rotation order.
    pub fn add_host(&self, url: Url, options: TransportOptions) -> PoolResult<Arc<Host<B>>> {
        let host = Arc::new(Host::new(url, options, self.backoff.reset())?);
        self.hosts.rcu(|hosts| {
            let mut next = Vec::clone(hosts);
            next.push(Arc::clone(&host));
            next
        });

        tracing::info!(host = %host.url(), "Host added to pool");
        metrics::record_host_available(host.url().as_str(), true);
        Ok(host)
    }

    /// Remove every host registered with `url`. Returns how many were removed.
    ///
    /// Administrative only; failing hosts are never removed automatically.
    pub fn remove_host(&self, url: &Url) -> usize {
        let mut removed = 0;
        self.hosts.rcu(|hosts| {
            let kept: Vec<_> = hosts
                .iter()
                .filter(|host| host.url() != url)
                .cloned()
                .collect();
            removed = hosts.len() - kept.len();
            kept
        });

        if removed > 0 {
            tracing::info!(host = %url, removed, "Host removed from pool");
        }
        removed
    }

    /// All registered hosts in rotation order.
    pub fn hosts(&self) -> Vec<Arc<Host<B>>> {
        self.hosts.load().iter().cloned().collect()
    }

    /// True if at least one host is currently in rotation.
    ///
    /// Advisory only: a request re-checks availability when dispatched.
    pub fn host_is_available(&self) -> bool {
        let now = Instant::now();
        self.hosts.load().iter().any(|host| host.is_available_at(now))
    }

    /// Hosts currently in rotation.
    pub fn hosts_available(&self) -> Vec<Arc<Host<B>>> {
        let now = Instant::now();
        self.hosts
            .load()
            .iter()
            .filter(|host| host.is_available_at(now))
            .cloned()
            .collect()
    }

    /// Hosts currently backing off.
    pub fn hosts_disabled(&self) -> Vec<Arc<Host<B>>> {
        let now = Instant::now();
        self.hosts
            .load()
            .iter()
            .filter(|host| !host.is_available_at(now))
            .cloned()
            .collect()
    }

    /// Execute a request and decode the body according to `mode`.
    pub async fn execute(&self, request: &PoolRequest, mode: DecodeMode) -> PoolResult<Decoded> {
        let body = self.dispatch(request).await?;
        response::decode(mode, &body)
    }

    /// Execute a request and ignore the response body.
    pub async fn discard(&self, request: &PoolRequest) -> PoolResult<()> {
        self.dispatch(request).await.map(|_| ())
    }

    /// Execute a request and return the response body as text.
    pub async fn text(&self, request: &PoolRequest) -> PoolResult<String> {
        let body = self.dispatch(request).await?;
        Ok(response::decode_text(&body))
    }

    /// Execute a request and parse the response body as JSON.
    pub async fn json<T: DeserializeOwned>(&self, request: &PoolRequest) -> PoolResult<T> {
        let body = self.dispatch(request).await?;
        response::decode_json(&body)
    }

    /// Probe every host concurrently. Results follow registration order.
    pub async fn ping(&self, timeout: Duration, path: Option<&str>) -> Vec<PingStats> {
        let hosts = self.hosts();
        active::ping_all(&hosts, timeout, path).await
    }

    /// Walk the candidates until one host serves the request.
    async fn dispatch(&self, request: &PoolRequest) -> PoolResult<Vec<u8>> {
        let request_id = new_request_id();
        let candidates = {
            let hosts = self.hosts.load();
            self.balancer.candidates(hosts.as_slice(), Instant::now())
        };

        if candidates.is_empty() {
            tracing::warn!(
                request_id = %request_id,
                method = %request.method,
                path = %request.path,
                "No host available"
            );
            return Err(PoolError::no_host_available());
        }

        let deadline = request.timeout.unwrap_or(self.options.timeout);
        let budget = attempt_budget(self.options.max_attempts, candidates.len());
        let mut last_error = None;

        for (attempt, host) in candidates.into_iter().take(budget).enumerate() {
            let start = Instant::now();
            tracing::debug!(
                request_id = %request_id,
                attempt = attempt + 1,
                host = %host.url(),
                method = %request.method,
                path = %request.path,
                "Dispatching request"
            );
            report_eligible(&host, &request_id);

            let cause = match self.attempt(&host, request, &request_id, deadline).await {
                Ok((status, body)) => {
                    metrics::record_request(
                        request.method.as_str(),
                        status.as_u16(),
                        host.url().as_str(),
                        start,
                    );
                    match classify_status(status) {
                        StatusClass::Success => {
                            report_success(&host, &request_id);
                            return Ok(body);
                        }
                        StatusClass::ClientError => {
                            tracing::debug!(
                                request_id = %request_id,
                                host = %host.url(),
                                status = %status,
                                "Request rejected by host"
                            );
                            return Err(PoolError::Request {
                                status,
                                body: response::decode_text(&body),
                            });
                        }
                        StatusClass::ServerError => AttemptError::Status {
                            status,
                            body: response::decode_text(&body),
                        },
                    }
                }
                Err(cause) => {
                    metrics::record_request(request.method.as_str(), 0, host.url().as_str(), start);
                    cause
                }
            };

            report_failure(&host, &cause, &request_id);
            last_error = Some(cause);
        }

        tracing::warn!(
            request_id = %request_id,
            method = %request.method,
            path = %request.path,
            attempts = budget,
            "All candidate hosts failed"
        );
        Err(PoolError::exhausted(last_error))
    }

    /// One call against one host, bound to `deadline`.
    async fn attempt(
        &self,
        host: &Host<B>,
        request: &PoolRequest,
        request_id: &str,
        deadline: Duration,
    ) -> Result<(StatusCode, Vec<u8>), AttemptError> {
        let mut builder = host
            .client()
            .request(request.method.clone(), request.url_for(host.url()))
            .header(X_REQUEST_ID, request_id);
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        with_deadline(deadline, async move {
            let response = builder.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, AttemptError>((status, body.to_vec()))
        })
        .await
    }
}
