//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tsdb_pool_requests_total` (counter): attempts by method, status, host
//! - `tsdb_pool_request_duration_seconds` (histogram): attempt latency by host
//! - `tsdb_pool_host_failures_total` (counter): failures recorded against a host
//! - `tsdb_pool_host_available` (gauge): 1=in rotation, 0=backing off. Set on
//!   failure, and back to 1 when the host is picked again after its window
//!   or serves a request. An idle host keeps its last value.
//! - `tsdb_pool_host_online` (gauge): last ping result, 1=online, 0=offline
//!
//! Recording goes through the `metrics` facade and is a no-op until a
//! recorder is installed, e.g. with [`init_metrics`].

use std::net::SocketAddr;
use std::time::Instant;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one attempt against a host. `status` is 0 when no response arrived.
pub fn record_request(method: &str, status: u16, host: &str, start: Instant) {
    counter!(
        "tsdb_pool_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "host" => host.to_string()
    )
    .increment(1);

    histogram!("tsdb_pool_request_duration_seconds", "host" => host.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_host_failure(host: &str) {
    counter!("tsdb_pool_host_failures_total", "host" => host.to_string()).increment(1);
}

pub fn record_host_available(host: &str, available: bool) {
    gauge!("tsdb_pool_host_available", "host" => host.to_string())
        .set(if available { 1.0 } else { 0.0 });
}

pub fn record_host_online(host: &str, online: bool) {
    gauge!("tsdb_pool_host_online", "host" => host.to_string())
        .set(if online { 1.0 } else { 0.0 });
}
