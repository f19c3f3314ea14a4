//! Active probes against live and dead hosts.

use std::time::Duration;

use tsdb_pool::{BackoffStrategy, PoolRequest};

mod common;
use common::Fixture;

#[tokio::test]
async fn test_pings_every_host_in_order() {
    let healthy = Fixture::start("healthy").await;
    let failing = Fixture::start("failing").await;
    failing.fail_with(502);
    let closed = common::closed_url().await;

    let pool = common::pool(&[healthy.url(), failing.url(), closed.clone()]);
    let stats = pool.ping(Duration::from_secs(2), None).await;

    assert_eq!(stats.len(), 3);
    assert_eq!(stats[0].url, healthy.url());
    assert!(stats[0].online);
    assert!(stats[0].rtt.is_some());
    assert_eq!(stats[0].version.as_deref(), Some(common::VERSION));

    assert_eq!(stats[1].url, failing.url());
    assert!(!stats[1].online);
    assert!(stats[1].rtt.is_some());
    assert_eq!(stats[1].version, None);

    assert_eq!(stats[2].url, closed);
    assert!(!stats[2].online);
    assert_eq!(stats[2].rtt, None);
}

#[tokio::test]
async fn test_ping_timeout_reports_offline() {
    let f = Fixture::start("slow").await;
    f.set_delay(Duration::from_millis(300));
    let pool = common::pool(&[f.url()]);

    let stats = pool.ping(Duration::from_millis(50), None).await;
    assert!(!stats[0].online);
    assert_eq!(stats[0].rtt, None);
    assert_eq!(stats[0].version, None);
}

#[tokio::test]
async fn test_ping_leaves_backoff_untouched() {
    let closed = common::closed_url().await;
    let f = Fixture::start("a").await;
    let pool = common::pool(&[closed, f.url()]);

    let stats = pool.ping(Duration::from_millis(500), None).await;
    assert!(!stats[0].online);
    assert!(pool.hosts_disabled().is_empty());

    pool.discard(&PoolRequest::get("/pool/502")).await.unwrap_err();
    pool.ping(Duration::from_millis(500), None).await;
    assert!(pool.hosts().iter().all(|h| h.health().backoff().failures() == 1));
    assert!(!pool.host_is_available());
}

#[tokio::test]
async fn test_ping_custom_path() {
    let f = Fixture::start("a").await;
    let pool = common::pool(&[f.url()]);

    let stats = pool.ping(Duration::from_secs(2), Some("/pool/204")).await;
    assert!(stats[0].online);
    assert_eq!(stats[0].version, None);
    assert_eq!(f.hits(), 1);
}

#[tokio::test]
async fn test_ping_empty_pool() {
    let pool = common::pool(&[]);
    assert!(pool.ping(Duration::from_secs(1), None).await.is_empty());
}
