//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU16, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use url::Url;

use tsdb_pool::{BackoffOptions, ExponentialBackoff, HostPool, PoolOptions, TransportOptions};

/// Version reported by the fixture's `/ping`.
pub const VERSION: &str = "v1.0.0";

/// Backoff used by the pools under test.
pub const INITIAL_BACKOFF: Duration = Duration::from_millis(300);

#[derive(Debug, Default)]
struct FixtureState {
    name: String,
    hits: AtomicUsize,
    forced_status: AtomicU16,
    delay_ms: AtomicU64,
}

/// An in-process database stand-in bound to an ephemeral port.
///
/// Routes:
/// - `/ping` → 204 with version header
/// - `/pool/json`, `/pool/badjson`, `/pool/204`, `/pool/400`, `/pool/502`
/// - `/pool/name` → the fixture's name
/// - `/pool/echo` → method, query string and body as JSON
#[derive(Clone)]
pub struct Fixture {
    pub addr: SocketAddr,
    state: Arc<FixtureState>,
}

impl Fixture {
    pub async fn start(name: &str) -> Self {
        let state = Arc::new(FixtureState {
            name: name.to_string(),
            ..Default::default()
        });
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    pub fn url(&self) -> Url {
        format!("http://{}", self.addr).parse().unwrap()
    }

    /// Requests received so far, on any route.
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    /// Answer every request with `status` until [`Fixture::recover`].
    pub fn fail_with(&self, status: u16) {
        self.state.forced_status.store(status, Ordering::SeqCst);
    }

    pub fn recover(&self) {
        self.state.forced_status.store(0, Ordering::SeqCst);
    }

    /// Delay every response.
    pub fn set_delay(&self, delay: Duration) {
        self.state.delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }
}

async fn handle(
    State(state): State<Arc<FixtureState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    let delay = state.delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    let forced = state.forced_status.load(Ordering::SeqCst);
    if forced != 0 {
        let status = StatusCode::from_u16(forced).unwrap();
        return (status, "forced failure").into_response();
    }

    match uri.path() {
        "/ping" => (StatusCode::NO_CONTENT, [("x-influxdb-version", VERSION)]).into_response(),
        "/pool/json" => json_body(r#"{"ok":true}"#),
        "/pool/badjson" => json_body(r#"{"ok":"#),
        "/pool/204" => StatusCode::NO_CONTENT.into_response(),
        "/pool/400" => (StatusCode::BAD_REQUEST, "bad request").into_response(),
        "/pool/502" => StatusCode::BAD_GATEWAY.into_response(),
        "/pool/name" => state.name.clone().into_response(),
        "/pool/echo" => Json(json!({
            "method": method.as_str(),
            "query": uri.query().unwrap_or(""),
            "body": body,
            "request_id": headers.get("x-request-id").is_some(),
        }))
        .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

fn json_body(body: &'static str) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// URL of a local port with nothing listening on it.
pub async fn closed_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr).parse().unwrap()
}

pub fn backoff() -> ExponentialBackoff {
    ExponentialBackoff::new(BackoffOptions {
        initial: INITIAL_BACKOFF,
        max: Duration::from_secs(10),
        jitter: 0.0,
    })
}

pub fn pool_with(hosts: &[Url], options: PoolOptions) -> HostPool {
    let pool = HostPool::new(options, backoff());
    for url in hosts {
        pool.add_host(url.clone(), TransportOptions::default()).unwrap();
    }
    pool
}

pub fn pool(hosts: &[Url]) -> HostPool {
    pool_with(
        hosts,
        PoolOptions {
            timeout: Duration::from_secs(5),
            max_attempts: None,
        },
    )
}
