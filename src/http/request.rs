//! Requests dispatched through the pool.
//!
//! # Responsibilities
//! - Carry an already-serialized request (method, path, query, body)
//! - Carry the optional per-call timeout override
//! - Resolve the request against a host's base URL
//! - Generate the request ID shared by all attempts of one call

use std::time::Duration;
use reqwest::Method;
use url::Url;
use uuid::Uuid;

/// Header carrying the request ID to every host tried for one call.
pub const X_REQUEST_ID: &str = "x-request-id";

/// A fully-serialized request, independent of the host that will serve it.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolRequest {
    pub method: Method,
    /// Path relative to the host's base URL.
    pub path: String,
    pub query: Vec<(String, String)>,
    /// Already-escaped body payload.
    pub body: Option<String>,
    /// Overrides the pool's default timeout for this call.
    pub timeout: Option<Duration>,
}

impl PoolRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Append a query-string pair.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolve against a host base URL.
    ///
    /// The request path is appended to the base path, so a host registered
    /// as `http://db:8086/influx` serves `/query` at `/influx/query`. Any
    /// query or fragment on the base URL is replaced.
    pub fn url_for(&self, base: &Url) -> Url {
        let mut url = base.clone();
        let path = format!(
            "{}/{}",
            base.path().trim_end_matches('/'),
            self.path.trim_start_matches('/')
        );
        url.set_path(&path);
        url.set_fragment(None);
        url.set_query(None);
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        url
    }
}

/// New request ID for one `execute` call.
pub fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(s: &str) -> Url {
        s.parse().unwrap()
    }

    #[test]
    fn test_url_for_root_host() {
        let req = PoolRequest::get("/query");
        assert_eq!(req.url_for(&base("http://127.0.0.1:8086")).as_str(), "http://127.0.0.1:8086/query");
        assert_eq!(req.url_for(&base("http://127.0.0.1:8086/")).as_str(), "http://127.0.0.1:8086/query");
    }

    #[test]
    fn test_url_for_keeps_base_path() {
        let req = PoolRequest::get("ping");
        assert_eq!(
            req.url_for(&base("https://db.example.com/influx/")).as_str(),
            "https://db.example.com/influx/ping"
        );
    }

    #[test]
    fn test_query_encoding() {
        let req = PoolRequest::get("/query")
            .query("db", "metrics")
            .query("q", "SELECT * FROM \"cpu\" WHERE host = 'a&b'");
        let url = req.url_for(&base("http://127.0.0.1:8086/?stale=1#frag"));

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, req.query);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_builder() {
        let req = PoolRequest::post("/write")
            .query("db", "metrics")
            .body("cpu value=1")
            .timeout(Duration::from_millis(50));
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.body.as_deref(), Some("cpu value=1"));
        assert_eq!(req.timeout, Some(Duration::from_millis(50)));
    }

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(new_request_id(), new_request_id());
    }
}
