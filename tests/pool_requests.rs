//! Request execution and body decoding through the pool.

use serde::Deserialize;
use serde_json::{json, Value};

use tsdb_pool::{DecodeMode, Decoded, PoolError, PoolRequest};

mod common;
use common::Fixture;

#[derive(Debug, Deserialize, PartialEq)]
struct Status {
    ok: bool,
}

#[tokio::test]
async fn test_text_response() {
    let f = Fixture::start("a").await;
    let pool = common::pool(&[f.url(), f.url()]);

    let body = pool.text(&PoolRequest::get("/pool/json")).await.unwrap();
    assert_eq!(body, r#"{"ok":true}"#);
}

#[tokio::test]
async fn test_json_response() {
    let f = Fixture::start("a").await;
    let pool = common::pool(&[f.url()]);

    let status: Status = pool.json(&PoolRequest::get("/pool/json")).await.unwrap();
    assert_eq!(status, Status { ok: true });

    let decoded = pool
        .execute(&PoolRequest::get("/pool/json"), DecodeMode::Json)
        .await
        .unwrap();
    assert_eq!(decoded, Decoded::Json(json!({ "ok": true })));
}

#[tokio::test]
async fn test_discard_response() {
    let f = Fixture::start("a").await;
    let pool = common::pool(&[f.url()]);

    pool.discard(&PoolRequest::get("/pool/204")).await.unwrap();
    let decoded = pool
        .execute(&PoolRequest::get("/pool/json"), DecodeMode::Discard)
        .await
        .unwrap();
    assert_eq!(decoded, Decoded::Empty);
}

#[tokio::test]
async fn test_invalid_json_is_not_retried() {
    let f = Fixture::start("a").await;
    let pool = common::pool(&[f.url(), f.url()]);

    let err = pool.json::<Value>(&PoolRequest::get("/pool/badjson")).await.unwrap_err();
    assert!(matches!(err, PoolError::Parse(_)));
    assert_eq!(f.hits(), 1);
    assert!(pool.hosts_disabled().is_empty());
}

#[tokio::test]
async fn test_sends_method_query_and_body() {
    let f = Fixture::start("a").await;
    let pool = common::pool(&[f.url()]);

    let request = PoolRequest::post("/pool/echo").query("a", "42").body("asdf");
    let echo: Value = pool.json(&request).await.unwrap();

    assert_eq!(
        echo,
        json!({
            "method": "POST",
            "query": "a=42",
            "body": "asdf",
            "request_id": true,
        })
    );
}

#[tokio::test]
async fn test_host_base_path_is_prefixed() {
    let f = Fixture::start("a").await;
    let base = f.url().join("/pool").unwrap();
    let pool = common::pool(&[base]);

    assert_eq!(pool.text(&PoolRequest::get("/name")).await.unwrap(), "a");
}

#[tokio::test]
async fn test_empty_pool_has_no_host() {
    let pool = common::pool(&[]);

    let err = pool.text(&PoolRequest::get("/pool/json")).await.unwrap_err();
    assert!(err.is_service_not_available());
    assert_eq!(err.to_string(), "No host available");
}
