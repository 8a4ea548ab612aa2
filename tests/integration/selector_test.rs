//! Integration tests for the version selector.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use reserva_api::VersionSelector;

use crate::helpers::{Caller, TestApp};

/// A stub sub-application that counts how often it is invoked and
/// answers every request with a fixed status and body.
fn stub_app(counter: Arc<AtomicUsize>, status: StatusCode, body: Value) -> Router {
    Router::new().fallback(move || {
        let counter = Arc::clone(&counter);
        let body = body.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            (status, axum::Json(body))
        }
    })
}

async fn send(router: Router, path: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("Failed to build request");
    let response = router.oneshot(request).await.expect("Failed to send");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_version_union_preserves_order() {
    let v1 = stub_app(
        Arc::new(AtomicUsize::new(0)),
        StatusCode::MULTIPLE_CHOICES,
        serde_json::json!({ "versions": [{ "id": "v1.0" }] }),
    );
    let v2 = stub_app(
        Arc::new(AtomicUsize::new(0)),
        StatusCode::MULTIPLE_CHOICES,
        serde_json::json!({ "versions": [{ "id": "v2.0" }] }),
    );

    let router = VersionSelector::new(v1, v2).into_router();
    let (status, body) = send(router, "/versions").await;

    assert_eq!(status, StatusCode::MULTIPLE_CHOICES);
    let ids: Vec<&str> = body["versions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["v1.0", "v2.0"]);
}

#[tokio::test]
async fn test_unauthorized_short_circuits_version_listing() {
    let v2_calls = Arc::new(AtomicUsize::new(0));
    let v1 = stub_app(
        Arc::new(AtomicUsize::new(0)),
        StatusCode::UNAUTHORIZED,
        serde_json::json!({ "error": 401 }),
    );
    let v2 = stub_app(
        Arc::clone(&v2_calls),
        StatusCode::MULTIPLE_CHOICES,
        serde_json::json!({ "versions": [{ "id": "v2.0" }] }),
    );

    let router = VersionSelector::new(v1, v2).into_router();
    let (status, _) = send(router, "/").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(v2_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_version_union_is_no_content() {
    // Neither sub-application advertises versions with 300.
    let v1 = stub_app(
        Arc::new(AtomicUsize::new(0)),
        StatusCode::NOT_FOUND,
        Value::Null,
    );
    let v2 = stub_app(
        Arc::new(AtomicUsize::new(0)),
        StatusCode::NOT_FOUND,
        Value::Null,
    );

    let router = VersionSelector::new(v1, v2).into_router();
    let (status, _) = send(router, "/versions").await;

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_prefix_dispatch_targets_one_generation() {
    let v1_calls = Arc::new(AtomicUsize::new(0));
    let v2_calls = Arc::new(AtomicUsize::new(0));
    let v1 = stub_app(Arc::clone(&v1_calls), StatusCode::OK, Value::Null);
    let v2 = stub_app(Arc::clone(&v2_calls), StatusCode::OK, Value::Null);

    let router = VersionSelector::new(v1, v2).into_router();

    send(router.clone(), "/v1/leases").await;
    assert_eq!(v1_calls.load(Ordering::SeqCst), 1);
    assert_eq!(v2_calls.load(Ordering::SeqCst), 0);

    send(router.clone(), "/v2/leases").await;
    assert_eq!(v2_calls.load(Ordering::SeqCst), 1);

    // Anything without the v1 prefix belongs to the newer generation.
    send(router, "/v3/other").await;
    assert_eq!(v1_calls.load(Ordering::SeqCst), 1);
    assert_eq!(v2_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_full_app_advertises_both_generations() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/", None, Some(&Caller::admin())).await;

    assert_eq!(response.status, StatusCode::MULTIPLE_CHOICES);
    let ids: Vec<&str> = response.body["versions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["v1.0", "v2.0"]);
}

#[tokio::test]
async fn test_v1_disabled_serves_v2_alone() {
    let mut config = crate::helpers::test_config();
    config.api.enable_v1 = false;
    let app = TestApp::with_config(config).await;

    let response = app
        .request("GET", "/versions", None, Some(&Caller::admin()))
        .await;

    assert_eq!(response.status, StatusCode::MULTIPLE_CHOICES);
    let ids: Vec<&str> = response.body["versions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["v2.0"]);

    // The v1 routes are gone entirely.
    let response = app
        .request("GET", "/v1/plugins", None, Some(&Caller::admin()))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
