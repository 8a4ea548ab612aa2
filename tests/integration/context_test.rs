//! Integration tests for the identity header handling.

use axum::body::Body;
use http::{Request, StatusCode};
use tower::ServiceExt;

use crate::helpers::{Caller, TestApp};

#[tokio::test]
async fn test_version_endpoints_need_no_identity() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/versions", None, None).await;

    assert_eq!(response.status, StatusCode::MULTIPLE_CHOICES);
}

#[tokio::test]
async fn test_missing_service_catalog_is_rejected() {
    let app = TestApp::new().await;

    // Identity headers present, service catalog absent.
    let request = Request::builder()
        .method("GET")
        .uri("/v1/leases")
        .header("x-user-id", "u-1")
        .header("x-project-id", "p-1")
        .header("x-auth-token", "tok")
        .header("x-user-name", "alice")
        .header("x-project-name", "demo")
        .header("x-roles", "member")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], 400);
    assert!(body["error_message"].is_string());
}

#[tokio::test]
async fn test_malformed_service_catalog_is_rejected() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method("GET")
        .uri("/v2/leases")
        .header("x-user-id", "u-1")
        .header("x-project-id", "p-1")
        .header("x-auth-token", "tok")
        .header("x-service-catalog", "{not json")
        .header("x-user-name", "alice")
        .header("x-project-name", "demo")
        .header("x-roles", "member")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_caller_identity_reaches_the_manager() {
    let app = TestApp::new().await;
    let caller = Caller::member("p-42");

    let response = app
        .request(
            "POST",
            "/v1/leases",
            Some(crate::helpers::lease_body("identity")),
            Some(&caller),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["lease"]["user_id"], "u-member");
    assert_eq!(response.body["lease"]["project_id"], "p-42");
}
