//! Integration tests for the v2 extension routes.

use http::StatusCode;

use crate::helpers::{Caller, TestApp};

fn host_body(hostname: &str) -> serde_json::Value {
    serde_json::json!({
        "hostname": hostname,
        "vcpus": 8,
        "memory_mb": 32768,
    })
}

#[tokio::test]
async fn test_v2_lease_create_returns_bare_object() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/v2/leases",
            Some(crate::helpers::lease_body("v2-lease")),
            Some(&Caller::admin()),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    // No v1-style envelope.
    assert_eq!(response.body["name"], "v2-lease");
    assert_eq!(response.body["status"], "PENDING");
}

#[tokio::test]
async fn test_v2_lease_delete_is_no_content() {
    let app = TestApp::new().await;
    let caller = Caller::admin();

    let response = app
        .request(
            "POST",
            "/v2/leases",
            Some(crate::helpers::lease_body("gone")),
            Some(&caller),
        )
        .await;
    let lease_id = response.body["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "DELETE",
            &format!("/v2/leases/{lease_id}"),
            None,
            Some(&caller),
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_host_routes_answer_on_both_spellings() {
    let app = TestApp::new().await;
    let caller = Caller::admin();

    let response = app
        .request(
            "POST",
            "/v2/oshosts",
            Some(host_body("node-1")),
            Some(&caller),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let host_id = response.body["id"].as_str().unwrap().to_string();

    // The hyphenated alias reaches the same routes.
    let response = app
        .request(
            "GET",
            &format!("/v2/os-hosts/{host_id}"),
            None,
            Some(&caller),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["hostname"], "node-1");

    let response = app
        .request("GET", "/v2/os-hosts", None, Some(&caller))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_host_allocations() {
    let app = TestApp::new().await;
    let caller = Caller::admin();

    let response = app
        .request(
            "POST",
            "/v2/oshosts",
            Some(host_body("node-2")),
            Some(&caller),
        )
        .await;
    let host_id = response.body["id"].as_str().unwrap().to_string();

    let response = app
        .request("GET", "/v2/os-hosts/allocations", None, Some(&caller))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 1);

    let response = app
        .request(
            "GET",
            &format!("/v2/oshosts/{host_id}/allocations"),
            None,
            Some(&caller),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body[0]["resource_id"], host_id.as_str());
}

#[tokio::test]
async fn test_dead_end_alias_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/v2/old-leases", None, Some(&Caller::admin()))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], 404);
}

#[tokio::test]
async fn test_unknown_v2_segment_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/v2/floatingips", None, Some(&Caller::admin()))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_disabled_extension_routes_are_absent() {
    let mut config = crate::helpers::test_config();
    config.api.v2_extensions = vec!["leases".to_string()];
    let app = TestApp::with_config(config).await;

    let response = app
        .request("GET", "/v2/oshosts", None, Some(&Caller::admin()))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", "/v2/leases", None, Some(&Caller::admin()))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}
