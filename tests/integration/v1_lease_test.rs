//! Integration tests for the v1 lease routes.

use http::StatusCode;
use uuid::Uuid;

use crate::helpers::{Caller, TestApp, lease_body};

#[tokio::test]
async fn test_lease_crud_round_trip() {
    let app = TestApp::new().await;
    let caller = Caller::admin();

    // Create.
    let response = app
        .request("POST", "/v1/leases", Some(lease_body("crud")), Some(&caller))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let lease_id = response.body["lease"]["id"].as_str().unwrap().to_string();
    assert_eq!(response.body["lease"]["status"], "PENDING");

    // Read.
    let response = app
        .request("GET", &format!("/v1/leases/{lease_id}"), None, Some(&caller))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["lease"]["name"], "crud");

    // Update.
    let response = app
        .request(
            "PUT",
            &format!("/v1/leases/{lease_id}"),
            Some(serde_json::json!({ "name": "renamed" })),
            Some(&caller),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["lease"]["name"], "renamed");

    // List.
    let response = app.request("GET", "/v1/leases", None, Some(&caller)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["leases"].as_array().unwrap().len(), 1);

    // Delete.
    let response = app
        .request(
            "DELETE",
            &format!("/v1/leases/{lease_id}"),
            None,
            Some(&caller),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/v1/leases/{lease_id}"), None, Some(&caller))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_missing_lease_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "PUT",
            &format!("/v1/leases/{}", Uuid::new_v4()),
            Some(serde_json::json!({ "name": "ghost" })),
            Some(&Caller::admin()),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], 404);
}

#[tokio::test]
async fn test_create_rejects_inverted_window() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/v1/leases",
            Some(serde_json::json!({
                "name": "bad",
                "start_date": "2026-09-02T00:00:00Z",
                "end_date": "2026-09-01T00:00:00Z",
            })),
            Some(&Caller::admin()),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], 400);
}

#[tokio::test]
async fn test_members_only_see_their_project() {
    let app = TestApp::new().await;

    app.request(
        "POST",
        "/v1/leases",
        Some(lease_body("mine")),
        Some(&Caller::member("p-1")),
    )
    .await;
    app.request(
        "POST",
        "/v1/leases",
        Some(lease_body("theirs")),
        Some(&Caller::member("p-2")),
    )
    .await;

    let response = app
        .request("GET", "/v1/leases", None, Some(&Caller::member("p-1")))
        .await;
    let leases = response.body["leases"].as_array().unwrap();
    assert_eq!(leases.len(), 1);
    assert_eq!(leases[0]["name"], "mine");

    // Admins see everything.
    let response = app
        .request("GET", "/v1/leases", None, Some(&Caller::admin()))
        .await;
    assert_eq!(response.body["leases"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_plugins_route_lists_manager_plugins() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/v1/plugins", None, Some(&Caller::admin()))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response.body["plugins"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["leases", "physical.host.plugin"]);
}

#[tokio::test]
async fn test_unknown_v1_route_uses_error_body() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/v1/nonexistent", None, Some(&Caller::admin()))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], 404);
    assert!(response.body["error_message"].is_string());
}
