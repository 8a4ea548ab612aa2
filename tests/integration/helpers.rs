//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use reserva_api::AppState;
use reserva_core::config::AppConfig;
use reserva_core::db::NullDataAccess;
use reserva_rpc::api::{HostRpcApi, LeaseRpcApi};
use reserva_rpc::{LocalTransport, RpcClient, transport};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
}

impl TestApp {
    /// Full application over an in-process manager, default config.
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Full application over an in-process manager with a custom config.
    pub async fn with_config(config: AppConfig) -> Self {
        let dispatcher = Arc::new(
            reserva_manager::build_dispatcher(&config.manager)
                .expect("Failed to build manager dispatcher"),
        );
        let (local, rx) = LocalTransport::channel(config.manager.channel_capacity);
        tokio::spawn(transport::serve(dispatcher, rx));

        let client = RpcClient::new(Arc::new(local));
        let state = AppState {
            config: Arc::new(config),
            db: Arc::new(NullDataAccess),
            lease_rpc: LeaseRpcApi::new(client.clone()),
            host_rpc: HostRpcApi::new(client),
        };

        let router = reserva_api::app::build_app(state).expect("Failed to build app");
        Self { router }
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        caller: Option<&Caller>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(caller) = caller {
            req = req
                .header("x-user-id", caller.user_id.as_str())
                .header("x-project-id", caller.project_id.as_str())
                .header("x-auth-token", "test-token")
                .header("x-service-catalog", r#"[{"type":"reservation"}]"#)
                .header("x-user-name", caller.user_name.as_str())
                .header("x-project-name", "demo")
                .header("x-roles", caller.roles.as_str());
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Identity headers the authenticating proxy would set.
pub struct Caller {
    pub user_id: String,
    pub project_id: String,
    pub user_name: String,
    pub roles: String,
}

impl Caller {
    pub fn admin() -> Self {
        Self {
            user_id: "u-admin".into(),
            project_id: "p-admin".into(),
            user_name: "admin".into(),
            roles: "admin,member".into(),
        }
    }

    pub fn member(project_id: &str) -> Self {
        Self {
            user_id: "u-member".into(),
            project_id: project_id.into(),
            user_name: "member".into(),
            roles: "member".into(),
        }
    }
}

/// Default test configuration: both generations, host plugin enabled.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.manager.plugins = vec!["physical.host.plugin".to_string()];
    config
}

/// Lease creation body covering the required fields.
pub fn lease_body(name: &str) -> Value {
    serde_json::json!({
        "name": name,
        "start_date": "2026-09-01T00:00:00Z",
        "end_date": "2026-09-02T00:00:00Z",
    })
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
