//! Version selector fronting the two API generations.
//!
//! Lets the v1 and v2 sub-applications coexist behind one listening
//! endpoint without a shared router: requests are dispatched on a plain
//! path-prefix check, and the version listing endpoints aggregate both
//! sub-applications' version metadata into one response.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

/// Maps versioned sub-applications and defines the default dispatch.
#[derive(Debug, Clone)]
pub struct VersionSelector {
    v1: Router,
    v2: Router,
}

impl VersionSelector {
    /// Create a selector over two pre-built sub-applications.
    pub fn new(v1: Router, v2: Router) -> Self {
        Self { v1, v2 }
    }

    /// Turn the selector into the top-level router.
    pub fn into_router(self) -> Router {
        let selector = Arc::new(self);
        Router::new().fallback(move |request: Request| {
            let selector = Arc::clone(&selector);
            async move { selector.dispatch(request).await }
        })
    }

    /// Route one request to the proper sub-application.
    pub async fn dispatch(&self, request: Request) -> Response {
        let path = request.uri().path();
        if path == "/" || path == "/versions" {
            return self.list_versions(request).await;
        }

        // Prefix dispatch: the older generation keeps its prefix,
        // everything else belongs to the newer one.
        if path.starts_with("/v1") {
            run_app(self.v1.clone(), request).await
        } else {
            run_app(self.v2.clone(), request).await
        }
    }

    /// Aggregate the version lists of both sub-applications.
    ///
    /// Both sub-applications sit behind the same token-validating proxy,
    /// so an authentication failure from v1 is returned as-is and v2 is
    /// never invoked — no duplicate auth work, and no version metadata
    /// for unauthenticated callers.
    async fn list_versions(&self, request: Request) -> Response {
        let mut versions: Vec<serde_json::Value> = Vec::new();

        let v1_response = run_app(self.v1.clone(), subrequest(&request)).await;
        if v1_response.status() == StatusCode::UNAUTHORIZED {
            return v1_response;
        }
        collect_versions(v1_response, &mut versions).await;

        let v2_response = run_app(self.v2.clone(), subrequest(&request)).await;
        collect_versions(v2_response, &mut versions).await;

        if versions.is_empty() {
            StatusCode::NO_CONTENT.into_response()
        } else {
            (
                StatusCode::MULTIPLE_CHOICES,
                Json(json!({ "versions": versions })),
            )
                .into_response()
        }
    }
}

/// Rebuild a bodiless copy of the inbound request for a sub-application.
///
/// The version endpoints never read a body, so only the method, URI, and
/// headers are carried over.
fn subrequest(request: &Request) -> Request {
    let mut copy = Request::builder()
        .method(request.method().clone())
        .uri(request.uri().clone())
        .body(Body::empty())
        .expect("rebuilding a request from valid parts cannot fail");
    *copy.headers_mut() = request.headers().clone();
    copy
}

async fn run_app(app: Router, request: Request) -> Response {
    match app.oneshot(request).await {
        Ok(response) => response,
        Err(infallible) => match infallible {},
    }
}

/// Append a sub-application's advertised versions to the union.
///
/// Only a 300 Multiple Choices response carries a version list; any
/// other status contributes nothing.
async fn collect_versions(response: Response, versions: &mut Vec<serde_json::Value>) {
    if response.status() != StatusCode::MULTIPLE_CHOICES {
        return;
    }
    let Ok(bytes) = response.into_body().collect().await.map(|b| b.to_bytes()) else {
        tracing::warn!("failed to read version listing body from sub-application");
        return;
    };
    match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(body) => {
            if let Some(listed) = body.get("versions").and_then(|v| v.as_array()) {
                versions.extend(listed.iter().cloned());
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "sub-application version listing is not JSON");
        }
    }
}
