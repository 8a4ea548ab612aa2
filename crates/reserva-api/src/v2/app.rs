//! v2 sub-application assembly.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::middleware as axum_middleware;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::{Router, extract::State};
use serde_json::json;

use reserva_core::AppResult;
use reserva_core::types::Version;

use crate::error::default_not_found;
use crate::middleware;
use crate::state::AppState;
use crate::v2::extensions::{ExtensionRegistry, rewrite_extension_routes};

/// Build the v2 sub-application from the configured extension set.
pub fn build_v2_app(state: AppState) -> AppResult<Router> {
    let registry = ExtensionRegistry::from_config(&state.config.api.v2_extensions)?;
    Ok(build_with_registry(state, registry))
}

/// Assemble the v2 sub-application around an already-built registry.
pub fn build_with_registry(state: AppState, registry: ExtensionRegistry) -> Router {
    let route_table = Arc::new(registry.routes().clone());

    let mut resources = Router::new();
    for extension in registry.extensions() {
        resources = resources.nest(&format!("/{}", extension.name()), extension.router());
    }
    let resources = resources
        .layer(axum_middleware::from_fn(middleware::context::context_hook))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::services::attach_services,
        ));

    Router::new()
        .route("/", get(version_list))
        .route("/versions", get(version_list))
        .nest("/v2", resources)
        .fallback(default_not_found)
        .layer(axum_middleware::from_fn_with_state(
            route_table,
            rewrite_extension_routes,
        ))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// List the API versions this generation serves.
async fn version_list(State(state): State<AppState>) -> Response {
    let version = Version::with_self_link(
        "v2.0",
        "CURRENT",
        &state.config.api.public_endpoint,
        "v2",
    );
    (
        StatusCode::MULTIPLE_CHOICES,
        Json(json!({ "versions": [version] })),
    )
        .into_response()
}
