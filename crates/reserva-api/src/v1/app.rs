//! v1 sub-application assembly.

use axum::http::StatusCode;
use axum::middleware as axum_middleware;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::{Router, extract::State};
use serde_json::json;

use reserva_core::types::Version;

use crate::error::default_not_found;
use crate::middleware;
use crate::state::AppState;
use crate::v1::leases;

/// Build the v1 sub-application.
///
/// The version endpoints are open; the resource routes under `/v1` run
/// the full request hook chain.
pub fn build_v1_app(state: AppState) -> Router {
    let resources = Router::new()
        .route("/leases", get(leases::leases_list).post(leases::leases_create))
        .route(
            "/leases/{lease_id}",
            get(leases::leases_get)
                .put(leases::leases_update)
                .delete(leases::leases_delete),
        )
        .route("/plugins", get(leases::plugins_list))
        .layer(axum_middleware::from_fn(middleware::context::context_hook))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::services::attach_services,
        ));

    Router::new()
        .route("/", get(version_list))
        .route("/versions", get(version_list))
        .nest("/v1", resources)
        .fallback(default_not_found)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// List the API versions this generation serves.
async fn version_list(State(state): State<AppState>) -> Response {
    let version = Version::with_self_link(
        "v1.0",
        "CURRENT",
        &state.config.api.public_endpoint,
        "v1",
    );
    (
        StatusCode::MULTIPLE_CHOICES,
        Json(json!({ "versions": [version] })),
    )
        .into_response()
}
