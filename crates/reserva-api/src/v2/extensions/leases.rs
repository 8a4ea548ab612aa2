//! Lease extension for the v2 API.
//!
//! The v2 generation drops the v1 envelopes: resources are returned as
//! bare objects, creations answer 201, deletions answer 204.

use std::collections::HashMap;

use axum::Json;
use axum::Router;
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use serde_json::json;
use uuid::Uuid;

use reserva_core::RequestContext;
use reserva_core::types::Lease;
use reserva_rpc::api::LeaseRpcApi;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::v2::extensions::{ApiExtension, RouteTable};

/// Lease CRUD under `/v2/leases`.
pub struct LeasesExtension;

impl ApiExtension for LeasesExtension {
    fn name(&self) -> &str {
        "leases"
    }

    fn extra_routes(&self) -> RouteTable {
        // The pre-extension route is retired, not redirected.
        RouteTable::from([("old-leases".to_owned(), None)])
    }

    fn router(&self) -> Router<AppState> {
        Router::new()
            .route("/", get(get_all).post(create))
            .route("/{lease_id}", get(get_one).put(update).delete(delete))
    }
}

async fn get_all(
    Extension(ctx): Extension<RequestContext>,
    Extension(rpc): Extension<LeaseRpcApi>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<Lease>>> {
    let project_id = (!ctx.has_role("admin")).then(|| ctx.project_id.clone());
    let query = (!params.is_empty()).then(|| json!(params));
    let leases = rpc
        .list_leases(&ctx, project_id.as_deref(), query.as_ref())
        .await?;
    Ok(Json(leases))
}

async fn get_one(
    Extension(ctx): Extension<RequestContext>,
    Extension(rpc): Extension<LeaseRpcApi>,
    Path(lease_id): Path<Uuid>,
) -> ApiResult<Json<Lease>> {
    let lease = rpc.get_lease(&ctx, lease_id).await?;
    Ok(Json(lease))
}

async fn create(
    Extension(ctx): Extension<RequestContext>,
    Extension(rpc): Extension<LeaseRpcApi>,
    Json(data): Json<serde_json::Value>,
) -> ApiResult<(StatusCode, Json<Lease>)> {
    let lease = rpc.create_lease(&ctx, data).await?;
    Ok((StatusCode::CREATED, Json(lease)))
}

async fn update(
    Extension(ctx): Extension<RequestContext>,
    Extension(rpc): Extension<LeaseRpcApi>,
    Path(lease_id): Path<Uuid>,
    Json(data): Json<serde_json::Value>,
) -> ApiResult<Json<Lease>> {
    let lease = rpc.update_lease(&ctx, lease_id, data).await?;
    Ok(Json(lease))
}

async fn delete(
    Extension(ctx): Extension<RequestContext>,
    Extension(rpc): Extension<LeaseRpcApi>,
    Path(lease_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    rpc.delete_lease(&ctx, lease_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
