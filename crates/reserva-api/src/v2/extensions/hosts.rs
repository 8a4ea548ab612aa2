//! Compute-host extension for the v2 API.

use std::collections::HashMap;

use axum::Json;
use axum::Router;
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use serde_json::json;
use uuid::Uuid;

use reserva_core::RequestContext;
use reserva_core::types::Host;
use reserva_rpc::api::HostRpcApi;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::v2::extensions::{ApiExtension, RouteTable};

/// Compute-host CRUD and allocation listings under `/v2/oshosts`.
///
/// The hyphenated `os-hosts` spelling stays valid as an alias for
/// callers written against the original route.
pub struct HostsExtension;

impl ApiExtension for HostsExtension {
    fn name(&self) -> &str {
        "oshosts"
    }

    fn extra_routes(&self) -> RouteTable {
        RouteTable::from([("os-hosts".to_owned(), Some("oshosts".to_owned()))])
    }

    fn router(&self) -> Router<AppState> {
        Router::new()
            .route("/", get(get_all).post(create))
            .route("/allocations", get(list_allocations))
            .route("/{host_id}", get(get_one).put(update).delete(delete))
            .route("/{host_id}/allocations", get(get_allocations))
    }
}

async fn get_all(
    Extension(ctx): Extension<RequestContext>,
    Extension(rpc): Extension<HostRpcApi>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<Host>>> {
    let query = (!params.is_empty()).then(|| json!(params));
    let hosts = rpc.list_computehosts(&ctx, query.as_ref()).await?;
    Ok(Json(hosts))
}

async fn get_one(
    Extension(ctx): Extension<RequestContext>,
    Extension(rpc): Extension<HostRpcApi>,
    Path(host_id): Path<Uuid>,
) -> ApiResult<Json<Host>> {
    let host = rpc.get_computehost(&ctx, host_id).await?;
    Ok(Json(host))
}

async fn create(
    Extension(ctx): Extension<RequestContext>,
    Extension(rpc): Extension<HostRpcApi>,
    Json(data): Json<serde_json::Value>,
) -> ApiResult<(StatusCode, Json<Host>)> {
    let host = rpc.create_computehost(&ctx, data).await?;
    Ok((StatusCode::CREATED, Json(host)))
}

async fn update(
    Extension(ctx): Extension<RequestContext>,
    Extension(rpc): Extension<HostRpcApi>,
    Path(host_id): Path<Uuid>,
    Json(data): Json<serde_json::Value>,
) -> ApiResult<Json<Host>> {
    let host = rpc.update_computehost(&ctx, host_id, data).await?;
    Ok(Json(host))
}

async fn delete(
    Extension(ctx): Extension<RequestContext>,
    Extension(rpc): Extension<HostRpcApi>,
    Path(host_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    rpc.delete_computehost(&ctx, host_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_allocations(
    Extension(ctx): Extension<RequestContext>,
    Extension(rpc): Extension<HostRpcApi>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<serde_json::Value>>> {
    let query = (!params.is_empty()).then(|| json!(params));
    let allocations = rpc.list_allocations(&ctx, query.as_ref()).await?;
    Ok(Json(allocations))
}

async fn get_allocations(
    Extension(ctx): Extension<RequestContext>,
    Extension(rpc): Extension<HostRpcApi>,
    Path(host_id): Path<Uuid>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<serde_json::Value>>> {
    let query = (!params.is_empty()).then(|| json!(params));
    let allocations = rpc.get_allocations(&ctx, host_id, query.as_ref()).await?;
    Ok(Json(allocations))
}
