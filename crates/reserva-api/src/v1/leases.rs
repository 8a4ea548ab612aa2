//! v1 lease routes.
//!
//! The v1 generation wraps every payload in a named envelope
//! (`{"lease": ...}`, `{"leases": [...]}`) and reports all errors in the
//! shared error body shape.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Extension, Path, Query};
use serde_json::json;
use uuid::Uuid;

use reserva_core::RequestContext;
use reserva_rpc::api::LeaseRpcApi;

use crate::error::ApiResult;

/// List all existing leases.
///
/// Callers without the admin role only see their own project's leases.
pub async fn leases_list(
    Extension(ctx): Extension<RequestContext>,
    Extension(rpc): Extension<LeaseRpcApi>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<serde_json::Value>> {
    let project_id = (!ctx.has_role("admin")).then(|| ctx.project_id.clone());
    let query = (!params.is_empty()).then(|| json!(params));
    let leases = rpc
        .list_leases(&ctx, project_id.as_deref(), query.as_ref())
        .await?;
    Ok(Json(json!({ "leases": leases })))
}

/// Create a new lease.
pub async fn leases_create(
    Extension(ctx): Extension<RequestContext>,
    Extension(rpc): Extension<LeaseRpcApi>,
    Json(data): Json<serde_json::Value>,
) -> ApiResult<Json<serde_json::Value>> {
    let lease = rpc.create_lease(&ctx, data).await?;
    Ok(Json(json!({ "lease": lease })))
}

/// Get a lease by its ID.
pub async fn leases_get(
    Extension(ctx): Extension<RequestContext>,
    Extension(rpc): Extension<LeaseRpcApi>,
    Path(lease_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let lease = rpc.get_lease(&ctx, lease_id).await?;
    Ok(Json(json!({ "lease": lease })))
}

/// Update a lease.
pub async fn leases_update(
    Extension(ctx): Extension<RequestContext>,
    Extension(rpc): Extension<LeaseRpcApi>,
    Path(lease_id): Path<Uuid>,
    Json(data): Json<serde_json::Value>,
) -> ApiResult<Json<serde_json::Value>> {
    check_lease_exists(&rpc, &ctx, lease_id).await?;
    let lease = rpc.update_lease(&ctx, lease_id, data).await?;
    Ok(Json(json!({ "lease": lease })))
}

/// Delete the specified lease.
pub async fn leases_delete(
    Extension(ctx): Extension<RequestContext>,
    Extension(rpc): Extension<LeaseRpcApi>,
    Path(lease_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    check_lease_exists(&rpc, &ctx, lease_id).await?;
    rpc.delete_lease(&ctx, lease_id).await?;
    Ok(Json(json!({})))
}

/// List all resource plugins active on the manager.
pub async fn plugins_list(
    Extension(ctx): Extension<RequestContext>,
    Extension(rpc): Extension<LeaseRpcApi>,
) -> ApiResult<Json<serde_json::Value>> {
    let plugins = rpc.get_plugins(&ctx).await?;
    Ok(Json(json!({ "plugins": plugins })))
}

/// Verify a lease exists before mutating it, so a missing ID surfaces as
/// a 404 instead of whatever the mutation would report.
async fn check_lease_exists(
    rpc: &LeaseRpcApi,
    ctx: &RequestContext,
    lease_id: Uuid,
) -> ApiResult<()> {
    rpc.get_lease(ctx, lease_id).await?;
    Ok(())
}
