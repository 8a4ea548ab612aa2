//! Config, DB, and RPC hooks: attach shared handles to the request.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

/// Attaches the configuration snapshot, the data-access handle, and the
/// per-backend RPC clients to the request, so handlers never construct
/// their own.
pub async fn attach_services(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    request.extensions_mut().insert(state.config.clone());
    request.extensions_mut().insert(state.db.clone());
    request.extensions_mut().insert(state.lease_rpc.clone());
    request.extensions_mut().insert(state.host_rpc.clone());
    next.run(request).await
}
