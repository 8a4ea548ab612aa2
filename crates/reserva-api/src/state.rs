//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use reserva_core::config::AppConfig;
use reserva_core::db::DbHandle;
use reserva_rpc::api::{HostRpcApi, LeaseRpcApi};

/// Application state containing all shared dependencies.
///
/// Built once at startup and threaded through every route via axum's
/// `State` extractor. All fields are cheap to clone; none are mutated
/// at request time.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration snapshot.
    pub config: Arc<AppConfig>,
    /// Opaque data-access handle.
    pub db: DbHandle,
    /// Lease manager RPC client.
    pub lease_rpc: LeaseRpcApi,
    /// Compute-host manager RPC client.
    pub host_rpc: HostRpcApi,
}
