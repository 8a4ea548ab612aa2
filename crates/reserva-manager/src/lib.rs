//! # reserva-manager
//!
//! Manager-side RPC endpoints backed by in-memory stores. The real
//! deployment runs the manager as a separate process with its own
//! scheduling logic; this crate provides the same RPC surface for
//! single-process deployments and for the integration tests.

pub mod hosts;
pub mod leases;

use std::sync::Arc;

use reserva_core::AppResult;
use reserva_core::config::manager::ManagerConfig;
use reserva_rpc::RpcDispatcher;

pub use hosts::HostManager;
pub use leases::LeaseManager;

/// Plugin name enabling the compute-host endpoints.
pub const HOST_PLUGIN: &str = "physical.host.plugin";

/// Build a dispatcher with all configured manager endpoints registered.
///
/// The lease endpoints are always active; host endpoints are registered
/// only when the host plugin is enabled in the configuration.
pub fn build_dispatcher(config: &ManagerConfig) -> AppResult<RpcDispatcher> {
    let mut dispatcher = RpcDispatcher::new();

    let leases = Arc::new(LeaseManager::new(&config.plugins));
    leases.register(&mut dispatcher)?;

    if config.plugins.iter().any(|p| p == HOST_PLUGIN) {
        let hosts = Arc::new(HostManager::new());
        hosts.register(&mut dispatcher)?;
    }

    tracing::info!(topic = %config.rpc_topic, methods = ?dispatcher.methods(),
        "manager dispatcher ready");
    Ok(dispatcher)
}
