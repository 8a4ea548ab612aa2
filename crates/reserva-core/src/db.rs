//! Opaque data-access seam.
//!
//! Reserva's API layer never touches storage itself; the request hook
//! chain only attaches a handle so downstream code can reach whatever
//! data-access backend the deployment wires in.

use std::sync::Arc;

/// Handle to the shared data-access layer.
///
/// The actual persistence implementation lives outside this repository;
/// the API layer treats it as a black box and only forwards the handle.
pub trait DataAccess: Send + Sync + std::fmt::Debug {
    /// Short backend identifier used in logs.
    fn backend(&self) -> &str;
}

/// Data-access handle that performs no persistence.
///
/// Used by deployments where all state lives behind the manager RPC
/// boundary, and by tests.
#[derive(Debug, Default)]
pub struct NullDataAccess;

impl DataAccess for NullDataAccess {
    fn backend(&self) -> &str {
        "null"
    }
}

/// Shared, immutable data-access handle attached to every request.
pub type DbHandle = Arc<dyn DataAccess>;
