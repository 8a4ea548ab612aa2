//! # reserva-api
//!
//! HTTP layer for Reserva: the version selector that fronts the two API
//! generations, the v1 routes, the v2 extension registry, and the
//! request hook middleware that attaches context and service handles to
//! every request.

pub mod app;
pub mod error;
pub mod middleware;
pub mod selector;
pub mod state;
pub mod v1;
pub mod v2;

pub use selector::VersionSelector;
pub use state::AppState;
