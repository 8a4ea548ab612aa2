//! # reserva-core
//!
//! Core crate for the Reserva reservation API service. Contains the
//! configuration schemas, the per-request context, lease/version value
//! types, the opaque data-access seam, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Reserva crates.

pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod result;
pub mod types;

pub use context::RequestContext;
pub use error::AppError;
pub use result::AppResult;
