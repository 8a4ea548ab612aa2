//! The legacy v1 API generation.

pub mod app;
pub mod leases;
