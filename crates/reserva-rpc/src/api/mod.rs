//! Typed client APIs for the manager's RPC surface.
//!
//! One client per backend resource family, mirroring the manager's
//! method naming. HTTP handlers receive ready-made instances from the
//! request hook chain and never build their own.

pub mod hosts;
pub mod leases;

pub use hosts::HostRpcApi;
pub use leases::LeaseRpcApi;
