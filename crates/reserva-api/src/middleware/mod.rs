//! Request-scoped hook chain.
//!
//! Each hook is side-effect-only and applied to every resource request.
//! The hooks are order-independent except that handlers read what the
//! context hook stored.

pub mod context;
pub mod logging;
pub mod services;
