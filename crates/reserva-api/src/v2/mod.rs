//! The v2 API generation: extension-driven resource mounting.

pub mod app;
pub mod extensions;
