//! The wire unit sent across the manager boundary.

use serde::{Deserialize, Serialize};

use reserva_core::RequestContext;

/// One RPC request: caller context, method name, keyword arguments.
///
/// Constructed fresh per call and immutable once sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcEnvelope {
    /// Serialized caller identity, reconstructed on the receiving side
    /// before the target method runs.
    pub context: RequestContext,
    /// Target method name.
    pub method: String,
    /// Keyword arguments as a JSON object.
    pub args: serde_json::Value,
}

impl RpcEnvelope {
    /// Build an envelope for the given context, method, and arguments.
    pub fn new(context: &RequestContext, method: &str, args: serde_json::Value) -> Self {
        Self {
            context: context.clone(),
            method: method.to_string(),
            args,
        }
    }
}
