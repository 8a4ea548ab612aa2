//! Client side of the manager RPC boundary.

use std::sync::Arc;

use reserva_core::{AppResult, RequestContext};

use crate::envelope::RpcEnvelope;
use crate::transport::Transport;

/// Sends method calls to the manager over a transport.
///
/// The caller context is always passed in explicitly and serialized into
/// the envelope before anything is sent. This layer never retries; a
/// transport failure propagates to the HTTP caller as-is.
#[derive(Debug, Clone)]
pub struct RpcClient {
    transport: Arc<dyn Transport>,
}

impl RpcClient {
    /// Create a client over the given transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Invoke a method and block until its reply arrives.
    pub async fn call(
        &self,
        ctx: &RequestContext,
        method: &str,
        args: serde_json::Value,
    ) -> AppResult<serde_json::Value> {
        tracing::debug!(method = %method, user_id = %ctx.user_id, "RPC call");
        self.transport
            .call(RpcEnvelope::new(ctx, method, args))
            .await
    }

    /// Invoke a method without waiting for a reply.
    pub async fn cast(
        &self,
        ctx: &RequestContext,
        method: &str,
        args: serde_json::Value,
    ) -> AppResult<()> {
        tracing::debug!(method = %method, user_id = %ctx.user_id, "RPC cast");
        self.transport
            .cast(RpcEnvelope::new(ctx, method, args))
            .await
    }
}
