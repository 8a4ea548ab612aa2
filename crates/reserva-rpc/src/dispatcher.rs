//! Method dispatch on the manager side of the RPC boundary.
//!
//! Handlers are registered once at startup in an explicit name-to-
//! handler map; the map is immutable while serving. A request for an
//! unregistered name is a client/server version mismatch and surfaces
//! as a typed unknown-method error, never silently.

use std::collections::HashMap;
use std::future::Future;

use futures::future::BoxFuture;

use reserva_core::context::ContextScope;
use reserva_core::{AppError, AppResult, RequestContext};

use crate::envelope::RpcEnvelope;

type Handler =
    Box<dyn Fn(RequestContext, serde_json::Value) -> BoxFuture<'static, AppResult<serde_json::Value>> + Send + Sync>;

/// Maps RPC method names to handlers and runs them under the caller's
/// reconstructed context.
#[derive(Default)]
pub struct RpcDispatcher {
    handlers: HashMap<String, Handler>,
}

impl std::fmt::Debug for RpcDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcDispatcher")
            .field("methods", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl RpcDispatcher {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under a method name.
    ///
    /// Registering the same name twice is a startup configuration error.
    pub fn register<F, Fut>(&mut self, method: &str, handler: F) -> AppResult<()>
    where
        F: Fn(RequestContext, serde_json::Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<serde_json::Value>> + Send + 'static,
    {
        if self.handlers.contains_key(method) {
            return Err(AppError::configuration(format!(
                "RPC method '{method}' is already registered"
            )));
        }
        self.handlers.insert(
            method.to_string(),
            Box::new(move |ctx, args| Box::pin(handler(ctx, args))),
        );
        Ok(())
    }

    /// Registered method names, mainly for logging at startup.
    pub fn methods(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    /// Dispatch one envelope.
    ///
    /// The envelope's context is held in a [`ContextScope`] for the
    /// duration of the handler call, so the handler observes the
    /// original caller identity even though it runs in the manager
    /// process.
    pub async fn dispatch(&self, envelope: RpcEnvelope) -> AppResult<serde_json::Value> {
        let Some(handler) = self.handlers.get(&envelope.method) else {
            tracing::error!(method = %envelope.method, "no handler implemented for RPC method");
            return Err(AppError::unknown_method(&envelope.method));
        };

        let mut scope = ContextScope::enter(envelope.context);
        let result = handler(scope.context().clone(), envelope.args).await;
        scope.release();
        result
    }
}
