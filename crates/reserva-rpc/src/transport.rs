//! Transport seam between the RPC client and the manager process.
//!
//! Timeout and retry policy belong to the transport, not to this layer;
//! transport failures propagate directly to the caller as errors.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use reserva_core::{AppError, AppResult};

use crate::dispatcher::RpcDispatcher;
use crate::envelope::RpcEnvelope;

/// Delivers envelopes to the manager side.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Deliver an envelope and block until the reply arrives.
    async fn call(&self, envelope: RpcEnvelope) -> AppResult<serde_json::Value>;

    /// Deliver an envelope without waiting for a reply. May still block
    /// briefly on enqueueing the message.
    async fn cast(&self, envelope: RpcEnvelope) -> AppResult<()>;
}

/// One queued message: the envelope plus an optional reply channel.
///
/// `reply` is `None` for casts.
#[derive(Debug)]
pub struct RpcMessage {
    pub envelope: RpcEnvelope,
    pub reply: Option<oneshot::Sender<AppResult<serde_json::Value>>>,
}

/// In-process channel transport.
///
/// Stands in for an external message-queue transport when the manager
/// runs inside the same process, and carries the test traffic. Cloning
/// hands out another sender onto the same queue.
#[derive(Debug, Clone)]
pub struct LocalTransport {
    tx: mpsc::Sender<RpcMessage>,
}

impl LocalTransport {
    /// Create a transport and the receiving end the manager serves.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<RpcMessage>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl Transport for LocalTransport {
    async fn call(&self, envelope: RpcEnvelope) -> AppResult<serde_json::Value> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(RpcMessage {
                envelope,
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| AppError::transport("Manager channel is closed"))?;
        reply_rx
            .await
            .map_err(|_| AppError::transport("Manager dropped the reply channel"))?
    }

    async fn cast(&self, envelope: RpcEnvelope) -> AppResult<()> {
        self.tx
            .send(RpcMessage {
                envelope,
                reply: None,
            })
            .await
            .map_err(|_| AppError::transport("Manager channel is closed"))
    }
}

/// Serve queued messages against a dispatcher until all senders drop.
///
/// Each message is handled on its own task so a slow call does not stall
/// the queue.
pub async fn serve(dispatcher: Arc<RpcDispatcher>, mut rx: mpsc::Receiver<RpcMessage>) {
    while let Some(message) = rx.recv().await {
        let dispatcher = Arc::clone(&dispatcher);
        tokio::spawn(async move {
            let method = message.envelope.method.clone();
            let result = dispatcher.dispatch(message.envelope).await;
            match message.reply {
                Some(reply) => {
                    if reply.send(result).is_err() {
                        tracing::warn!(method = %method, "RPC caller went away before the reply");
                    }
                }
                None => {
                    if let Err(e) = result {
                        tracing::error!(method = %method, error = %e, "RPC cast failed");
                    }
                }
            }
        });
    }
}
