//! # reserva-rpc
//!
//! The RPC boundary between the Reserva API layer and the manager
//! process: call envelopes, the transport seam, the client used by HTTP
//! handlers, and the method dispatcher that runs on the manager side.
//!
//! The caller's [`RequestContext`](reserva_core::RequestContext) is
//! serialized into every envelope and reconstructed before the target
//! method runs, so manager handlers always observe the identity of the
//! original HTTP caller.

pub mod api;
pub mod client;
pub mod dispatcher;
pub mod envelope;
pub mod transport;

pub use client::RpcClient;
pub use dispatcher::RpcDispatcher;
pub use envelope::RpcEnvelope;
pub use transport::{LocalTransport, Transport};
