//! Typed client for the manager's compute-host methods.
//!
//! Host methods are namespaced with the `physical:host:` prefix on the
//! wire, matching the manager's plugin-qualified registration names.

use serde_json::json;
use uuid::Uuid;

use reserva_core::types::Host;
use reserva_core::{AppResult, RequestContext};

use crate::client::RpcClient;

/// Client side of the compute-host manager RPC API.
#[derive(Debug, Clone)]
pub struct HostRpcApi {
    client: RpcClient,
}

impl HostRpcApi {
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }

    /// Get detailed info about one compute host.
    pub async fn get_computehost(&self, ctx: &RequestContext, host_id: Uuid) -> AppResult<Host> {
        let reply = self
            .client
            .call(ctx, "physical:host:get_computehost", json!({ "host_id": host_id }))
            .await?;
        Ok(serde_json::from_value(reply)?)
    }

    /// List all compute hosts.
    pub async fn list_computehosts(
        &self,
        ctx: &RequestContext,
        query: Option<&serde_json::Value>,
    ) -> AppResult<Vec<Host>> {
        let reply = self
            .client
            .call(ctx, "physical:host:list_computehosts", json!({ "query": query }))
            .await?;
        Ok(serde_json::from_value(reply)?)
    }

    /// Create a compute host with the given values.
    pub async fn create_computehost(
        &self,
        ctx: &RequestContext,
        host_values: serde_json::Value,
    ) -> AppResult<Host> {
        let reply = self
            .client
            .call(
                ctx,
                "physical:host:create_computehost",
                json!({ "host_values": host_values }),
            )
            .await?;
        Ok(serde_json::from_value(reply)?)
    }

    /// Update a compute host with the passed values.
    pub async fn update_computehost(
        &self,
        ctx: &RequestContext,
        host_id: Uuid,
        values: serde_json::Value,
    ) -> AppResult<Host> {
        let reply = self
            .client
            .call(
                ctx,
                "physical:host:update_computehost",
                json!({ "host_id": host_id, "values": values }),
            )
            .await?;
        Ok(serde_json::from_value(reply)?)
    }

    /// Delete the specified compute host.
    pub async fn delete_computehost(&self, ctx: &RequestContext, host_id: Uuid) -> AppResult<()> {
        self.client
            .call(
                ctx,
                "physical:host:delete_computehost",
                json!({ "host_id": host_id }),
            )
            .await?;
        Ok(())
    }

    /// List allocations across all compute hosts.
    pub async fn list_allocations(
        &self,
        ctx: &RequestContext,
        query: Option<&serde_json::Value>,
    ) -> AppResult<Vec<serde_json::Value>> {
        let reply = self
            .client
            .call(ctx, "physical:host:list_allocations", json!({ "query": query }))
            .await?;
        Ok(serde_json::from_value(reply)?)
    }

    /// List allocations on one compute host.
    pub async fn get_allocations(
        &self,
        ctx: &RequestContext,
        host_id: Uuid,
        query: Option<&serde_json::Value>,
    ) -> AppResult<Vec<serde_json::Value>> {
        let reply = self
            .client
            .call(
                ctx,
                "physical:host:get_allocations",
                json!({ "host_id": host_id, "query": query }),
            )
            .await?;
        Ok(serde_json::from_value(reply)?)
    }
}
