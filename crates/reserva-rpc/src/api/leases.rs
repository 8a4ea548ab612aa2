//! Typed client for the manager's lease methods.

use serde_json::json;
use uuid::Uuid;

use reserva_core::types::Lease;
use reserva_core::{AppResult, RequestContext};

use crate::client::RpcClient;

/// Client side of the lease manager RPC API.
#[derive(Debug, Clone)]
pub struct LeaseRpcApi {
    client: RpcClient,
}

impl LeaseRpcApi {
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }

    /// Get detailed info about one lease.
    pub async fn get_lease(&self, ctx: &RequestContext, lease_id: Uuid) -> AppResult<Lease> {
        let reply = self
            .client
            .call(ctx, "get_lease", json!({ "lease_id": lease_id }))
            .await?;
        Ok(serde_json::from_value(reply)?)
    }

    /// List all leases, optionally filtered by project and query.
    pub async fn list_leases(
        &self,
        ctx: &RequestContext,
        project_id: Option<&str>,
        query: Option<&serde_json::Value>,
    ) -> AppResult<Vec<Lease>> {
        let reply = self
            .client
            .call(
                ctx,
                "list_leases",
                json!({ "project_id": project_id, "query": query }),
            )
            .await?;
        Ok(serde_json::from_value(reply)?)
    }

    /// Create a lease with the given values.
    pub async fn create_lease(
        &self,
        ctx: &RequestContext,
        lease_values: serde_json::Value,
    ) -> AppResult<Lease> {
        let reply = self
            .client
            .call(ctx, "create_lease", json!({ "lease_values": lease_values }))
            .await?;
        Ok(serde_json::from_value(reply)?)
    }

    /// Update a lease with the passed values.
    pub async fn update_lease(
        &self,
        ctx: &RequestContext,
        lease_id: Uuid,
        values: serde_json::Value,
    ) -> AppResult<Lease> {
        let reply = self
            .client
            .call(
                ctx,
                "update_lease",
                json!({ "lease_id": lease_id, "values": values }),
            )
            .await?;
        Ok(serde_json::from_value(reply)?)
    }

    /// Delete the specified lease.
    pub async fn delete_lease(&self, ctx: &RequestContext, lease_id: Uuid) -> AppResult<()> {
        self.client
            .call(ctx, "delete_lease", json!({ "lease_id": lease_id }))
            .await?;
        Ok(())
    }

    /// List the resource plugins active on the manager.
    pub async fn get_plugins(&self, ctx: &RequestContext) -> AppResult<Vec<serde_json::Value>> {
        let reply = self.client.call(ctx, "get_plugins", json!({})).await?;
        Ok(serde_json::from_value(reply)?)
    }
}
