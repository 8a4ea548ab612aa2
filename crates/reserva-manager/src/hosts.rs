//! Compute-host endpoints, registered under the `physical:host:` prefix.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use uuid::Uuid;

use reserva_core::types::Host;
use reserva_core::{AppError, AppResult, RequestContext};
use reserva_rpc::RpcDispatcher;

#[derive(Debug, Deserialize)]
struct HostRefArgs {
    host_id: Uuid,
}

#[derive(Debug, Deserialize)]
struct CreateHostArgs {
    host_values: HostValues,
}

#[derive(Debug, Deserialize)]
struct UpdateHostArgs {
    host_id: Uuid,
    values: HostUpdate,
}

#[derive(Debug, Deserialize)]
struct HostValues {
    hostname: String,
    vcpus: u32,
    memory_mb: u64,
    #[serde(default)]
    extra_capabilities: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct HostUpdate {
    #[serde(default)]
    reservable: Option<bool>,
    #[serde(default)]
    extra_capabilities: Option<serde_json::Map<String, serde_json::Value>>,
}

/// In-memory compute-host store exposed over RPC.
#[derive(Debug, Default)]
pub struct HostManager {
    hosts: RwLock<HashMap<Uuid, Host>>,
}

impl HostManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the host methods on a dispatcher.
    pub fn register(self: &Arc<Self>, dispatcher: &mut RpcDispatcher) -> AppResult<()> {
        let mgr = Arc::clone(self);
        dispatcher.register("physical:host:get_computehost", move |ctx, args| {
            let mgr = Arc::clone(&mgr);
            async move { mgr.get_computehost(ctx, args).await }
        })?;

        let mgr = Arc::clone(self);
        dispatcher.register("physical:host:list_computehosts", move |ctx, args| {
            let mgr = Arc::clone(&mgr);
            async move { mgr.list_computehosts(ctx, args).await }
        })?;

        let mgr = Arc::clone(self);
        dispatcher.register("physical:host:create_computehost", move |ctx, args| {
            let mgr = Arc::clone(&mgr);
            async move { mgr.create_computehost(ctx, args).await }
        })?;

        let mgr = Arc::clone(self);
        dispatcher.register("physical:host:update_computehost", move |ctx, args| {
            let mgr = Arc::clone(&mgr);
            async move { mgr.update_computehost(ctx, args).await }
        })?;

        let mgr = Arc::clone(self);
        dispatcher.register("physical:host:delete_computehost", move |ctx, args| {
            let mgr = Arc::clone(&mgr);
            async move { mgr.delete_computehost(ctx, args).await }
        })?;

        let mgr = Arc::clone(self);
        dispatcher.register("physical:host:list_allocations", move |ctx, args| {
            let mgr = Arc::clone(&mgr);
            async move { mgr.list_allocations(ctx, args).await }
        })?;

        let mgr = Arc::clone(self);
        dispatcher.register("physical:host:get_allocations", move |ctx, args| {
            let mgr = Arc::clone(&mgr);
            async move { mgr.get_allocations(ctx, args).await }
        })?;

        Ok(())
    }

    async fn get_computehost(
        &self,
        _ctx: RequestContext,
        args: serde_json::Value,
    ) -> AppResult<serde_json::Value> {
        let args: HostRefArgs = serde_json::from_value(args)?;
        let hosts = self.hosts.read().await;
        let host = hosts
            .get(&args.host_id)
            .ok_or_else(|| AppError::not_found(format!("Host '{}' not found", args.host_id)))?;
        Ok(serde_json::to_value(host)?)
    }

    async fn list_computehosts(
        &self,
        _ctx: RequestContext,
        _args: serde_json::Value,
    ) -> AppResult<serde_json::Value> {
        let hosts = self.hosts.read().await;
        let mut listed: Vec<&Host> = hosts.values().collect();
        listed.sort_by(|a, b| a.hostname.cmp(&b.hostname));
        Ok(serde_json::to_value(listed)?)
    }

    async fn create_computehost(
        &self,
        _ctx: RequestContext,
        args: serde_json::Value,
    ) -> AppResult<serde_json::Value> {
        let args: CreateHostArgs = serde_json::from_value(args)
            .map_err(|e| AppError::validation(format!("Invalid host values: {e}")))?;
        let values = args.host_values;

        let host = Host {
            id: Uuid::new_v4(),
            hostname: values.hostname,
            vcpus: values.vcpus,
            memory_mb: values.memory_mb,
            reservable: true,
            extra_capabilities: values.extra_capabilities,
        };

        tracing::info!(host_id = %host.id, hostname = %host.hostname, "compute host enrolled");

        let mut hosts = self.hosts.write().await;
        hosts.insert(host.id, host.clone());
        Ok(serde_json::to_value(host)?)
    }

    async fn update_computehost(
        &self,
        _ctx: RequestContext,
        args: serde_json::Value,
    ) -> AppResult<serde_json::Value> {
        let args: UpdateHostArgs = serde_json::from_value(args)
            .map_err(|e| AppError::validation(format!("Invalid host update: {e}")))?;

        let mut hosts = self.hosts.write().await;
        let host = hosts
            .get_mut(&args.host_id)
            .ok_or_else(|| AppError::not_found(format!("Host '{}' not found", args.host_id)))?;

        if let Some(reservable) = args.values.reservable {
            host.reservable = reservable;
        }
        if let Some(caps) = args.values.extra_capabilities {
            host.extra_capabilities = caps;
        }

        Ok(serde_json::to_value(&*host)?)
    }

    async fn delete_computehost(
        &self,
        _ctx: RequestContext,
        args: serde_json::Value,
    ) -> AppResult<serde_json::Value> {
        let args: HostRefArgs = serde_json::from_value(args)?;
        let mut hosts = self.hosts.write().await;
        hosts
            .remove(&args.host_id)
            .ok_or_else(|| AppError::not_found(format!("Host '{}' not found", args.host_id)))?;
        tracing::info!(host_id = %args.host_id, "compute host removed");
        Ok(json!(null))
    }

    async fn list_allocations(
        &self,
        _ctx: RequestContext,
        _args: serde_json::Value,
    ) -> AppResult<serde_json::Value> {
        let hosts = self.hosts.read().await;
        let allocations: Vec<serde_json::Value> = hosts
            .keys()
            .map(|id| json!({ "resource_id": id, "reservations": [] }))
            .collect();
        Ok(json!(allocations))
    }

    async fn get_allocations(
        &self,
        _ctx: RequestContext,
        args: serde_json::Value,
    ) -> AppResult<serde_json::Value> {
        let args: HostRefArgs = serde_json::from_value(args)?;
        let hosts = self.hosts.read().await;
        if !hosts.contains_key(&args.host_id) {
            return Err(AppError::not_found(format!(
                "Host '{}' not found",
                args.host_id
            )));
        }
        Ok(json!([{ "resource_id": args.host_id, "reservations": [] }]))
    }
}
