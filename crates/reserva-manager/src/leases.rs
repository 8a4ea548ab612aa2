//! Lease endpoints: CRUD over an in-memory store plus plugin listing.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use uuid::Uuid;

use reserva_core::types::{Lease, LeaseStatus};
use reserva_core::{AppError, AppResult, RequestContext};
use reserva_rpc::RpcDispatcher;

#[derive(Debug, Deserialize)]
struct LeaseRefArgs {
    lease_id: Uuid,
}

#[derive(Debug, Deserialize)]
struct ListLeasesArgs {
    #[serde(default)]
    project_id: Option<String>,
    #[serde(default)]
    query: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CreateLeaseArgs {
    lease_values: LeaseValues,
}

#[derive(Debug, Deserialize)]
struct UpdateLeaseArgs {
    lease_id: Uuid,
    values: LeaseUpdate,
}

/// Values accepted when creating a lease.
#[derive(Debug, Deserialize)]
struct LeaseValues {
    name: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    #[serde(default)]
    before_end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    reservations: Vec<serde_json::Value>,
}

/// Fields that may change on update.
#[derive(Debug, Deserialize)]
struct LeaseUpdate {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    end_date: Option<DateTime<Utc>>,
}

/// In-memory lease store exposed over RPC.
#[derive(Debug)]
pub struct LeaseManager {
    leases: RwLock<HashMap<Uuid, Lease>>,
    plugins: Vec<String>,
}

impl LeaseManager {
    pub fn new(plugins: &[String]) -> Self {
        Self {
            leases: RwLock::new(HashMap::new()),
            plugins: plugins.to_vec(),
        }
    }

    /// Register the lease methods on a dispatcher.
    pub fn register(self: &Arc<Self>, dispatcher: &mut RpcDispatcher) -> AppResult<()> {
        let mgr = Arc::clone(self);
        dispatcher.register("get_lease", move |ctx, args| {
            let mgr = Arc::clone(&mgr);
            async move { mgr.get_lease(ctx, args).await }
        })?;

        let mgr = Arc::clone(self);
        dispatcher.register("list_leases", move |ctx, args| {
            let mgr = Arc::clone(&mgr);
            async move { mgr.list_leases(ctx, args).await }
        })?;

        let mgr = Arc::clone(self);
        dispatcher.register("create_lease", move |ctx, args| {
            let mgr = Arc::clone(&mgr);
            async move { mgr.create_lease(ctx, args).await }
        })?;

        let mgr = Arc::clone(self);
        dispatcher.register("update_lease", move |ctx, args| {
            let mgr = Arc::clone(&mgr);
            async move { mgr.update_lease(ctx, args).await }
        })?;

        let mgr = Arc::clone(self);
        dispatcher.register("delete_lease", move |ctx, args| {
            let mgr = Arc::clone(&mgr);
            async move { mgr.delete_lease(ctx, args).await }
        })?;

        let mgr = Arc::clone(self);
        dispatcher.register("get_plugins", move |ctx, args| {
            let mgr = Arc::clone(&mgr);
            async move { mgr.get_plugins(ctx, args).await }
        })?;

        Ok(())
    }

    async fn get_lease(
        &self,
        _ctx: RequestContext,
        args: serde_json::Value,
    ) -> AppResult<serde_json::Value> {
        let args: LeaseRefArgs = serde_json::from_value(args)?;
        let leases = self.leases.read().await;
        let lease = leases
            .get(&args.lease_id)
            .ok_or_else(|| AppError::not_found(format!("Lease '{}' not found", args.lease_id)))?;
        Ok(serde_json::to_value(lease)?)
    }

    async fn list_leases(
        &self,
        _ctx: RequestContext,
        args: serde_json::Value,
    ) -> AppResult<serde_json::Value> {
        let args: ListLeasesArgs = serde_json::from_value(args)?;
        let leases = self.leases.read().await;

        let status_filter = args
            .query
            .as_ref()
            .and_then(|q| q.get("status"))
            .and_then(|s| s.as_str())
            .map(str::to_string);

        let mut matching: Vec<&Lease> = leases
            .values()
            .filter(|lease| match &args.project_id {
                Some(project_id) => &lease.project_id == project_id,
                None => true,
            })
            .filter(|lease| match &status_filter {
                Some(status) => {
                    serde_json::to_value(lease.status).ok() == Some(json!(status))
                }
                None => true,
            })
            .collect();
        matching.sort_by_key(|lease| (lease.start_date, lease.id));

        Ok(serde_json::to_value(matching)?)
    }

    async fn create_lease(
        &self,
        ctx: RequestContext,
        args: serde_json::Value,
    ) -> AppResult<serde_json::Value> {
        let args: CreateLeaseArgs = serde_json::from_value(args)
            .map_err(|e| AppError::validation(format!("Invalid lease values: {e}")))?;
        let values = args.lease_values;

        if values.start_date >= values.end_date {
            return Err(AppError::validation(
                "Lease start date must precede its end date",
            ));
        }

        let lease = Lease {
            id: Uuid::new_v4(),
            name: values.name,
            start_date: values.start_date,
            end_date: values.end_date,
            user_id: ctx.user_id.clone(),
            project_id: ctx.project_id.clone(),
            reservations: values.reservations,
            events: Vec::new(),
            before_end_date: values.before_end_date,
            status: LeaseStatus::Pending,
        };

        tracing::info!(lease_id = %lease.id, name = %lease.name, user_id = %ctx.user_id,
            "lease created");

        let mut leases = self.leases.write().await;
        leases.insert(lease.id, lease.clone());
        Ok(serde_json::to_value(lease)?)
    }

    async fn update_lease(
        &self,
        _ctx: RequestContext,
        args: serde_json::Value,
    ) -> AppResult<serde_json::Value> {
        let args: UpdateLeaseArgs = serde_json::from_value(args)
            .map_err(|e| AppError::validation(format!("Invalid lease update: {e}")))?;

        let mut leases = self.leases.write().await;
        let stored = leases
            .get_mut(&args.lease_id)
            .ok_or_else(|| AppError::not_found(format!("Lease '{}' not found", args.lease_id)))?;

        // Validate on a copy so a rejected update leaves the store untouched.
        let mut updated = stored.clone();
        if let Some(name) = args.values.name {
            updated.name = name;
        }
        if let Some(start_date) = args.values.start_date {
            updated.start_date = start_date;
        }
        if let Some(end_date) = args.values.end_date {
            updated.end_date = end_date;
        }
        if updated.start_date >= updated.end_date {
            return Err(AppError::validation(
                "Lease start date must precede its end date",
            ));
        }

        *stored = updated;
        Ok(serde_json::to_value(&*stored)?)
    }

    async fn delete_lease(
        &self,
        _ctx: RequestContext,
        args: serde_json::Value,
    ) -> AppResult<serde_json::Value> {
        let args: LeaseRefArgs = serde_json::from_value(args)?;
        let mut leases = self.leases.write().await;
        leases
            .remove(&args.lease_id)
            .ok_or_else(|| AppError::not_found(format!("Lease '{}' not found", args.lease_id)))?;
        tracing::info!(lease_id = %args.lease_id, "lease deleted");
        Ok(json!(null))
    }

    async fn get_plugins(
        &self,
        _ctx: RequestContext,
        _args: serde_json::Value,
    ) -> AppResult<serde_json::Value> {
        let mut plugins = vec![json!({ "name": "leases" })];
        plugins.extend(
            self.plugins
                .iter()
                .filter(|name| name.as_str() != "leases")
                .map(|name| json!({ "name": name })),
        );
        Ok(json!(plugins))
    }
}
