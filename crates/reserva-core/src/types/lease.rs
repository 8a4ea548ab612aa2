//! Lease and compute-host value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a lease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeaseStatus {
    Pending,
    Active,
    Terminated,
    Error,
}

impl Default for LeaseStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// A reservation record for a resource over a time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lease {
    /// Unique lease identifier.
    pub id: Uuid,
    /// Display name chosen by the caller.
    pub name: String,
    /// When the lease should start.
    pub start_date: DateTime<Utc>,
    /// When the lease should end.
    pub end_date: DateTime<Utc>,
    /// ID of the user who created the lease.
    pub user_id: String,
    /// ID of the project the lease belongs to.
    pub project_id: String,
    /// Reservations belonging to the lease.
    #[serde(default)]
    pub reservations: Vec<serde_json::Value>,
    /// Events attached to the lease.
    #[serde(default)]
    pub events: Vec<serde_json::Value>,
    /// When pre-expiry actions are taken, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_end_date: Option<DateTime<Utc>>,
    /// Current lifecycle status.
    #[serde(default)]
    pub status: LeaseStatus,
}

/// A physical compute host available for reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Host {
    /// Unique host identifier.
    pub id: Uuid,
    /// Hypervisor hostname.
    pub hostname: String,
    /// Number of virtual CPUs.
    pub vcpus: u32,
    /// Memory in megabytes.
    pub memory_mb: u64,
    /// Whether the host can receive new reservations.
    #[serde(default)]
    pub reservable: bool,
    /// Free-form extra capabilities.
    #[serde(default)]
    pub extra_capabilities: serde_json::Map<String, serde_json::Value>,
}
