//! Manager service configuration.

use serde::{Deserialize, Serialize};

/// Settings for reaching the manager process over RPC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// RPC topic the manager listens on.
    #[serde(default = "default_rpc_topic")]
    pub rpc_topic: String,
    /// Resource plugins enabled on the manager side. The `leases` plugin
    /// is always active regardless of this list.
    #[serde(default)]
    pub plugins: Vec<String>,
    /// Depth of the in-process RPC channel before senders block.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            rpc_topic: default_rpc_topic(),
            plugins: Vec::new(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_rpc_topic() -> String {
    "reserva.manager".to_string()
}

fn default_channel_capacity() -> usize {
    64
}
