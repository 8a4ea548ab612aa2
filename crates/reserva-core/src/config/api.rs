//! API version and extension configuration.

use serde::{Deserialize, Serialize};

/// API surface configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Whether the legacy v1 API generation is served. When false the
    /// process serves the v2 app directly, without the version selector.
    #[serde(default = "default_true")]
    pub enable_v1: bool,
    /// Which v2 API extensions to mount, by registration name.
    #[serde(default = "default_v2_extensions")]
    pub v2_extensions: Vec<String>,
    /// Public endpoint used when building version self links.
    #[serde(default = "default_public_endpoint")]
    pub public_endpoint: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enable_v1: default_true(),
            v2_extensions: default_v2_extensions(),
            public_endpoint: default_public_endpoint(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_v2_extensions() -> Vec<String> {
    vec!["oshosts".to_string(), "leases".to_string()]
}

fn default_public_endpoint() -> String {
    "http://localhost:1234".to_string()
}
