//! API version descriptors returned by the version listing endpoints.

use serde::{Deserialize, Serialize};

/// A hyperlink attached to a version descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionLink {
    /// Link target.
    pub href: String,
    /// Link relation, `"self"` for the version's own endpoint.
    pub rel: String,
}

/// One available API version.
///
/// Pure value, constructed on demand for each version listing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Version identifier, e.g. `"v1.0"`.
    pub id: String,
    /// Lifecycle status, e.g. `"CURRENT"`.
    pub status: String,
    /// Links to the version's endpoint.
    pub links: Vec<VersionLink>,
}

impl Version {
    /// Build a descriptor with a single self link under `endpoint/path`.
    pub fn with_self_link(id: &str, status: &str, endpoint: &str, path: &str) -> Self {
        Self {
            id: id.to_string(),
            status: status.to_string(),
            links: vec![VersionLink {
                href: format!("{}/{}", endpoint.trim_end_matches('/'), path),
                rel: "self".to_string(),
            }],
        }
    }
}
