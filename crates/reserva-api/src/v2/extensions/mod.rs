//! v2 API extensions.
//!
//! Each extension contributes a named resource router plus an optional
//! set of extra route aliases. The registry builds the enabled set from
//! configuration against a compiled-in factory table and merges all the
//! alias maps into one route table consulted on every v2 request.

pub mod hosts;
pub mod leases;

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::http::Uri;
use axum::middleware::Next;
use axum::response::Response;

use reserva_core::{AppError, AppResult};

use crate::state::AppState;

/// Path segment that no extension ever mounts a router under.
///
/// Dead-end aliases rewrite to it, so they fall through to the standard
/// 404 fallback instead of reaching a handler.
pub const NONEXISTENT_SEGMENT: &str = "http404-nonexistingcontroller";

/// Alias segment to real segment. `None` marks a dead-end alias.
pub type RouteTable = HashMap<String, Option<String>>;

/// A pluggable v2 API resource.
pub trait ApiExtension: Send + Sync {
    /// Path segment the extension's router mounts under, e.g. `"leases"`.
    fn name(&self) -> &str;

    /// Extra route aliases contributed by this extension.
    ///
    /// A `Some(target)` entry makes the alias segment serve the target
    /// extension's routes; a `None` entry reserves the segment as a
    /// dead end.
    fn extra_routes(&self) -> RouteTable {
        RouteTable::new()
    }

    /// Build the extension's resource router.
    fn router(&self) -> Router<AppState>;
}

type ExtensionFactory = fn() -> Box<dyn ApiExtension>;

/// Every extension this binary can serve, by configuration key.
fn builtin_extensions() -> Vec<(&'static str, ExtensionFactory)> {
    vec![
        ("leases", || Box::new(leases::LeasesExtension)),
        ("oshosts", || Box::new(hosts::HostsExtension)),
    ]
}

/// The set of enabled v2 extensions plus their merged route table.
#[derive(Default)]
pub struct ExtensionRegistry {
    extensions: Vec<Box<dyn ApiExtension>>,
    routes: RouteTable,
}

impl ExtensionRegistry {
    /// Instantiate the extensions named in configuration.
    ///
    /// A configured name with no matching factory is logged and skipped;
    /// the remaining extensions still come up.
    pub fn from_config(enabled: &[String]) -> AppResult<Self> {
        let factories = builtin_extensions();
        let mut registry = Self::default();
        for name in enabled {
            match factories.iter().find(|(key, _)| *key == name.as_str()) {
                Some((_, factory)) => registry.register(factory())?,
                None => {
                    tracing::error!(extension = %name, "API extension could not be loaded");
                }
            }
        }
        Ok(registry)
    }

    /// Add one extension, merging its alias map into the route table.
    ///
    /// An unnamed extension or a name collision is a configuration
    /// error: serving an ambiguous route table is worse than refusing
    /// to start.
    pub fn register(&mut self, extension: Box<dyn ApiExtension>) -> AppResult<()> {
        let name = extension.name().to_owned();
        if name.is_empty() {
            return Err(AppError::configuration("API name must be specified"));
        }
        if self.extensions.iter().any(|e| e.name() == name) {
            return Err(AppError::configuration(format!(
                "API extension {name} is registered twice"
            )));
        }
        for (alias, target) in extension.extra_routes() {
            if self.routes.insert(alias.clone(), target).is_some() {
                return Err(AppError::configuration(format!(
                    "route alias {alias} is claimed by two extensions"
                )));
            }
        }
        self.extensions.push(extension);
        Ok(())
    }

    /// Enabled extensions in registration order.
    pub fn extensions(&self) -> &[Box<dyn ApiExtension>] {
        &self.extensions
    }

    /// Merged alias table across all enabled extensions.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }
}

impl std::fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field(
                "extensions",
                &self.extensions.iter().map(|e| e.name()).collect::<Vec<_>>(),
            )
            .field("routes", &self.routes)
            .finish()
    }
}

/// Rewrite the first path segment after `/v2` through the route table.
///
/// Alias segments are substituted with their target before routing runs,
/// dead-end aliases are pointed at [`NONEXISTENT_SEGMENT`], and segments
/// absent from the table pass through untouched. The query string is
/// preserved across a rewrite.
pub async fn rewrite_extension_routes(
    State(table): State<Arc<RouteTable>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(new_path) = rewritten_path(&table, request.uri().path()) {
        let path_and_query = match request.uri().query() {
            Some(query) => format!("{new_path}?{query}"),
            None => new_path,
        };
        match Uri::try_from(path_and_query) {
            Ok(uri) => *request.uri_mut() = uri,
            Err(e) => {
                tracing::error!(error = %e, "failed to rebuild rewritten request path");
            }
        }
    }
    next.run(request).await
}

/// Compute the rewritten path for a v2 request, if any.
fn rewritten_path(table: &RouteTable, path: &str) -> Option<String> {
    let rest = path.strip_prefix("/v2")?;
    let trimmed = rest.trim_start_matches('/');
    if trimmed.is_empty() {
        tracing::error!(%path, "v2 request carries no resource segment");
        return None;
    }
    let (segment, remainder) = match trimmed.split_once('/') {
        Some((segment, remainder)) => (segment, Some(remainder)),
        None => (trimmed, None),
    };
    let target = match table.get(segment)? {
        Some(real) => real.as_str(),
        None => NONEXISTENT_SEGMENT,
    };
    let mut rewritten = format!("/v2/{target}");
    if let Some(remainder) = remainder {
        rewritten.push('/');
        rewritten.push_str(remainder);
    }
    Some(rewritten)
}
