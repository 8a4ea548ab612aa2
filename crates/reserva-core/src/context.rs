//! Per-request caller context.
//!
//! A [`RequestContext`] is built once per inbound HTTP request from the
//! identity headers set by the authenticating proxy, is read-only after
//! construction, and travels explicitly: HTTP handlers receive it from
//! the request, and the RPC client serializes it into every call
//! envelope so the manager side observes the same caller identity.

use http::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const PROJECT_ID_HEADER: &str = "x-project-id";
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";
pub const SERVICE_CATALOG_HEADER: &str = "x-service-catalog";
pub const USER_NAME_HEADER: &str = "x-user-name";
pub const PROJECT_NAME_HEADER: &str = "x-project-name";
pub const ROLES_HEADER: &str = "x-roles";

/// Identity and catalog data for one inbound request.
///
/// Immutable after construction. Scoped to the request's lifetime via
/// [`ContextScope`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Caller user ID.
    pub user_id: String,
    /// Caller project (tenant) ID.
    pub project_id: String,
    /// Token issued by the identity service.
    pub auth_token: String,
    /// Parsed service catalog entries.
    pub service_catalog: Vec<serde_json::Value>,
    /// Caller user name.
    pub user_name: String,
    /// Caller project name.
    pub project_name: String,
    /// Roles granted to the caller, in header order.
    pub roles: Vec<String>,
}

impl RequestContext {
    /// Build a context from the identity headers of an inbound request.
    ///
    /// A missing `X-Service-Catalog` header fails with
    /// [`ErrorKind::ServiceCatalogNotFound`] and unparsable catalog JSON
    /// fails with [`ErrorKind::WrongFormat`], both before any controller
    /// or RPC work happens.
    ///
    /// [`ErrorKind::ServiceCatalogNotFound`]: crate::error::ErrorKind::ServiceCatalogNotFound
    /// [`ErrorKind::WrongFormat`]: crate::error::ErrorKind::WrongFormat
    pub fn from_headers(headers: &HeaderMap) -> AppResult<Self> {
        let raw_catalog = headers
            .get(SERVICE_CATALOG_HEADER)
            .ok_or_else(AppError::service_catalog_not_found)?;
        let raw_catalog = raw_catalog.to_str().map_err(|_| {
            AppError::wrong_format("Service catalog header is not valid UTF-8")
        })?;
        let service_catalog: Vec<serde_json::Value> = serde_json::from_str(raw_catalog)
            .map_err(|e| {
                AppError::wrong_format(format!("Service catalog is not a JSON list: {e}"))
            })?;

        let roles = required_header(headers, ROLES_HEADER)?
            .split(',')
            .map(|role| role.trim().to_string())
            .collect();

        Ok(Self {
            user_id: required_header(headers, USER_ID_HEADER)?,
            project_id: required_header(headers, PROJECT_ID_HEADER)?,
            auth_token: required_header(headers, AUTH_TOKEN_HEADER)?,
            service_catalog,
            user_name: required_header(headers, USER_NAME_HEADER)?,
            project_name: required_header(headers, PROJECT_NAME_HEADER)?,
            roles,
        })
    }

    /// Serialize the context back into the identity header set.
    ///
    /// Round-trips with [`RequestContext::from_headers`]: roles are
    /// joined on commas in their original order and the catalog is
    /// re-encoded as compact JSON.
    pub fn to_headers(&self) -> AppResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        insert_header(&mut headers, USER_ID_HEADER, &self.user_id)?;
        insert_header(&mut headers, PROJECT_ID_HEADER, &self.project_id)?;
        insert_header(&mut headers, AUTH_TOKEN_HEADER, &self.auth_token)?;
        insert_header(
            &mut headers,
            SERVICE_CATALOG_HEADER,
            &serde_json::to_string(&self.service_catalog)?,
        )?;
        insert_header(&mut headers, USER_NAME_HEADER, &self.user_name)?;
        insert_header(&mut headers, PROJECT_NAME_HEADER, &self.project_name)?;
        insert_header(&mut headers, ROLES_HEADER, &self.roles.join(","))?;
        Ok(headers)
    }

    /// Whether the caller holds the given role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

fn required_header(headers: &HeaderMap, name: &str) -> AppResult<String> {
    let value = headers
        .get(name)
        .ok_or_else(|| AppError::validation(format!("Missing required header '{name}'")))?;
    value
        .to_str()
        .map(str::to_string)
        .map_err(|_| AppError::wrong_format(format!("Header '{name}' is not valid UTF-8")))
}

fn insert_header(headers: &mut HeaderMap, name: &'static str, value: &str) -> AppResult<()> {
    let value = HeaderValue::from_str(value)
        .map_err(|_| AppError::wrong_format(format!("Header '{name}' value is not encodable")))?;
    headers.insert(HeaderName::from_static(name), value);
    Ok(())
}

/// Scoped acquisition of a [`RequestContext`] for one request.
///
/// Entered when request handling starts and released exactly once on
/// every exit path. An explicit early [`release`](Self::release) (for
/// example on an error path) makes the drop a no-op, so the scope is
/// never torn down twice for the same request.
#[derive(Debug)]
pub struct ContextScope {
    context: RequestContext,
    released: bool,
}

impl ContextScope {
    /// Enter a context scope for the current request.
    pub fn enter(context: RequestContext) -> Self {
        tracing::trace!(user_id = %context.user_id, project_id = %context.project_id,
            "entering request context");
        Self {
            context,
            released: false,
        }
    }

    /// The context held by this scope.
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Release the scope. Idempotent.
    pub fn release(&mut self) {
        if !self.released {
            self.released = true;
            tracing::trace!(user_id = %self.context.user_id, "leaving request context");
        }
    }

    /// Whether the scope has already been released.
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Drop for ContextScope {
    fn drop(&mut self) {
        self.release();
    }
}
