//! Context hook: builds the caller context before the body is touched.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use reserva_core::RequestContext;
use reserva_core::context::ContextScope;

use crate::error::ApiError;

/// Builds a [`RequestContext`] from the identity headers and attaches it
/// to the request so downstream handlers can read the caller identity.
///
/// If the headers are missing or malformed the request fails here with a
/// structured 4xx body and never reaches a handler. The scope is
/// released exactly once when the response has been produced; the drop
/// guard covers early exits so no path releases it twice.
pub async fn context_hook(mut request: Request, next: Next) -> Response {
    let ctx = match RequestContext::from_headers(request.headers()) {
        Ok(ctx) => ctx,
        Err(err) => return ApiError(err).into_response(),
    };

    let mut scope = ContextScope::enter(ctx.clone());
    request.extensions_mut().insert(ctx);

    let response = next.run(request).await;

    scope.release();
    response
}
