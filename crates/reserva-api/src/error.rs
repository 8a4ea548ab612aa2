//! Maps domain `AppError` to HTTP responses.
//!
//! Every error, regardless of origin, renders as
//! `{"error": <status-int>, "error_message": <text>}` — no stack traces
//! or internal identifiers leak to the caller.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use reserva_core::error::AppError;

/// Standard API error response body, shared by both API generations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// HTTP status code as an integer.
    pub error: u16,
    /// Human-readable message.
    pub error_message: String,
}

/// Newtype carrying an [`AppError`] across the axum response boundary.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Handler result rendering failures through [`ApiError`].
pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.kind.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(kind = %self.0.kind, error = %self.0.message, "internal server error");
        }

        let body = ApiErrorBody {
            error: status.as_u16(),
            error_message: self.0.message,
        };

        (status, Json(body)).into_response()
    }
}

/// Fallback handler giving unmatched routes the standard error body.
pub async fn default_not_found() -> Response {
    ApiError(AppError::not_found("Resource not found")).into_response()
}
