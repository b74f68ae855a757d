//! API error taxonomy.
//!
//! Every failing endpoint converges on `ApiError`, which renders as a JSON
//! body with a stable machine-readable code. Storage errors are logged in
//! full server-side and surfaced to clients as a generic message so raw
//! constraint names never leak.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Stable machine-readable code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    /// Missing or out-of-range field; user-correctable.
    Validation(String),
    /// Registration hit the case-insensitive email uniqueness constraint.
    DuplicateEmail,
    /// Unknown email or wrong password; the two are indistinguishable.
    InvalidCredentials,
    PermissionDenied(&'static str),
    NotFound(&'static str),
    RateLimited(&'static str),
    /// Persistence engine failure; fatal for the current request only.
    Storage(sea_orm::DbErr),
    Internal(&'static str),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "{}", msg),
            ApiError::DuplicateEmail => write!(f, "Email already registered"),
            ApiError::InvalidCredentials => write!(f, "Invalid email or password"),
            ApiError::PermissionDenied(msg) => write!(f, "{}", msg),
            ApiError::NotFound(what) => write!(f, "{} not found", what),
            ApiError::RateLimited(msg) => write!(f, "{}", msg),
            ApiError::Storage(_) => write!(f, "Database error"),
            ApiError::Internal(_) => write!(f, "Internal server error"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        ApiError::Storage(err)
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION"),
            ApiError::DuplicateEmail => (StatusCode::CONFLICT, "DUPLICATE_EMAIL"),
            ApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            ApiError::PermissionDenied(_) => (StatusCode::FORBIDDEN, "PERMISSION_DENIED"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::RateLimited(_) => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMIT_EXCEEDED"),
            ApiError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Storage(e) => error!(error = %e, "database error"),
            ApiError::Internal(what) => error!(what = %what, "internal error"),
            _ => {}
        }

        let (status, code) = self.status_and_code();
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
                code: Some(code.to_string()),
            }),
        )
            .into_response()
    }
}
