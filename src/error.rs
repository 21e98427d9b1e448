// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::inference::UpstreamError;
use crate::store::StoreError;

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Every failure that reaches the HTTP boundary is converted into one of
/// these variants and rendered as the uniform response envelope:
/// `{"status": "error" | "unauthorized", "message": ...}`.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    Validation(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    Store(String),
    Upstream(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Envelope `status` field. The original API distinguishes rejected
    /// credentials from every other failure.
    pub fn status_label(&self) -> &'static str {
        match self {
            ApiError::Unauthorized(_) => "unauthorized",
            _ => "error",
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Store(msg) => msg,
            ApiError::Upstream(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "status": self.status_label(),
            "message": self.message(),
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn store(message: impl Into<String>) -> Self {
        ApiError::Store(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        ApiError::Upstream(message.into())
    }
}

// Convert store/provider errors to ApiError at the boundary.
// Internal detail is logged, never leaked to clients.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!("canvas store error: {}", err);
        ApiError::store("Canvas store error")
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        tracing::error!("inference upstream error: {}", err);
        ApiError::upstream("Inference request failed")
    }
}

impl From<crate::canvas::CanvasError> for ApiError {
    fn from(err: crate::canvas::CanvasError) -> Self {
        ApiError::validation(err.to_string())
    }
}

// Malformed request bodies surface as validation errors in our envelope
// instead of axum's default plain-text rejection.
impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        ApiError::validation(format!("Invalid JSON body: {}", err.body_text()))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
