use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lexis_core::IndexError;
use serde_json::json;

/// Errors returned by handlers, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    /// Index awaiting a commit (409).
    NotNormalized,
    NotFound(String),
    /// Item found but nothing to query with (422).
    NoContent(String),
    BadRequest(String),
    Unauthorized(String),
}

impl From<IndexError> for ApiError {
    fn from(err: IndexError) -> Self {
        match err {
            IndexError::NotNormalized => ApiError::NotNormalized,
            IndexError::ItemNotFound(_) => ApiError::NotFound(err.to_string()),
            IndexError::NoContent(_) => ApiError::NoContent(err.to_string()),
            IndexError::OutOfRange { .. } => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotNormalized => (StatusCode::CONFLICT, IndexError::NotNormalized.to_string()),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            ApiError::NoContent(m) => (StatusCode::UNPROCESSABLE_ENTITY, m),
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
