use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant maps to a JSON body of the shape `{"message": ...}`, the
/// wire format all clients of this API expect.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required request field is missing or empty.
    #[error("{0}")]
    Validation(String),

    #[error("Invalid email or password")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Upload with a disallowed file type. Same 400 on the wire as
    /// `Validation`, kept separate so logs show the taxonomy.
    #[error("{0}")]
    UnsupportedMedia(String),

    /// Persistence write failure. The detail is logged, never sent to the
    /// client.
    #[error("storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::UnsupportedMedia(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "message": message }));
        (status, body).into_response()
    }
}
