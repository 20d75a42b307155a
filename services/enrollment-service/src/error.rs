use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use entity_store::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Duplicate enrollment")]
    Duplicate,

    /// A peer lookup (student or course service) failed; carries the
    /// correlation id for cross-service tracing.
    #[error("Upstream service unavailable")]
    Upstream { correlation_id: String },

    #[error("Server Error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ServiceError::Validation(message) => {
                (StatusCode::BAD_REQUEST, json!({ "message": message }))
            }
            ServiceError::NotFound(message) => {
                (StatusCode::NOT_FOUND, json!({ "message": message }))
            }
            ServiceError::Duplicate => (
                StatusCode::CONFLICT,
                json!({
                    "message":
                        "Duplicate enrollment: Student is already enrolled in this course."
                }),
            ),
            ServiceError::Upstream { correlation_id } => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({
                    "message": "Upstream service unavailable",
                    "correlationId": correlation_id,
                }),
            ),
            ServiceError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": "Server Error", "error": message }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ServiceError::NotFound("Enrollment not found".to_string()),
            StoreError::DuplicateKey => ServiceError::Duplicate,
        }
    }
}
