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

    #[error("Student not found")]
    NotFound,

    #[error("Student with this email exists")]
    Duplicate,

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
            ServiceError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "message": "Student not found" }),
            ),
            ServiceError::Duplicate => (
                StatusCode::CONFLICT,
                json!({ "message": "Student with this email exists" }),
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
            StoreError::NotFound => ServiceError::NotFound,
            StoreError::DuplicateKey => ServiceError::Duplicate,
        }
    }
}
