use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use auth_core::TokenError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A principal lookup against a peer service failed. Carries the
    /// correlation id so the failing hop can be traced across services.
    #[error("Upstream service unavailable")]
    Upstream { correlation_id: String },

    #[error("Internal server error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AuthError::Validation(message) => {
                (StatusCode::BAD_REQUEST, json!({ "message": message }))
            }
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": "Invalid email or password" }),
            ),
            AuthError::Upstream { correlation_id } => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({
                    "message": "Server error",
                    "correlationId": correlation_id,
                }),
            ),
            AuthError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "message": message }))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        AuthError::Internal(format!("Failed to generate token: {err}"))
    }
}
