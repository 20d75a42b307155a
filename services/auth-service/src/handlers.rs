//! Login and key discovery handlers.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use auth_core::{mint_token, Jwks, Role};
use axum_middleware::CorrelationId;

use crate::error::{AuthError, Result};
use crate::principal_store::StoredPrincipal;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
}

/// GET /.well-known/jwks.json
///
/// Publishes this authority's verification key so resource services can
/// validate tokens without any shared secret.
pub async fn get_jwks(State(state): State<AppState>) -> Result<Json<Jwks>> {
    state.keys.jwks().map(Json).map_err(|err| {
        tracing::error!(error = %err, "failed to derive discovery document");
        AuthError::Internal("Failed to retrieve public keys".to_string())
    })
}

/// POST /api/login/student
pub async fn login_student(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    require_fields(&payload)?;

    let student = state
        .principals
        .find_student_by_email(&payload.email, &correlation_id)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;
    check_password(&payload.password, &student)?;

    let token = mint_token(&state.keys, &student.id.to_string(), &[Role::Student])?;
    tracing::info!(student_id = %student.id, "student logged in");

    Ok(Json(LoginResponse {
        message: "student login successfully".to_string(),
        access_token: token,
    }))
}

/// POST /api/login/professor
pub async fn login_professor(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    require_fields(&payload)?;

    let professor = state
        .principals
        .find_professor_by_email(&payload.email, &correlation_id)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;
    check_password(&payload.password, &professor)?;

    let token = mint_token(&state.keys, &professor.id.to_string(), &[Role::Professor])?;
    tracing::info!(professor_id = %professor.id, "professor logged in");

    Ok(Json(LoginResponse {
        message: "professor login successfully".to_string(),
        access_token: token,
    }))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

fn require_fields(payload: &LoginRequest) -> Result<()> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(AuthError::Validation(
            "Email and password are required".to_string(),
        ));
    }
    Ok(())
}

/// Constant-time comparison of the supplied secret against the stored
/// bcrypt hash; any mismatch or hash-parse failure is an invalid credential.
fn check_password(password: &str, principal: &StoredPrincipal) -> Result<()> {
    let matches =
        bcrypt::verify(password, &principal.password).map_err(|_| AuthError::InvalidCredentials)?;
    if !matches {
        return Err(AuthError::InvalidCredentials);
    }
    Ok(())
}
