//! Professor CRUD handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use crate::error::{Result, ServiceError};
use crate::models::{
    CreateProfessorRequest, Professor, ProfessorResponse, UpdateProfessorRequest,
};
use crate::AppState;

const HASH_COST: u32 = 10;

/// POST /api/professors (open registration).
pub async fn create_professor(
    State(state): State<AppState>,
    Json(payload): Json<CreateProfessorRequest>,
) -> Result<impl IntoResponse> {
    if payload.name.is_empty()
        || payload.email.is_empty()
        || payload.phone.is_empty()
        || payload.password.is_empty()
    {
        return Err(ServiceError::Validation(
            "All fields are required".to_string(),
        ));
    }

    // A record clashing on either email or phone is a conflict.
    let email = payload.email.to_lowercase();
    let taken = state
        .store
        .list()
        .await?
        .iter()
        .any(|p| p.email == email || p.phone == payload.phone);
    if taken {
        return Err(ServiceError::Duplicate);
    }

    let password = bcrypt::hash(&payload.password, HASH_COST)
        .map_err(|e| ServiceError::Internal(e.to_string()))?;
    let professor = state
        .store
        .create(Professor {
            id: Uuid::new_v4(),
            name: payload.name,
            email,
            phone: payload.phone,
            password,
        })
        .await?;
    tracing::info!(professor_id = %professor.id, "professor created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Professor created successfully",
            "professor": ProfessorResponse::from(professor),
        })),
    ))
}

/// GET /api/professors: full records for the auth service's credential
/// checks.
pub async fn list_professors(State(state): State<AppState>) -> Result<Json<Vec<Professor>>> {
    let professors = state.store.list().await?;
    Ok(Json(professors))
}

/// GET /api/professors/{id}
pub async fn get_professor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProfessorResponse>> {
    let id = parse_id(&id)?;
    let professor = state.store.get(id).await?;
    Ok(Json(ProfessorResponse::from(professor)))
}

/// PUT /api/professors/{id}
pub async fn update_professor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProfessorRequest>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    if payload.name.is_empty() || payload.email.is_empty() || payload.phone.is_empty() {
        return Err(ServiceError::Validation(
            "All fields are required".to_string(),
        ));
    }

    let existing = state.store.get(id).await?;
    let password = match payload.password {
        Some(plaintext) if !plaintext.is_empty() => bcrypt::hash(&plaintext, HASH_COST)
            .map_err(|e| ServiceError::Internal(e.to_string()))?,
        _ => existing.password,
    };

    let updated = state
        .store
        .update(
            id,
            Professor {
                id,
                name: payload.name,
                email: payload.email.to_lowercase(),
                phone: payload.phone,
                password,
            },
        )
        .await?;

    Ok(Json(json!({
        "message": "Professor updated successfully",
        "professor": ProfessorResponse::from(updated),
    })))
}

/// DELETE /api/professors/{id}
pub async fn delete_professor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    let professor = state.store.delete(id).await?;

    Ok(Json(json!({
        "message": "Professor deleted successfully",
        "professor": ProfessorResponse::from(professor),
    })))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| ServiceError::Validation("Invalid professor ID format".to_string()))
}
