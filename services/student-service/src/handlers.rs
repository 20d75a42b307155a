//! Student CRUD handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use crate::error::{Result, ServiceError};
use crate::models::{CreateStudentRequest, Student, StudentResponse, UpdateStudentRequest};
use crate::AppState;

const HASH_COST: u32 = 10;

/// POST /api/students (open registration).
pub async fn create_student(
    State(state): State<AppState>,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<impl IntoResponse> {
    if payload.name.is_empty() || payload.email.is_empty() || payload.password.is_empty() {
        return Err(ServiceError::Validation(
            "All fields are required".to_string(),
        ));
    }

    let password = bcrypt::hash(&payload.password, HASH_COST)
        .map_err(|e| ServiceError::Internal(e.to_string()))?;
    let student = Student {
        id: Uuid::new_v4(),
        name: payload.name,
        email: payload.email.to_lowercase(),
        password,
    };

    let student = state.store.create(student).await?;
    tracing::info!(student_id = %student.id, "student created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Student created successfully",
            "student": StudentResponse::from(student),
        })),
    ))
}

/// GET /api/students: full records, hashes included; restricted to
/// privileged and service roles that need the credentials.
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>> {
    let students = state.store.list().await?;
    Ok(Json(students))
}

/// GET /api/students/{id}
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StudentResponse>> {
    let id = parse_id(&id)?;
    let student = state.store.get(id).await?;
    Ok(Json(StudentResponse::from(student)))
}

/// PUT /api/students/{id}
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStudentRequest>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    if payload.name.is_empty() || payload.email.is_empty() {
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
            Student {
                id,
                name: payload.name,
                email: payload.email.to_lowercase(),
                password,
            },
        )
        .await?;

    Ok(Json(json!({
        "message": "Student updated successfully",
        "student": StudentResponse::from(updated),
    })))
}

/// DELETE /api/students/{id}
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    let student = state.store.delete(id).await?;
    tracing::info!(student_id = %student.id, "student deleted");

    Ok(Json(json!({
        "message": "Student deleted successfully",
        "student": StudentResponse::from(student),
    })))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| ServiceError::Validation("Invalid student ID format".to_string()))
}
