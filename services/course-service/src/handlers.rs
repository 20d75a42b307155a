//! Course CRUD handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use axum_middleware::AuthPrincipal;

use crate::error::{Result, ServiceError};
use crate::models::{Course, CourseRequest};
use crate::AppState;

/// POST /api/courses
///
/// `created_by` always comes from the authenticated principal; a value in
/// the request body would be ignored by construction.
pub async fn create_course(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(payload): Json<CourseRequest>,
) -> Result<impl IntoResponse> {
    validate(&payload)?;

    let course = state
        .store
        .create(Course {
            id: Uuid::new_v4(),
            name: payload.name,
            code: payload.code,
            description: payload.description,
            schedule: payload.schedule,
            created_by: principal.id,
        })
        .await?;
    tracing::info!(course_id = %course.id, code = %course.code, "course created");

    Ok((StatusCode::CREATED, Json(course)))
}

/// GET /api/courses
pub async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>> {
    let courses = state.store.list().await?;
    Ok(Json(courses))
}

/// GET /api/courses/{id}
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Course>> {
    let id = parse_id(&id)?;
    let course = state.store.get(id).await?;
    Ok(Json(course))
}

/// PUT /api/courses/{id}; `created_by` is immutable across updates.
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CourseRequest>,
) -> Result<Json<Course>> {
    let id = parse_id(&id)?;
    validate(&payload)?;

    let existing = state.store.get(id).await?;
    let updated = state
        .store
        .update(
            id,
            Course {
                id,
                name: payload.name,
                code: payload.code,
                description: payload.description,
                schedule: payload.schedule,
                created_by: existing.created_by,
            },
        )
        .await?;

    Ok(Json(updated))
}

/// DELETE /api/courses/{id}
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    let course = state.store.delete(id).await?;
    tracing::info!(course_id = %course.id, "course deleted");

    Ok(Json(json!({
        "message": "Course deleted successfully",
        "course": course,
    })))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

fn validate(payload: &CourseRequest) -> Result<()> {
    if payload.name.is_empty() || payload.code.is_empty() || payload.description.is_empty() {
        return Err(ServiceError::Validation(
            "Name, code and description are required".to_string(),
        ));
    }
    Ok(())
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| ServiceError::Validation("Invalid course ID format".to_string()))
}
