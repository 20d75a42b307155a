//! Enrollment handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use auth_core::Jwks;
use axum_middleware::CorrelationId;

use crate::error::{Result, ServiceError};
use crate::models::{CreateEnrollmentRequest, Enrollment, EnrollmentView};
use crate::peers::find_by_id;
use crate::AppState;

/// GET /.well-known/jwks.json
///
/// Peers verifying this service's self-minted tokens fetch the public key
/// here.
pub async fn get_jwks(State(state): State<AppState>) -> Result<Json<Jwks>> {
    state.keys.jwks().map(Json).map_err(|err| {
        tracing::error!(error = %err, "failed to derive discovery document");
        ServiceError::Internal("Failed to retrieve public keys".to_string())
    })
}

/// POST /api/enrollments
///
/// Both referenced records are validated against their owning services
/// before the enrollment is stored.
pub async fn create_enrollment(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    Json(payload): Json<CreateEnrollmentRequest>,
) -> Result<impl IntoResponse> {
    let (student_id, course_id) = match (payload.student, payload.course) {
        (Some(student), Some(course)) => (parse_student_id(&student)?, parse_course_id(&course)?),
        _ => {
            return Err(ServiceError::Validation(
                "Student and Course are required".to_string(),
            ))
        }
    };

    let students = state.peers.fetch_students(&correlation_id).await?;
    if find_by_id(&students, student_id).is_none() {
        return Err(ServiceError::NotFound("Student not found".to_string()));
    }

    let courses = state.peers.fetch_courses(&correlation_id).await?;
    if find_by_id(&courses, course_id).is_none() {
        return Err(ServiceError::NotFound("Course not found".to_string()));
    }

    let enrollment = state
        .store
        .create(Enrollment {
            id: Uuid::new_v4(),
            student: student_id,
            course: course_id,
            enrollment_date: Utc::now(),
        })
        .await?;
    tracing::info!(
        enrollment_id = %enrollment.id,
        student_id = %student_id,
        course_id = %course_id,
        "enrollment created"
    );

    Ok((StatusCode::CREATED, Json(enrollment)))
}

/// GET /api/enrollments
pub async fn list_enrollments(State(state): State<AppState>) -> Result<Json<Vec<Enrollment>>> {
    let enrollments = state.store.list().await?;
    Ok(Json(enrollments))
}

/// GET /api/enrollments/{id}, with the referenced student and course expanded.
pub async fn get_enrollment(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    Path(id): Path<String>,
) -> Result<Json<EnrollmentView>> {
    let id = parse_enrollment_id(&id)?;
    let enrollment = state.store.get(id).await?;

    let students = state.peers.fetch_students(&correlation_id).await?;
    let courses = state.peers.fetch_courses(&correlation_id).await?;

    Ok(Json(expand(&enrollment, &students, &courses)))
}

/// GET /api/enrollments/student/{id}: a student's enrollments, courses
/// expanded. Self-scoped students only reach their own id (ownership guard
/// runs before this handler).
pub async fn enrollments_by_student(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    Path(id): Path<String>,
) -> Result<Json<Vec<EnrollmentView>>> {
    let student_id = parse_student_id(&id)?;

    let enrollments: Vec<Enrollment> = state
        .store
        .list()
        .await?
        .into_iter()
        .filter(|enrollment| enrollment.student == student_id)
        .collect();
    if enrollments.is_empty() {
        return Err(ServiceError::NotFound(
            "No enrollments found for this student".to_string(),
        ));
    }

    let courses = state.peers.fetch_courses(&correlation_id).await?;
    let views = enrollments
        .iter()
        .map(|enrollment| expand(enrollment, &[], &courses))
        .collect();

    Ok(Json(views))
}

/// DELETE /api/enrollments/{id}
pub async fn delete_enrollment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_enrollment_id(&id)?;
    let enrollment = state.store.delete(id).await?;

    Ok(Json(json!({
        "message": "Enrollment deleted successfully",
        "enrollment": enrollment,
    })))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Splice the referenced records into the enrollment; unresolved
/// references fall back to the bare id.
fn expand(enrollment: &Enrollment, students: &[Value], courses: &[Value]) -> EnrollmentView {
    EnrollmentView {
        id: enrollment.id,
        student: find_by_id(students, enrollment.student)
            .unwrap_or_else(|| Value::String(enrollment.student.to_string())),
        course: find_by_id(courses, enrollment.course)
            .unwrap_or_else(|| Value::String(enrollment.course.to_string())),
        enrollment_date: enrollment.enrollment_date,
    }
}

fn parse_enrollment_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| ServiceError::Validation("Invalid enrollment ID format".to_string()))
}

fn parse_student_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| ServiceError::Validation("Invalid student ID format".to_string()))
}

fn parse_course_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| ServiceError::Validation("Invalid course ID format".to_string()))
}
