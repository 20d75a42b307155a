//! Student service: CRUD over student records.
//!
//! Thin collaborator of the auth fabric. Registration is open; every other
//! route is guarded by the role gate, which verifies bearer tokens against
//! the issuing authority's discovery document. The full list (including
//! credential hashes) is only served to privileged and service roles: the
//! auth service reads it to check passwords, the enrollment service to
//! validate enrollments.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use axum::routing::{delete, get, post, put};
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use auth_core::{Role, TokenVerifier};
use axum_middleware::{correlation_id_middleware, require_roles, restrict_to_own_data};
use entity_store::MemoryStore;

use crate::models::Student;

const LIST_ROLES: &[Role] = &[
    Role::Admin,
    Role::Professor,
    Role::AuthService,
    Role::EnrollmentService,
];
const READ_ROLES: &[Role] = &[Role::Admin, Role::Professor, Role::Student];
const UPDATE_ROLES: &[Role] = &[Role::Admin, Role::Student];
const DELETE_ROLES: &[Role] = &[Role::Admin];

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore<Student>>,
    pub verifier: Arc<TokenVerifier>,
}

pub fn app(state: AppState) -> Router {
    let verifier = state.verifier.clone();

    Router::new()
        .route("/api/students", post(handlers::create_student))
        .route(
            "/api/students",
            get(handlers::list_students)
                .route_layer(middleware::from_fn(require_roles(verifier.clone(), LIST_ROLES))),
        )
        .route(
            "/api/students/:id",
            get(handlers::get_student)
                .route_layer(middleware::from_fn(restrict_to_own_data))
                .route_layer(middleware::from_fn(require_roles(verifier.clone(), READ_ROLES))),
        )
        .route(
            "/api/students/:id",
            put(handlers::update_student)
                .route_layer(middleware::from_fn(restrict_to_own_data))
                .route_layer(middleware::from_fn(require_roles(
                    verifier.clone(),
                    UPDATE_ROLES,
                ))),
        )
        .route(
            "/api/students/:id",
            delete(handlers::delete_student)
                .route_layer(middleware::from_fn(require_roles(verifier, DELETE_ROLES))),
        )
        .route("/health", get(handlers::health_check))
        .layer(middleware::from_fn(correlation_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
