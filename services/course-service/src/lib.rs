//! Course service: CRUD over the course catalog.
//!
//! Courses are written by professors and admins; the enrollment service
//! reads the catalog with its service identity when validating enrollments.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use axum::routing::{delete, get, post, put};
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use auth_core::{Role, TokenVerifier};
use axum_middleware::{correlation_id_middleware, require_roles};
use entity_store::MemoryStore;

use crate::models::Course;

const WRITE_ROLES: &[Role] = &[Role::Admin, Role::Professor];
const READ_ROLES: &[Role] = &[Role::Admin, Role::Professor, Role::EnrollmentService];

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore<Course>>,
    pub verifier: Arc<TokenVerifier>,
}

pub fn app(state: AppState) -> Router {
    let verifier = state.verifier.clone();

    Router::new()
        .route(
            "/api/courses",
            post(handlers::create_course)
                .route_layer(middleware::from_fn(require_roles(verifier.clone(), WRITE_ROLES))),
        )
        .route(
            "/api/courses",
            get(handlers::list_courses)
                .route_layer(middleware::from_fn(require_roles(verifier.clone(), READ_ROLES))),
        )
        .route(
            "/api/courses/:id",
            get(handlers::get_course)
                .route_layer(middleware::from_fn(require_roles(verifier.clone(), READ_ROLES))),
        )
        .route(
            "/api/courses/:id",
            put(handlers::update_course)
                .route_layer(middleware::from_fn(require_roles(verifier.clone(), WRITE_ROLES))),
        )
        .route(
            "/api/courses/:id",
            delete(handlers::delete_course)
                .route_layer(middleware::from_fn(require_roles(verifier, WRITE_ROLES))),
        )
        .route("/health", get(handlers::health_check))
        .layer(middleware::from_fn(correlation_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
