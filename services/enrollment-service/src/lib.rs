//! Enrollment service: links students to courses.
//!
//! The service validates both sides of an enrollment against the owning
//! services, calling them with a self-minted `enrollment_service` token
//! over the same verify path every other caller uses. It also publishes
//! its own verification key so peers can validate those tokens.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod peers;

use axum::routing::{delete, get, post};
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use auth_core::{Role, SigningKeys, TokenVerifier};
use axum_middleware::{correlation_id_middleware, require_roles, restrict_to_own_data};
use entity_store::MemoryStore;

use crate::models::Enrollment;
use crate::peers::PeerClient;

const WRITE_ROLES: &[Role] = &[Role::Admin, Role::Professor];
const STUDENT_READ_ROLES: &[Role] = &[Role::Admin, Role::Professor, Role::Student];

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore<Enrollment>>,
    pub verifier: Arc<TokenVerifier>,
    pub keys: Arc<SigningKeys>,
    pub peers: PeerClient,
}

pub fn app(state: AppState) -> Router {
    let verifier = state.verifier.clone();

    Router::new()
        .route(
            "/api/enrollments",
            post(handlers::create_enrollment)
                .route_layer(middleware::from_fn(require_roles(verifier.clone(), WRITE_ROLES))),
        )
        .route(
            "/api/enrollments",
            get(handlers::list_enrollments)
                .route_layer(middleware::from_fn(require_roles(verifier.clone(), WRITE_ROLES))),
        )
        .route(
            "/api/enrollments/student/:id",
            get(handlers::enrollments_by_student)
                .route_layer(middleware::from_fn(restrict_to_own_data))
                .route_layer(middleware::from_fn(require_roles(
                    verifier.clone(),
                    STUDENT_READ_ROLES,
                ))),
        )
        .route(
            "/api/enrollments/:id",
            get(handlers::get_enrollment)
                .route_layer(middleware::from_fn(require_roles(verifier.clone(), WRITE_ROLES))),
        )
        .route(
            "/api/enrollments/:id",
            delete(handlers::delete_enrollment)
                .route_layer(middleware::from_fn(require_roles(verifier, WRITE_ROLES))),
        )
        .route("/.well-known/jwks.json", get(handlers::get_jwks))
        .route("/health", get(handlers::health_check))
        .layer(middleware::from_fn(correlation_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
