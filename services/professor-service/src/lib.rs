//! Professor service: CRUD over professor records.
//!
//! Registration is open; reads and writes are guarded by the role gate.
//! The auth service fetches the full list (hashes included) with its
//! service identity to check login credentials.

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

use crate::models::Professor;

const LIST_ROLES: &[Role] = &[Role::Admin, Role::AuthService];
const READ_ROLES: &[Role] = &[Role::Admin, Role::Professor];
const WRITE_ROLES: &[Role] = &[Role::Admin, Role::Professor];
const DELETE_ROLES: &[Role] = &[Role::Admin];

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore<Professor>>,
    pub verifier: Arc<TokenVerifier>,
}

pub fn app(state: AppState) -> Router {
    let verifier = state.verifier.clone();

    Router::new()
        .route("/api/professors", post(handlers::create_professor))
        .route(
            "/api/professors",
            get(handlers::list_professors)
                .route_layer(middleware::from_fn(require_roles(verifier.clone(), LIST_ROLES))),
        )
        .route(
            "/api/professors/:id",
            get(handlers::get_professor)
                .route_layer(middleware::from_fn(require_roles(verifier.clone(), READ_ROLES))),
        )
        .route(
            "/api/professors/:id",
            put(handlers::update_professor)
                .route_layer(middleware::from_fn(require_roles(verifier.clone(), WRITE_ROLES))),
        )
        .route(
            "/api/professors/:id",
            delete(handlers::delete_professor)
                .route_layer(middleware::from_fn(require_roles(verifier, DELETE_ROLES))),
        )
        .route("/health", get(handlers::health_check))
        .layer(middleware::from_fn(correlation_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
