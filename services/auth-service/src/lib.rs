//! Auth service: the platform's token-minting authority.
//!
//! Authenticates students and professors against the services that own
//! their records, mints 6-hour RS256 tokens, and publishes the matching
//! verification key at `/.well-known/jwks.json` for every peer to discover.

pub mod config;
pub mod error;
pub mod handlers;
pub mod principal_store;

use axum::routing::{get, post};
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use auth_core::SigningKeys;
use axum_middleware::correlation_id_middleware;

use crate::principal_store::PrincipalStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub keys: Arc<SigningKeys>,
    pub principals: PrincipalStore,
}

/// Build the REST router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/.well-known/jwks.json", get(handlers::get_jwks))
        .route("/api/login/student", post(handlers::login_student))
        .route("/api/login/professor", post(handlers::login_professor))
        .route("/health", get(handlers::health_check))
        .layer(middleware::from_fn(correlation_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
