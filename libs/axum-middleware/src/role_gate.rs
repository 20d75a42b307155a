//! Role-based access control middleware.
//!
//! [`require_roles`] produces a per-route guard: it extracts the bearer
//! token, verifies it through key discovery, intersects the principal's
//! roles with the route's required set and attaches the principal to the
//! request. [`restrict_to_own_data`] layers an ownership check on
//! `/{id}` routes for self-scoped principals.

use axum::async_trait;
use axum::extract::{FromRequestParts, Path, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::{Json, RequestPartsExt};
use serde_json::json;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

use auth_core::{Principal, Role, TokenError, TokenVerifier};

use crate::correlation_id::CorrelationId;

/// Authorization failures raised by the gate, each with a fixed HTTP
/// mapping. Token rejections surface the specific verification error kind
/// for diagnostics; key material never appears in a response.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("Authorization token is missing")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken(#[source] TokenError),

    #[error("Access forbidden: Insufficient role")]
    InsufficientRole,

    #[error("Access forbidden: You can only access your own data")]
    OwnDataForbidden,

    /// The discovery document could not be fetched: an upstream failure,
    /// not a rejection of the caller's token.
    #[error("Unable to fetch signing keys")]
    Discovery {
        source: TokenError,
        correlation_id: String,
    },
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        match self {
            GateError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Authorization token is missing" })),
            )
                .into_response(),
            GateError::InvalidToken(err) => (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "message": "Invalid or expired token",
                    "error": err.kind(),
                })),
            )
                .into_response(),
            GateError::InsufficientRole => (
                StatusCode::FORBIDDEN,
                Json(json!({ "message": "Access forbidden: Insufficient role" })),
            )
                .into_response(),
            GateError::OwnDataForbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "message": "Access forbidden: You can only access your own data"
                })),
            )
                .into_response(),
            GateError::Discovery {
                source,
                correlation_id,
            } => (
                StatusCode::BAD_GATEWAY,
                Json(json!({
                    "message": "Unable to fetch signing keys",
                    "error": source.kind(),
                    "correlationId": correlation_id,
                })),
            )
                .into_response(),
        }
    }
}

/// Build a route guard admitting principals that hold at least one of
/// `required`. Use with `axum::middleware::from_fn`.
pub fn require_roles(
    verifier: Arc<TokenVerifier>,
    required: &'static [Role],
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Response> + Send>> + Clone {
    move |req: Request, next: Next| {
        Box::pin(gate(verifier.clone(), required, req, next))
            as Pin<Box<dyn Future<Output = Response> + Send>>
    }
}

async fn gate(
    verifier: Arc<TokenVerifier>,
    required: &'static [Role],
    mut req: Request,
    next: Next,
) -> Response {
    let correlation_id = req
        .extensions()
        .get::<CorrelationId>()
        .cloned()
        .unwrap_or_else(CorrelationId::generate);

    let token = match bearer_token(req.headers()) {
        Some(token) => token,
        None => return GateError::MissingToken.into_response(),
    };

    let principal = match verifier.verify(&token, correlation_id.as_str()).await {
        Ok(principal) => principal,
        Err(err @ TokenError::KeyDiscoveryFailed { .. }) => {
            tracing::error!(
                correlation_id = correlation_id.as_str(),
                error = %err,
                "key discovery failed while verifying bearer token"
            );
            return GateError::Discovery {
                source: err,
                correlation_id: correlation_id.0,
            }
            .into_response();
        }
        Err(err) => {
            tracing::warn!(
                correlation_id = correlation_id.as_str(),
                error = %err,
                "rejected bearer token"
            );
            return GateError::InvalidToken(err).into_response();
        }
    };

    if !principal.has_any(required) {
        return GateError::InsufficientRole.into_response();
    }

    req.extensions_mut().insert(principal);
    next.run(req).await
}

/// Ownership guard for `/{id}` routes, layered inside [`require_roles`].
///
/// A principal holding only the self-scoped `student` role may only access
/// the record whose path id equals its own principal id; privileged roles
/// pass through untouched.
pub async fn restrict_to_own_data(req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let principal = parts.extensions.get::<Principal>().cloned();
    let path_id = parts
        .extract::<Path<HashMap<String, String>>>()
        .await
        .ok()
        .and_then(|Path(params)| params.get("id").cloned());

    let req = Request::from_parts(parts, body);

    if let (Some(principal), Some(id)) = (principal, path_id) {
        if principal.is_self_scoped() && principal.id != id {
            return GateError::OwnDataForbidden.into_response();
        }
    }

    next.run(req).await
}

/// Verified principal of the current request, inserted by [`require_roles`].
#[derive(Debug, Clone)]
pub struct AuthPrincipal(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for AuthPrincipal
where
    S: Send + Sync,
{
    type Rejection = GateError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthPrincipal)
            .ok_or(GateError::MissingToken)
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}
