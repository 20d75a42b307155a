//! Request correlation id middleware.
//!
//! Extracts or generates a unique correlation id for request tracing across
//! services:
//! - if the request carries `x-correlation-id`, that value is used
//! - otherwise a UUID v4 is generated
//! - the id is stored in request extensions for handler access and always
//!   echoed on the response
//!
//! The id is per-request context, never global state: handlers extract
//! [`CorrelationId`] and pass it explicitly to every outbound call so
//! concurrent requests stay isolated.

use axum::async_trait;
use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use std::convert::Infallible;

use auth_core::correlation::new_correlation_id;

/// HTTP header carrying the correlation id, re-exported for callers that
/// attach it to outbound requests.
pub use auth_core::correlation::HTTP_CORRELATION_ID_HEADER as CORRELATION_ID_HEADER;

/// Correlation id of the request currently being served.
#[derive(Debug, Clone)]
pub struct CorrelationId(pub String);

impl CorrelationId {
    pub fn generate() -> Self {
        Self(new_correlation_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Router-level middleware managing the correlation id lifecycle.
pub async fn correlation_id_middleware(mut req: Request, next: Next) -> Response {
    let correlation_id = req
        .headers()
        .get(CORRELATION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(new_correlation_id);

    req.extensions_mut()
        .insert(CorrelationId(correlation_id.clone()));

    let mut response = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }
    response
}

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Falls back to a fresh id when the middleware is not installed,
        // so outbound calls always have something to propagate.
        Ok(parts
            .extensions
            .get::<CorrelationId>()
            .cloned()
            .unwrap_or_else(CorrelationId::generate))
    }
}
