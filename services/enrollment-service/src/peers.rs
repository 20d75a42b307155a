//! Peer lookups against the student and course services.
//!
//! Every call self-identifies with a freshly minted `enrollment_service`
//! token signed by this service's own key pair; the peer verifies it by
//! fetching this service's discovery document, the same path any client
//! token takes. The caller's correlation id rides along on each request.

use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use auth_core::correlation::HTTP_CORRELATION_ID_HEADER;
use auth_core::{mint_service_token, Role, SigningKeys};
use axum_middleware::CorrelationId;

use crate::error::ServiceError;

const PEER_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct PeerClient {
    http: reqwest::Client,
    keys: Arc<SigningKeys>,
    student_url: String,
    course_url: String,
}

impl PeerClient {
    pub fn new(keys: Arc<SigningKeys>, student_url: String, course_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            keys,
            student_url,
            course_url,
        }
    }

    pub async fn fetch_students(
        &self,
        correlation_id: &CorrelationId,
    ) -> Result<Vec<Value>, ServiceError> {
        self.fetch(&self.student_url, correlation_id).await
    }

    pub async fn fetch_courses(
        &self,
        correlation_id: &CorrelationId,
    ) -> Result<Vec<Value>, ServiceError> {
        self.fetch(&self.course_url, correlation_id).await
    }

    async fn fetch(
        &self,
        url: &str,
        correlation_id: &CorrelationId,
    ) -> Result<Vec<Value>, ServiceError> {
        let token = mint_service_token(&self.keys, Role::EnrollmentService)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        let upstream = |err: reqwest::Error| {
            tracing::error!(
                correlation_id = correlation_id.as_str(),
                url,
                error = %err,
                "peer lookup failed"
            );
            ServiceError::Upstream {
                correlation_id: correlation_id.as_str().to_string(),
            }
        };

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(HTTP_CORRELATION_ID_HEADER, correlation_id.as_str())
            .timeout(Duration::from_secs(PEER_TIMEOUT_SECS))
            .send()
            .await
            .map_err(upstream)?
            .error_for_status()
            .map_err(upstream)?;

        response.json::<Vec<Value>>().await.map_err(upstream)
    }
}

/// Find a record in a peer payload by its `id` field.
pub fn find_by_id(records: &[Value], id: Uuid) -> Option<Value> {
    let id = id.to_string();
    records
        .iter()
        .find(|record| record.get("id").and_then(Value::as_str) == Some(id.as_str()))
        .cloned()
}
