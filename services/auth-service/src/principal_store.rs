//! Principal lookups against the services that own the records.
//!
//! The auth service keeps no user database of its own: it fetches student
//! and professor lists from their services on every login attempt,
//! identifying itself with a self-minted `auth_service` token and
//! propagating the caller's correlation id. Single attempt, no retry.

use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use auth_core::correlation::HTTP_CORRELATION_ID_HEADER;
use auth_core::{mint_service_token, Role, SigningKeys};
use axum_middleware::CorrelationId;

use crate::error::AuthError;

const PEER_TIMEOUT_SECS: u64 = 10;

/// Stored credentials as the owning service serializes them. Extra fields
/// (name, phone) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredPrincipal {
    pub id: Uuid,
    pub email: String,
    /// bcrypt hash, compared constant-time by the login handlers.
    pub password: String,
}

#[derive(Clone)]
pub struct PrincipalStore {
    http: reqwest::Client,
    keys: Arc<SigningKeys>,
    student_url: String,
    professor_url: String,
}

impl PrincipalStore {
    pub fn new(keys: Arc<SigningKeys>, student_url: String, professor_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            keys,
            student_url,
            professor_url,
        }
    }

    pub async fn find_student_by_email(
        &self,
        email: &str,
        correlation_id: &CorrelationId,
    ) -> Result<Option<StoredPrincipal>, AuthError> {
        let students = self.fetch(&self.student_url, correlation_id).await?;
        Ok(students.into_iter().find(|s| s.email == email))
    }

    pub async fn find_professor_by_email(
        &self,
        email: &str,
        correlation_id: &CorrelationId,
    ) -> Result<Option<StoredPrincipal>, AuthError> {
        let professors = self.fetch(&self.professor_url, correlation_id).await?;
        Ok(professors.into_iter().find(|p| p.email == email))
    }

    async fn fetch(
        &self,
        url: &str,
        correlation_id: &CorrelationId,
    ) -> Result<Vec<StoredPrincipal>, AuthError> {
        let token = mint_service_token(&self.keys, Role::AuthService)?;

        let upstream = |err: reqwest::Error| {
            tracing::error!(
                correlation_id = correlation_id.as_str(),
                url,
                error = %err,
                "principal lookup failed"
            );
            AuthError::Upstream {
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

        response.json::<Vec<StoredPrincipal>>().await.map_err(upstream)
    }
}
