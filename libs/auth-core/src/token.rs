//! Token minting and discovery-based verification.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration as StdDuration;

use crate::correlation::HTTP_CORRELATION_ID_HEADER;
use crate::jwks::{self, Jwks};
use crate::{Principal, Role, SigningKeys, TokenError};

/// Fixed validity of every minted token.
pub const TOKEN_TTL_HOURS: i64 = 6;

/// Upper bound on a single discovery fetch; keeps a request from hanging
/// behind an unresponsive peer.
pub const DISCOVERY_TIMEOUT_SECS: u64 = 10;

/// Claims carried by every token in the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Principal id: a user's record id, or a role literal for service
    /// tokens.
    pub id: String,
    pub roles: Vec<Role>,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

/// Mint an RS256 token asserting `principal_id` and `roles`, valid for
/// [`TOKEN_TTL_HOURS`]. The header carries the authority's `kid` and `jku`
/// so any peer can locate the verification key.
pub fn mint_token(
    keys: &SigningKeys,
    principal_id: &str,
    roles: &[Role],
) -> Result<String, TokenError> {
    let now = Utc::now();
    let claims = Claims {
        id: principal_id.to_string(),
        roles: roles.to_vec(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(keys.kid().to_string());
    header.jku = Some(keys.jku().to_string());

    encode(&header, &claims, keys.encoding_key()).map_err(|e| TokenError::Signing(e.to_string()))
}

/// Mint a token a service uses to identify itself to a peer.
///
/// The service signs with its *own* private key and asserts the role
/// literal as both principal id and role. Verifiers only prove that some
/// discovery endpoint vouches for the signing key, not that a central
/// authority approved the role, so any key holder can self-assert any role.
/// Kept as documented platform behavior; a hardened design would route all
/// minting through the auth service and hand peers short-lived delegated
/// credentials.
pub fn mint_service_token(keys: &SigningKeys, role: Role) -> Result<String, TokenError> {
    mint_token(keys, role.as_str(), &[role])
}

/// Verifies bearer tokens by discovering the signing key over HTTP.
///
/// Stateless apart from the reused HTTP client: every verification
/// re-fetches the discovery document named by the token's `jku`, so a key
/// never has to be distributed out of band.
#[derive(Debug, Clone, Default)]
pub struct TokenVerifier {
    http: reqwest::Client,
}

impl TokenVerifier {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Validate `token` and return the principal it asserts.
    ///
    /// The correlation id of the request being served is propagated on the
    /// discovery fetch so the hop shows up in cross-service traces.
    pub async fn verify(
        &self,
        token: &str,
        correlation_id: &str,
    ) -> Result<Principal, TokenError> {
        // Header first, without trusting the signature.
        let header = decode_header(token).map_err(|_| TokenError::MalformedToken)?;
        let kid = header.kid.ok_or(TokenError::MalformedToken)?;
        let jku = header.jku.ok_or(TokenError::MalformedToken)?;

        if header.alg != Algorithm::RS256 {
            return Err(TokenError::UnsupportedAlgorithm(format!("{:?}", header.alg)));
        }

        let jwks = self.fetch_jwks(&jku, correlation_id).await?;
        let jwk = jwks.find(&kid).ok_or(TokenError::UnknownKey)?;
        let decoding_key = jwks::decoding_key(jwk)?;

        let validation = Validation::new(Algorithm::RS256);
        let data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    TokenError::UnsupportedAlgorithm("non-RS256".to_string())
                }
                _ => TokenError::MalformedToken,
            }
        })?;

        Ok(Principal {
            id: data.claims.id,
            roles: data.claims.roles,
        })
    }

    /// Single-attempt discovery fetch; network errors and non-2xx responses
    /// both surface as [`TokenError::KeyDiscoveryFailed`].
    async fn fetch_jwks(&self, jku: &str, correlation_id: &str) -> Result<Jwks, TokenError> {
        let discovery_failed = |reason: String| TokenError::KeyDiscoveryFailed {
            jku: jku.to_string(),
            reason,
        };

        tracing::debug!(jku, correlation_id, "fetching discovery document");

        let response = self
            .http
            .get(jku)
            .header(HTTP_CORRELATION_ID_HEADER, correlation_id)
            .timeout(StdDuration::from_secs(DISCOVERY_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| discovery_failed(e.to_string()))?
            .error_for_status()
            .map_err(|e| discovery_failed(e.to_string()))?;

        response
            .json::<Jwks>()
            .await
            .map_err(|e| discovery_failed(e.to_string()))
    }
}
