//! Token error taxonomy shared by minting and verification.

use thiserror::Error;

/// Failures raised while publishing keys, minting tokens or verifying them.
///
/// Verification failures are terminal for the request that triggered them;
/// nothing in this crate retries.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Public key material does not carry the expected PEM armor delimiters.
    #[error("public key material is not PEM-armored")]
    MalformedKeyMaterial,

    /// The token or its header cannot be decoded, or `kid`/`jku` are absent.
    #[error("JWT header is missing 'kid' or 'jku', or the token is malformed")]
    MalformedToken,

    /// The token was signed with anything other than RS256.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The discovery document has no entry for the token's `kid`.
    #[error("unable to find a signing key that matches the 'kid'")]
    UnknownKey,

    /// The discovery document at `jku` could not be fetched.
    #[error("key discovery at {jku} failed: {reason}")]
    KeyDiscoveryFailed { jku: String, reason: String },

    /// Signature check against the discovered key failed.
    #[error("token signature is invalid")]
    InvalidSignature,

    /// Signature was valid but the token's `exp` has elapsed.
    #[error("token has expired")]
    TokenExpired,

    /// RS256 signing failed; only reachable with broken key material.
    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl TokenError {
    /// Stable machine-readable kind, surfaced in rejection response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::MalformedKeyMaterial => "malformed_key_material",
            TokenError::MalformedToken => "malformed_token",
            TokenError::UnsupportedAlgorithm(_) => "unsupported_algorithm",
            TokenError::UnknownKey => "unknown_key",
            TokenError::KeyDiscoveryFailed { .. } => "key_discovery_failed",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::TokenExpired => "token_expired",
            TokenError::Signing(_) => "signing_failed",
        }
    }
}
