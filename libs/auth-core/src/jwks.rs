//! JWKS discovery document, published and consumed.
//!
//! The document format is a deliberate simplification of RFC 7517: the `n`
//! field carries the public key's PEM body (armor and newlines stripped)
//! rather than the base64url-encoded modulus bytes. [`publish`] and
//! [`decoding_key`] are exact inverses of each other, so a key that went
//! through the discovery document accepts exactly the tokens the original
//! PEM accepts.

use jsonwebtoken::DecodingKey;
use serde::{Deserialize, Serialize};

use crate::TokenError;

const PEM_HEADER: &str = "-----BEGIN PUBLIC KEY-----";
const PEM_FOOTER: &str = "-----END PUBLIC KEY-----";

/// RSA public exponent; always AQAB for the keys this platform generates.
pub const RSA_PUBLIC_EXPONENT: &str = "AQAB";

/// A single published verification key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    pub kid: String,
    #[serde(rename = "use")]
    pub use_: String,
    pub alg: String,
    /// PEM body of the public key, not the standard base64url modulus.
    pub n: String,
    pub e: String,
}

/// The discovery document served at `/.well-known/jwks.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

impl Jwks {
    /// Select the entry matching a token's `kid`, if any.
    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|key| key.kid == kid)
    }
}

/// Derive the discovery document for a public key.
///
/// Pure and deterministic; safe to call concurrently and on every request.
/// Fails with [`TokenError::MalformedKeyMaterial`] when the PEM armor
/// delimiters are missing.
pub fn publish(kid: &str, public_pem: &str) -> Result<Jwks, TokenError> {
    let body = pem_body(public_pem)?;
    Ok(Jwks {
        keys: vec![Jwk {
            kty: "RSA".to_string(),
            kid: kid.to_string(),
            use_: "sig".to_string(),
            alg: "RS256".to_string(),
            n: body,
            e: RSA_PUBLIC_EXPONENT.to_string(),
        }],
    })
}

/// Rebuild an RS256 verification key from a published JWK.
pub fn decoding_key(jwk: &Jwk) -> Result<DecodingKey, TokenError> {
    let pem = format!("{PEM_HEADER}\n{}\n{PEM_FOOTER}", jwk.n);
    DecodingKey::from_rsa_pem(pem.as_bytes()).map_err(|_| TokenError::MalformedKeyMaterial)
}

/// Extract the base64 body between the PEM armor lines, newlines stripped.
fn pem_body(public_pem: &str) -> Result<String, TokenError> {
    let start = public_pem
        .find(PEM_HEADER)
        .ok_or(TokenError::MalformedKeyMaterial)?
        + PEM_HEADER.len();
    let end = public_pem
        .find(PEM_FOOTER)
        .ok_or(TokenError::MalformedKeyMaterial)?;
    if end < start {
        return Err(TokenError::MalformedKeyMaterial);
    }
    let body: String = public_pem[start..end]
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if body.is_empty() {
        return Err(TokenError::MalformedKeyMaterial);
    }
    Ok(body)
}
