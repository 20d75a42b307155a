//! Process-wide signing key material.
//!
//! Keys are loaded once at startup from PEM files and are immutable for the
//! life of the process. Services share them behind an `Arc`. Startup must
//! fail fast when the files are missing or unparseable; nothing in this
//! module materializes keys lazily.

use anyhow::{anyhow, Context, Result};
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::path::Path;

use crate::jwks::{self, Jwks};
use crate::TokenError;

/// A service's static RSA key pair plus the metadata embedded in every token
/// header it signs: the key id and the discovery URL (`jku`) where peers can
/// fetch the matching public key.
pub struct SigningKeys {
    kid: String,
    jku: String,
    encoding: EncodingKey,
    public_pem: String,
}

impl SigningKeys {
    /// Load a key pair from PEM files.
    ///
    /// Both halves are parsed eagerly so a broken deployment fails at boot,
    /// not on the first login.
    pub fn from_pem_files(
        kid: &str,
        jku: &str,
        private_key_path: impl AsRef<Path>,
        public_key_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let private_pem = std::fs::read_to_string(private_key_path.as_ref()).with_context(|| {
            format!(
                "failed to read private key file {}",
                private_key_path.as_ref().display()
            )
        })?;
        let public_pem = std::fs::read_to_string(public_key_path.as_ref()).with_context(|| {
            format!(
                "failed to read public key file {}",
                public_key_path.as_ref().display()
            )
        })?;
        Self::from_pems(kid, jku, &private_pem, &public_pem)
    }

    /// Build a key pair from in-memory PEM strings.
    pub fn from_pems(kid: &str, jku: &str, private_pem: &str, public_pem: &str) -> Result<Self> {
        let encoding = EncodingKey::from_rsa_pem(private_pem.as_bytes())
            .map_err(|e| anyhow!("failed to parse RSA private key: {e}"))?;

        // Parsed only to prove the public half is usable; verifiers rebuild
        // their own key from the published JWK.
        DecodingKey::from_rsa_pem(public_pem.as_bytes())
            .map_err(|e| anyhow!("failed to parse RSA public key: {e}"))?;

        Ok(Self {
            kid: kid.to_string(),
            jku: jku.to_string(),
            encoding,
            public_pem: public_pem.to_string(),
        })
    }

    pub fn kid(&self) -> &str {
        &self.kid
    }

    /// Discovery URL stamped into the `jku` header of every minted token.
    pub fn jku(&self) -> &str {
        &self.jku
    }

    pub fn public_pem(&self) -> &str {
        &self.public_pem
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding
    }

    /// Discovery document for this key pair, computed on demand.
    pub fn jwks(&self) -> Result<Jwks, TokenError> {
        jwks::publish(&self.kid, &self.public_pem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_keys::{TEST_PRIVATE_KEY_PEM, TEST_PUBLIC_KEY_PEM};

    #[test]
    fn valid_pems_load() {
        let keys = SigningKeys::from_pems(
            "1",
            "http://localhost:5001/.well-known/jwks.json",
            TEST_PRIVATE_KEY_PEM,
            TEST_PUBLIC_KEY_PEM,
        )
        .unwrap();
        assert_eq!(keys.kid(), "1");
        assert!(keys.jku().ends_with("/.well-known/jwks.json"));
    }

    #[test]
    fn garbage_private_key_is_rejected() {
        let result = SigningKeys::from_pems("1", "http://x", "not a key", TEST_PUBLIC_KEY_PEM);
        assert!(result.is_err());
    }

    #[test]
    fn garbage_public_key_is_rejected() {
        let result = SigningKeys::from_pems("1", "http://x", TEST_PRIVATE_KEY_PEM, "not a key");
        assert!(result.is_err());
    }

    #[test]
    fn missing_key_file_is_rejected() {
        let result = SigningKeys::from_pem_files(
            "1",
            "http://x",
            "/nonexistent/private.pem",
            "/nonexistent/public.pem",
        );
        assert!(result.is_err());
    }
}
