//! Shared authentication fabric for campus registry services.
//!
//! Every service in the platform uses this crate for token operations:
//! the auth service mints identity tokens with [`token::mint_token`], resource
//! services verify bearer tokens with [`token::TokenVerifier`] by discovering
//! the issuer's public key over HTTP, and services that call their peers mint
//! their own service tokens with [`token::mint_service_token`].
//!
//! ## Security Design
//!
//! - **RS256 ONLY**: no symmetric algorithms, to prevent confusion attacks
//! - **No shared session store**: authorization trusts validated token claims
//! - **Fail-fast keys**: key material is loaded once at startup, immutable
//!   thereafter

pub mod correlation;
pub mod error;
pub mod jwks;
pub mod keys;
pub mod principal;
pub mod test_keys;
pub mod token;

pub use error::TokenError;
pub use jwks::{Jwk, Jwks};
pub use keys::SigningKeys;
pub use principal::{Principal, Role};
pub use token::{mint_service_token, mint_token, Claims, TokenVerifier, TOKEN_TTL_HOURS};
