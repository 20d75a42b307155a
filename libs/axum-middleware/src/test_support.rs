//! Test helpers for exercising the auth fabric in-process.
//!
//! FOR TESTING ONLY. Spins up real listeners on ephemeral ports so
//! discovery fetches and peer calls in tests travel the same HTTP path
//! they travel in production.

use axum::routing::get;
use axum::{Json, Router};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use auth_core::test_keys::{TEST_PRIVATE_KEY_PEM, TEST_PUBLIC_KEY_PEM};
use auth_core::SigningKeys;

/// Serve `app` on an ephemeral port and return its address.
pub async fn spawn_app(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Start a discovery endpoint for a fresh authority and return signing keys
/// whose `jku` points at it. Tokens minted with the result verify end to
/// end against the live endpoint.
pub async fn spawn_test_authority(kid: &str) -> SigningKeys {
    spawn_authority_with(kid, TEST_PRIVATE_KEY_PEM, TEST_PUBLIC_KEY_PEM).await
}

/// Same as [`spawn_test_authority`] but over an explicit key pair.
pub async fn spawn_authority_with(kid: &str, private_pem: &str, public_pem: &str) -> SigningKeys {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let jku = format!(
        "http://{}/.well-known/jwks.json",
        listener.local_addr().unwrap()
    );
    let keys = SigningKeys::from_pems(kid, &jku, private_pem, public_pem)
        .expect("test key pair must parse");
    let jwks = keys.jwks().expect("test key pair must publish");

    let app = Router::new().route(
        "/.well-known/jwks.json",
        get(move || {
            let jwks = jwks.clone();
            async move { Json(jwks) }
        }),
    );
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    keys
}
