//! Route-guard behavior against a live discovery endpoint.

use axum::body::Body;
use axum::http::{header::AUTHORIZATION, Request, StatusCode};
use axum::routing::get;
use axum::{middleware, Router};
use std::sync::Arc;
use tower::ServiceExt;

use auth_core::{mint_token, Role, SigningKeys, TokenVerifier};
use axum_middleware::test_support::spawn_test_authority;
use axum_middleware::{
    correlation_id_middleware, require_roles, restrict_to_own_data, AuthPrincipal,
};

fn guarded_app(verifier: Arc<TokenVerifier>, required: &'static [Role]) -> Router {
    Router::new()
        .route(
            "/resource",
            get(|AuthPrincipal(principal): AuthPrincipal| async move { principal.id })
                .route_layer(middleware::from_fn(require_roles(verifier, required))),
        )
        .layer(middleware::from_fn(correlation_id_middleware))
}

fn own_data_app(verifier: Arc<TokenVerifier>) -> Router {
    Router::new()
        .route(
            "/students/:id",
            get(|AuthPrincipal(principal): AuthPrincipal| async move { principal.id })
                .route_layer(middleware::from_fn(restrict_to_own_data))
                .route_layer(middleware::from_fn(require_roles(
                    verifier,
                    &[Role::Admin, Role::Professor, Role::Student],
                ))),
        )
        .layer(middleware::from_fn(correlation_id_middleware))
}

fn bearer_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn matching_role_is_admitted() {
    let keys = spawn_test_authority("1").await;
    let token = mint_token(&keys, "p1", &[Role::Professor]).unwrap();

    let app = guarded_app(
        Arc::new(TokenVerifier::new()),
        &[Role::Admin, Role::Professor],
    );
    let response = app.oneshot(bearer_request("/resource", &token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn disjoint_roles_are_insufficient() {
    let keys = spawn_test_authority("1").await;
    let token = mint_token(&keys, "p1", &[Role::Professor]).unwrap();

    let app = guarded_app(Arc::new(TokenVerifier::new()), &[Role::Admin]);
    let response = app.oneshot(bearer_request("/resource", &token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Access forbidden: Insufficient role");
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = guarded_app(Arc::new(TokenVerifier::new()), &[Role::Admin]);
    let response = app
        .oneshot(Request::builder().uri("/resource").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Authorization token is missing");
}

#[tokio::test]
async fn rejected_token_surfaces_error_kind() {
    let app = guarded_app(Arc::new(TokenVerifier::new()), &[Role::Admin]);
    let response = app
        .oneshot(bearer_request("/resource", "not.a.token"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid or expired token");
    assert_eq!(body["error"], "malformed_token");
}

#[tokio::test]
async fn unreachable_discovery_is_bad_gateway_with_correlation_id() {
    // Token whose jku points at a dead port: verification cannot even
    // fetch the signing key, which is an upstream failure, not a 403.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let jku = format!(
        "http://{}/.well-known/jwks.json",
        listener.local_addr().unwrap()
    );
    drop(listener);
    let keys = auth_core::test_keys::test_signing_keys("1", &jku);
    let token = mint_token(&keys, "p1", &[Role::Admin]).unwrap();

    let app = guarded_app(Arc::new(TokenVerifier::new()), &[Role::Admin]);
    let mut request = bearer_request("/resource", &token);
    request.headers_mut().insert(
        axum_middleware::CORRELATION_ID_HEADER,
        "corr-77".parse().unwrap(),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = body_json(response).await;
    assert_eq!(body["error"], "key_discovery_failed");
    assert_eq!(body["correlationId"], "corr-77");
}

#[tokio::test]
async fn student_reaches_only_its_own_record() {
    let keys = spawn_test_authority("1").await;
    let verifier = Arc::new(TokenVerifier::new());
    let token = mint_token(&keys, "s1", &[Role::Student]).unwrap();

    let allowed = own_data_app(verifier.clone())
        .oneshot(bearer_request("/students/s1", &token))
        .await
        .unwrap();
    assert_eq!(allowed.status(), StatusCode::OK);

    let denied = own_data_app(verifier)
        .oneshot(bearer_request("/students/s2", &token))
        .await
        .unwrap();
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let body = body_json(denied).await;
    assert_eq!(
        body["message"],
        "Access forbidden: You can only access your own data"
    );
}

#[tokio::test]
async fn admin_bypasses_ownership_restriction() {
    let keys = spawn_test_authority("1").await;
    let token = mint_token(&keys, "a1", &[Role::Admin]).unwrap();

    let response = own_data_app(Arc::new(TokenVerifier::new()))
        .oneshot(bearer_request("/students/s2", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn service_role_passes_role_gate_like_any_other() {
    // Self-minted service identity: the gate only checks that the token
    // verifies and that the asserted role intersects the requirement.
    let keys = spawn_test_authority("1").await;
    let token = auth_core::mint_service_token(&keys, Role::EnrollmentService).unwrap();

    let app = guarded_app(
        Arc::new(TokenVerifier::new()),
        &[Role::Admin, Role::EnrollmentService],
    );
    let response = app.oneshot(bearer_request("/resource", &token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
