//! Student CRUD routes behind the auth fabric.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use auth_core::{mint_service_token, mint_token, Role, SigningKeys, TokenVerifier};
use axum_middleware::test_support::spawn_test_authority;
use entity_store::MemoryStore;
use student_service::{app, AppState};

struct Harness {
    app: Router,
    authority: SigningKeys,
}

async fn harness() -> Harness {
    let authority = spawn_test_authority("1").await;
    let app = app(AppState {
        store: Arc::new(MemoryStore::new()),
        verifier: Arc::new(TokenVerifier::new()),
    });
    Harness { app, authority }
}

impl Harness {
    fn token(&self, id: &str, role: Role) -> String {
        mint_token(&self.authority, id, &[role]).unwrap()
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn create_student(&self, name: &str, email: &str) -> Value {
        let (status, body) = self
            .send(post_json(
                "/api/students",
                json!({ "name": name, "email": email, "password": "hunter22" }),
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["student"].clone()
    }
}

fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_with(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn registration_is_open_and_hides_the_hash() {
    let h = harness().await;
    let student = h.create_student("Ada Lovelace", "ada@campus.edu").await;

    assert_eq!(student["name"], "Ada Lovelace");
    assert_eq!(student["email"], "ada@campus.edu");
    assert!(student.get("password").is_none());
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let h = harness().await;
    h.create_student("Ada Lovelace", "ada@campus.edu").await;

    let (status, body) = h
        .send(post_json(
            "/api/students",
            json!({ "name": "Imposter", "email": "ADA@campus.edu", "password": "x1y2z3" }),
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Student with this email exists");
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let h = harness().await;
    let (status, body) = h
        .send(post_json(
            "/api/students",
            json!({ "name": "Ada Lovelace" }),
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "All fields are required");
}

#[tokio::test]
async fn listing_requires_a_privileged_or_service_role() {
    let h = harness().await;
    h.create_student("Ada Lovelace", "ada@campus.edu").await;

    let (status, _) = h.send(get_with("/api/students", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let student_token = h.token("whoever", Role::Student);
    let (status, _) = h
        .send(get_with("/api/students", Some(&student_token)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The auth service identifies itself with a self-minted service token
    // and gets the full records, hashes included, to compare passwords.
    let service_token = mint_service_token(&h.authority, Role::AuthService).unwrap();
    let (status, body) = h
        .send(get_with("/api/students", Some(&service_token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    let students = body.as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert!(students[0]["password"].as_str().unwrap().starts_with("$2"));
}

#[tokio::test]
async fn student_reads_only_its_own_record() {
    let h = harness().await;
    let ada = h.create_student("Ada Lovelace", "ada@campus.edu").await;
    let grace = h.create_student("Grace Hopper", "grace@campus.edu").await;
    let ada_id = ada["id"].as_str().unwrap();
    let grace_id = grace["id"].as_str().unwrap();

    let ada_token = h.token(ada_id, Role::Student);

    let (status, body) = h
        .send(get_with(&format!("/api/students/{ada_id}"), Some(&ada_token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ada@campus.edu");
    assert!(body.get("password").is_none());

    let (status, body) = h
        .send(get_with(
            &format!("/api/students/{grace_id}"),
            Some(&ada_token),
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "Access forbidden: You can only access your own data"
    );
}

#[tokio::test]
async fn admin_reads_any_record() {
    let h = harness().await;
    let ada = h.create_student("Ada Lovelace", "ada@campus.edu").await;
    let admin_token = h.token("admin-1", Role::Admin);

    let (status, _) = h
        .send(get_with(
            &format!("/api/students/{}", ada["id"].as_str().unwrap()),
            Some(&admin_token),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn student_updates_its_own_record() {
    let h = harness().await;
    let ada = h.create_student("Ada Lovelace", "ada@campus.edu").await;
    let ada_id = ada["id"].as_str().unwrap();
    let ada_token = h.token(ada_id, Role::Student);

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/students/{ada_id}"))
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {ada_token}"))
        .body(Body::from(
            json!({ "name": "Ada King", "email": "ada@campus.edu" }).to_string(),
        ))
        .unwrap();

    let (status, body) = h.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student updated successfully");
    assert_eq!(body["student"]["name"], "Ada King");
}

#[tokio::test]
async fn delete_is_admin_only() {
    let h = harness().await;
    let ada = h.create_student("Ada Lovelace", "ada@campus.edu").await;
    let ada_id = ada["id"].as_str().unwrap().to_string();

    let ada_token = h.token(&ada_id, Role::Student);
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/students/{ada_id}"))
        .header(header::AUTHORIZATION, format!("Bearer {ada_token}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = h.send(request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin_token = h.token("admin-1", Role::Admin);
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/students/{ada_id}"))
        .header(header::AUTHORIZATION, format!("Bearer {admin_token}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = h.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student deleted successfully");

    let (status, _) = h
        .send(get_with(
            &format!("/api/students/{ada_id}"),
            Some(&h.token("admin-1", Role::Admin)),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_id_is_a_bad_request() {
    let h = harness().await;
    let admin_token = h.token("admin-1", Role::Admin);

    let (status, body) = h
        .send(get_with("/api/students/not-a-uuid", Some(&admin_token)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid student ID format");
}
