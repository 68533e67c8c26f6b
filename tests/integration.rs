//! Integration tests: health, register/login scenario, bearer-token route.
//!
//! Each test runs the router against its own in-memory SQLite database.

use std::sync::Arc;

use accounts::auth::JwtSecret;
use accounts::services::{AuthService, SqlCredentialStore};
use accounts::{create_app, db, AppState};
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::util::ServiceExt;

const SECRET: &str = "test-jwt-secret-min-32-chars!!!!";

async fn test_app() -> axum::Router {
    let db_pool = db::create_in_memory_pool().await.unwrap();
    let store = Arc::new(SqlCredentialStore::new(db_pool.clone()));
    let auth_service = AuthService::new(store, JwtSecret::new(SECRET.to_string()));
    create_app(AppState {
        db: db_pool,
        auth_service,
    })
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(res: Response<Body>) -> Value {
    let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn alice() -> Value {
    json!({
        "name": "Alice",
        "email": "a@x.com",
        "password": "pw123",
        "phone": "555",
        "phone_code": "+1"
    })
}

#[tokio::test]
async fn health_returns_ok() {
    let app = test_app().await;
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = json_body(res).await;
    assert_eq!(json.get("status").and_then(|v| v.as_str()), Some("ok"));
}

#[tokio::test]
async fn register_and_login_scenario() {
    let app = test_app().await;

    let res = app.clone().oneshot(post_json("/register", alice())).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED, "register should succeed");
    let json = json_body(res).await;
    assert_eq!(json["message"], "User registered successfully");
    assert_eq!(json["userId"], 1);

    let login = json!({ "email": "a@x.com", "password": "pw123" });
    let res = app.clone().oneshot(post_json("/login", login)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK, "login should succeed");
    let json = json_body(res).await;
    assert_eq!(json["message"], "Login successful");
    assert_eq!(json["user"], json!({ "id": 1, "name": "Alice", "email": "a@x.com" }));
    assert!(json["user"].get("password_hash").is_none());
    let token = json["token"].as_str().expect("response should contain token");
    let claims = JwtSecret::new(SECRET.to_string()).validate(token).unwrap();
    assert_eq!(claims.id, 1);
    assert_eq!(claims.email, "a@x.com");

    let wrong = json!({ "email": "a@x.com", "password": "wrong" });
    let res = app.clone().oneshot(post_json("/login", wrong)).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let bob = json!({
        "name": "Bob",
        "email": "a@x.com",
        "password": "pw456",
        "phone": "555",
        "phone_code": "+2"
    });
    let res = app.oneshot(post_json("/register", bob)).await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(res).await;
    assert_eq!(json["message"], "Error registering user");
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn register_with_missing_field_is_bad_request() {
    let app = test_app().await;
    let mut body = alice();
    body.as_object_mut().unwrap().remove("phone_code");
    let res = app.clone().oneshot(post_json("/register", body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await, json!({ "message": "All fields are required" }));

    // Nothing was stored, so the full registration still gets the first id.
    let res = app.oneshot(post_json("/register", alice())).await.unwrap();
    assert_eq!(json_body(res).await["userId"], 1);
}

#[tokio::test]
async fn register_with_unreadable_body_is_bad_request() {
    let app = test_app().await;
    let req = Request::builder()
        .method("POST")
        .uri("/register")
        .body(Body::from("not json"))
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_with_non_string_field_is_bad_request() {
    let app = test_app().await;
    let mut body = alice();
    body["phone"] = json!(555);
    let res = app.oneshot(post_json("/register", body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await, json!({ "message": "All fields are required" }));
}

#[tokio::test]
async fn login_with_missing_password_is_bad_request() {
    let app = test_app().await;
    let res = app
        .oneshot(post_json("/login", json!({ "email": "a@x.com" })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(res).await,
        json!({ "message": "Email and password are required" })
    );
}

#[tokio::test]
async fn unknown_email_and_wrong_password_match() {
    let app = test_app().await;
    app.clone().oneshot(post_json("/register", alice())).await.unwrap();

    let unknown = app
        .clone()
        .oneshot(post_json("/login", json!({ "email": "b@x.com", "password": "pw123" })))
        .await
        .unwrap();
    let wrong = app
        .oneshot(post_json("/login", json!({ "email": "a@x.com", "password": "nope" })))
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(unknown).await, json_body(wrong).await);
}

#[tokio::test]
async fn me_requires_valid_bearer_token() {
    let app = test_app().await;
    app.clone().oneshot(post_json("/register", alice())).await.unwrap();
    let res = app
        .clone()
        .oneshot(post_json("/login", json!({ "email": "a@x.com", "password": "pw123" })))
        .await
        .unwrap();
    let token = json_body(res).await["token"].as_str().unwrap().to_string();

    let req = Request::builder()
        .uri("/me")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = json_body(res).await;
    assert_eq!(json["id"], 1);
    assert_eq!(json["email"], "a@x.com");

    let req = Request::builder().uri("/me").body(Body::empty()).unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let expired = JwtSecret::new(SECRET.to_string())
        .issue_at(1, "a@x.com", Utc::now() - Duration::hours(25))
        .unwrap();
    let req = Request::builder()
        .uri("/me")
        .header("authorization", format!("Bearer {}", expired))
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(res).await, json!({ "message": "token expired" }));
}
