/// Integration tests for the authentication endpoints
///
/// Covers signup, signin, and the fail-closed behavior of both: duplicate
/// emails, invalid payloads, and the indistinguishable unknown-email /
/// wrong-password responses.

mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_signup_success() {
    let ctx = TestContext::new().await.unwrap();

    let email = format!("alice-{}@example.com", Uuid::new_v4());
    let (status, body) = ctx
        .send(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({
                "email": email,
                "name": "Alice Smith",
                "password": "securepassword123",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], email);
    assert_eq!(body["name"], "Alice Smith");
    assert!(body["user_id"].as_str().unwrap().parse::<Uuid>().is_ok());
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let ctx = TestContext::new().await.unwrap();
    let user = ctx.signup_user("alice").await;

    let (status, body) = ctx
        .send(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({
                "email": user.email,
                "name": "Alice Again",
                "password": "anotherpassword123",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already registered");
}

#[tokio::test]
async fn test_signup_invalid_email() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .send(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({
                "email": "not-an-email",
                "name": "Alice",
                "password": "securepassword123",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_signup_short_password() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .send(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({
                "email": format!("alice-{}@example.com", Uuid::new_v4()),
                "name": "Alice",
                "password": "short",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let details = body["details"].as_array().unwrap();
    assert!(details.iter().any(|d| d["field"] == "password"));
}

#[tokio::test]
async fn test_signin_success() {
    let ctx = TestContext::new().await.unwrap();
    let user = ctx.signup_user("alice").await;

    let (status, body) = ctx
        .send(
            "POST",
            "/api/auth/signin",
            None,
            Some(json!({
                "email": user.email,
                "password": user.password,
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], user.user_id.to_string());
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_signin_wrong_password() {
    let ctx = TestContext::new().await.unwrap();
    let user = ctx.signup_user("alice").await;

    let (status, body) = ctx
        .send(
            "POST",
            "/api/auth/signin",
            None,
            Some(json!({
                "email": user.email,
                "password": "wrongpassword123",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_signin_nonexistent_user_same_message() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .send(
            "POST",
            "/api/auth/signin",
            None,
            Some(json!({
                "email": format!("nobody-{}@example.com", Uuid::new_v4()),
                "password": "securepassword123",
            })),
        )
        .await;

    // Same status and message as a wrong password, so accounts cannot be
    // enumerated through the signin endpoint.
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_token_subject_matches_user() {
    let ctx = TestContext::new().await.unwrap();
    let user = ctx.signup_user("alice").await;

    let claims = tasknest_shared::auth::jwt::validate_token(
        &user.token,
        "integration-test-secret-key-at-least-32-bytes",
    )
    .unwrap();

    assert_eq!(claims.sub, user.user_id);
    assert_eq!(claims.email, user.email);
}
