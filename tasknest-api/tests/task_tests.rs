/// Integration tests for the task CRUD endpoints
///
/// Exercises the full lifecycle through the HTTP surface: create, fetch,
/// list, partial update, toggle, and delete, plus the validation and
/// authentication edge cases.

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::TestContext;
use serde_json::json;
use uuid::Uuid;

fn parse_ts(value: &serde_json::Value) -> DateTime<Utc> {
    serde_json::from_value(value.clone()).unwrap()
}

#[tokio::test]
async fn test_create_and_fetch_roundtrip() {
    let ctx = TestContext::new().await.unwrap();
    let user = ctx.signup_user("alice").await;

    let (status, created) = ctx
        .send(
            "POST",
            &format!("/api/{}/tasks", user.user_id),
            Some(&user.token),
            Some(json!({
                "title": "Buy groceries",
                "description": "Get milk, eggs, and bread",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], "Buy groceries");
    assert_eq!(created["description"], "Get milk, eggs, and bread");
    assert_eq!(created["completed"], false);
    assert_eq!(created["user_id"], user.user_id.to_string());

    let task_id = created["id"].as_str().unwrap();

    let (status, fetched) = ctx
        .send(
            "GET",
            &format!("/api/{}/tasks/{}", user.user_id, task_id),
            Some(&user.token),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    // Field-for-field identical, including the server-assigned fields now
    // that they exist
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_task_without_description() {
    let ctx = TestContext::new().await.unwrap();
    let user = ctx.signup_user("alice").await;

    let body = ctx.create_task(&user, "Walk the dog").await;
    assert_eq!(body["description"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_title_length_boundaries() {
    let ctx = TestContext::new().await.unwrap();
    let user = ctx.signup_user("alice").await;
    let uri = format!("/api/{}/tasks", user.user_id);

    // 1 and 200 characters are accepted
    for title in ["x", &"x".repeat(200)] {
        let (status, _) = ctx
            .send("POST", &uri, Some(&user.token), Some(json!({ "title": title })))
            .await;
        assert_eq!(status, StatusCode::CREATED, "title length {}", title.len());
    }

    // 0 and 201 characters are rejected
    for title in ["", &"x".repeat(201)] {
        let (status, body) = ctx
            .send("POST", &uri, Some(&user.token), Some(json!({ "title": title })))
            .await;
        assert_eq!(
            status,
            StatusCode::UNPROCESSABLE_ENTITY,
            "title length {}",
            title.len()
        );
        assert_eq!(body["error"], "validation_error");
    }
}

#[tokio::test]
async fn test_list_tasks() {
    let ctx = TestContext::new().await.unwrap();
    let user = ctx.signup_user("alice").await;

    let (status, body) = ctx
        .send(
            "GET",
            &format!("/api/{}/tasks", user.user_id),
            Some(&user.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);

    ctx.create_task(&user, "First").await;
    ctx.create_task(&user, "Second").await;

    let (status, body) = ctx
        .send(
            "GET",
            &format!("/api/{}/tasks", user.user_id),
            Some(&user.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_task_title() {
    let ctx = TestContext::new().await.unwrap();
    let user = ctx.signup_user("alice").await;

    let task = ctx.create_task(&user, "Buy groceries").await;
    let task_id = task["id"].as_str().unwrap();

    let (status, updated) = ctx
        .send(
            "PATCH",
            &format!("/api/{}/tasks/{}", user.user_id, task_id),
            Some(&user.token),
            Some(json!({ "title": "Buy groceries and supplies" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Buy groceries and supplies");
    // Untouched fields keep their values
    assert_eq!(updated["completed"], false);
    assert_eq!(updated["description"], task["description"]);
}

#[tokio::test]
async fn test_update_completed_is_idempotent() {
    let ctx = TestContext::new().await.unwrap();
    let user = ctx.signup_user("alice").await;

    let task = ctx.create_task(&user, "Buy groceries").await;
    let uri = format!(
        "/api/{}/tasks/{}",
        user.user_id,
        task["id"].as_str().unwrap()
    );

    for _ in 0..2 {
        let (status, body) = ctx
            .send(
                "PATCH",
                &uri,
                Some(&user.token),
                Some(json!({ "completed": true })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        // Unlike toggle, setting stays put on repeated calls
        assert_eq!(body["completed"], true);
    }
}

#[tokio::test]
async fn test_toggle_twice_restores_state_with_new_timestamp() {
    let ctx = TestContext::new().await.unwrap();
    let user = ctx.signup_user("alice").await;

    let task = ctx.create_task(&user, "Buy groceries").await;
    let uri = format!(
        "/api/{}/tasks/{}/toggle",
        user.user_id,
        task["id"].as_str().unwrap()
    );

    let (status, once) = ctx.send("POST", &uri, Some(&user.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(once["completed"], true);

    let (status, twice) = ctx.send("POST", &uri, Some(&user.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(twice["completed"], false);

    // Back to the original state, but each call moved the modification
    // timestamp forward
    let t0 = parse_ts(&task["updated_at"]);
    let t1 = parse_ts(&once["updated_at"]);
    let t2 = parse_ts(&twice["updated_at"]);
    assert!(t1 > t0);
    assert!(t2 > t1);
}

#[tokio::test]
async fn test_update_task_not_found() {
    let ctx = TestContext::new().await.unwrap();
    let user = ctx.signup_user("alice").await;

    let (status, _) = ctx
        .send(
            "PATCH",
            &format!("/api/{}/tasks/{}", user.user_id, Uuid::new_v4()),
            Some(&user.token),
            Some(json!({ "title": "Nothing here" })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_task() {
    let ctx = TestContext::new().await.unwrap();
    let user = ctx.signup_user("alice").await;

    let task = ctx.create_task(&user, "Buy groceries").await;
    let uri = format!(
        "/api/{}/tasks/{}",
        user.user_id,
        task["id"].as_str().unwrap()
    );

    let (status, _) = ctx.send("DELETE", &uri, Some(&user.token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = ctx.send("GET", &uri, Some(&user.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deleting again is also a 404
    let (status, _) = ctx.send("DELETE", &uri, Some(&user.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tasks_require_token() {
    let ctx = TestContext::new().await.unwrap();
    let user = ctx.signup_user("alice").await;
    let uri = format!("/api/{}/tasks", user.user_id);

    let (status, _) = ctx.send("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = ctx.send("GET", &uri, Some("not-a-real-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}
