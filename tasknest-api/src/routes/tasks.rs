/// Per-user task CRUD endpoints
///
/// All endpoints live under `/api/:user_id/tasks` and require a bearer
/// token. Two checks run on every request, in order:
///
/// 1. **Route-level**: the token's subject must equal the `:user_id` path
///    segment, otherwise 403. A caller can only ever operate under their
///    own URL prefix.
/// 2. **Query-level**: the task lookup itself carries the owner in the
///    WHERE clause. A task that exists under another owner yields the same
///    404 as a task that never existed, so task IDs cannot be probed.
///
/// # Endpoints
///
/// - `GET    /api/:user_id/tasks` - List tasks
/// - `POST   /api/:user_id/tasks` - Create task
/// - `GET    /api/:user_id/tasks/:task_id` - Fetch one task
/// - `PATCH  /api/:user_id/tasks/:task_id` - Partial update
/// - `POST   /api/:user_id/tasks/:task_id/toggle` - Flip completion
/// - `DELETE /api/:user_id/tasks/:task_id` - Delete task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasknest_shared::{
    auth::middleware::AuthContext,
    models::task::{CreateTask, Task, UpdateTask},
};
use uuid::Uuid;
use validator::Validate;

/// Task response model
///
/// The reserved future-phase columns are not part of the API surface yet.
#[derive(Debug, Clone, Serialize)]
pub struct TaskResponse {
    /// Task ID
    pub id: Uuid,

    /// Owner of the task
    pub user_id: Uuid,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Completion status
    pub completed: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last modified
    pub updated_at: DateTime<Utc>,
}

impl TaskResponse {
    /// Converts a task row to its response form
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            user_id: task.user_id,
            title: task.title.clone(),
            description: task.description.clone(),
            completed: task.completed,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

/// Update task request
///
/// All fields optional; absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New title
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New completion status
    pub completed: Option<bool>,
}

/// Verifies that the token subject matches the URL's `:user_id` segment
///
/// Returns the verified owner ID, or 403 if the caller is trying to reach
/// another user's URL space.
fn verify_owner(auth: &AuthContext, user_id: Uuid) -> Result<Uuid, ApiError> {
    if auth.user_id != user_id {
        tracing::warn!(
            token_user = %auth.user_id,
            path_user = %user_id,
            "Token subject does not match path owner"
        );
        return Err(ApiError::Forbidden(
            "Cannot access another user's tasks".to_string(),
        ));
    }
    Ok(user_id)
}

/// List all tasks for a user
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let owner = verify_owner(&auth, user_id)?;

    let tasks = Task::list_by_owner(&state.db, owner).await?;

    Ok(Json(tasks.iter().map(TaskResponse::from_task).collect()))
}

/// Create a new task
///
/// Returns 201 with the created task, including its server-assigned id and
/// timestamps.
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let owner = verify_owner(&auth, user_id)?;
    req.validate()?;

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: owner,
            title: req.title,
            description: req.description,
        },
    )
    .await?;

    tracing::debug!(task_id = %task.id, user_id = %owner, "Task created");

    Ok((StatusCode::CREATED, Json(TaskResponse::from_task(&task))))
}

/// Fetch a single task
///
/// 404 covers both a missing task and a task owned by someone else.
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((user_id, task_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<TaskResponse>> {
    let owner = verify_owner(&auth, user_id)?;

    let task = Task::find_by_id_and_owner(&state.db, task_id, owner)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(TaskResponse::from_task(&task)))
}

/// Partially update a task
///
/// Only fields present in the body are written. Setting `completed` here is
/// idempotent, unlike the toggle endpoint.
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((user_id, task_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let owner = verify_owner(&auth, user_id)?;
    req.validate()?;

    let task = Task::update(
        &state.db,
        task_id,
        owner,
        UpdateTask {
            title: req.title,
            description: req.description,
            completed: req.completed,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(TaskResponse::from_task(&task)))
}

/// Toggle a task's completion status
///
/// Each call flips the flag again and bumps the modification timestamp;
/// calling twice restores the original state with a newer timestamp.
pub async fn toggle_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((user_id, task_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<TaskResponse>> {
    let owner = verify_owner(&auth, user_id)?;

    let task = Task::toggle_completed(&state.db, task_id, owner)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    tracing::debug!(task_id = %task.id, completed = task.completed, "Task toggled");

    Ok(Json(TaskResponse::from_task(&task)))
}

/// Delete a task
///
/// Returns 204 on success, 404 if the task is missing or owned by someone
/// else.
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((user_id, task_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    let owner = verify_owner(&auth, user_id)?;

    let deleted = Task::delete_by_owner(&state.db, task_id, owner).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasknest_shared::auth::jwt::Claims;

    fn auth_for(user_id: Uuid) -> AuthContext {
        AuthContext::from_claims(&Claims::new(user_id, "alice@example.com"))
    }

    #[test]
    fn test_verify_owner_match() {
        let user_id = Uuid::new_v4();
        let auth = auth_for(user_id);

        assert_eq!(verify_owner(&auth, user_id).unwrap(), user_id);
    }

    #[test]
    fn test_verify_owner_mismatch() {
        let auth = auth_for(Uuid::new_v4());
        let other = Uuid::new_v4();

        let result = verify_owner(&auth, other);
        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[test]
    fn test_task_response_from_task() {
        let task = Task {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Buy groceries".to_string(),
            description: Some("Get milk and eggs".to_string()),
            completed: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            priority: None,
            tags: None,
            due_date: None,
            recurrence_pattern: None,
        };

        let response = TaskResponse::from_task(&task);
        assert_eq!(response.id, task.id);
        assert_eq!(response.title, "Buy groceries");
        assert_eq!(response.description.as_deref(), Some("Get milk and eggs"));
        assert!(!response.completed);

        // Reserved columns stay off the wire
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("priority").is_none());
        assert!(json.get("due_date").is_none());
    }

    #[test]
    fn test_create_task_request_validation() {
        let ok = CreateTaskRequest {
            title: "a".repeat(200),
            description: None,
        };
        assert!(ok.validate().is_ok());

        let too_long = CreateTaskRequest {
            title: "a".repeat(201),
            description: None,
        };
        assert!(too_long.validate().is_err());

        let empty = CreateTaskRequest {
            title: String::new(),
            description: None,
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_update_task_request_validation_skips_absent_title() {
        let req = UpdateTaskRequest {
            title: None,
            description: Some("notes".to_string()),
            completed: Some(true),
        };
        assert!(req.validate().is_ok());

        let bad = UpdateTaskRequest {
            title: Some(String::new()),
            description: None,
            completed: None,
        };
        assert!(bad.validate().is_err());
    }
}
