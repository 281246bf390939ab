/// Task model and database operations
///
/// This module provides the Task model representing a user's todo item.
/// Tasks are the core entity of the TaskNest system.
///
/// # User Isolation
///
/// Every operation that reads, mutates, or deletes a task takes the owner's
/// user ID and applies it in the same SQL statement that locates the row
/// (`WHERE id = $1 AND user_id = $2`). A task that exists but belongs to
/// someone else is indistinguishable from a task that does not exist: both
/// come back as `None` (or zero rows affected). There is no find-then-check
/// variant on purpose.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(200) NOT NULL,
///     description TEXT,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     priority VARCHAR(10),
///     tags TEXT,
///     due_date TIMESTAMPTZ,
///     recurrence_pattern VARCHAR(50)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tasknest_shared::models::task::{Task, CreateTask};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
/// let task = Task::create(&pool, CreateTask {
///     user_id,
///     title: "Buy groceries".to_string(),
///     description: Some("Get milk, eggs, and bread".to_string()),
/// }).await?;
///
/// // Flip completion
/// let task = Task::toggle_completed(&pool, task.id, user_id).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task model representing a todo item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// User who owns this task
    pub user_id: Uuid,

    /// Task title (1-200 characters, validated at the request boundary)
    pub title: String,

    /// Optional detailed description
    pub description: Option<String>,

    /// Completion status
    pub completed: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last modified
    pub updated_at: DateTime<Utc>,

    /// Reserved: task priority (high/medium/low), unused for now
    pub priority: Option<String>,

    /// Reserved: JSON-encoded tag list, unused for now
    pub tags: Option<String>,

    /// Reserved: task deadline, unused for now
    pub due_date: Option<DateTime<Utc>>,

    /// Reserved: recurrence pattern (e.g. "daily", "weekly"), unused for now
    pub recurrence_pattern: Option<String>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Owner of the task
    pub user_id: Uuid,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

/// Input for updating a task
///
/// All fields are optional. Only non-None fields are written; `updated_at`
/// is bumped whenever at least one field is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New completion status (idempotent setter, unlike toggle)
    pub completed: Option<bool>,
}

impl Task {
    /// Creates a new task for a user
    ///
    /// The task starts incomplete with server-assigned id and timestamps.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, title, description, completed,
                      created_at, updated_at, priority, tags, due_date, recurrence_pattern
            "#,
        )
        .bind(data.user_id)
        .bind(data.title)
        .bind(data.description)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID with owner verification in one step
    ///
    /// Returns `None` both when the task does not exist and when it belongs
    /// to a different user, so callers cannot distinguish the two cases.
    pub async fn find_by_id_and_owner(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, completed,
                   created_at, updated_at, priority, tags, due_date, recurrence_pattern
            FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks for a user, newest first
    pub async fn list_by_owner(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, completed,
                   created_at, updated_at, priority, tags, due_date, recurrence_pattern
            FROM tasks
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Updates a task's fields, owner-scoped
    ///
    /// Only non-None fields in `data` are written. Returns the updated task,
    /// or `None` if the task does not exist or is owned by someone else.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build dynamic update query based on which fields are present
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 2;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.completed.is_some() {
            bind_count += 1;
            query.push_str(&format!(", completed = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 AND user_id = $2 \
             RETURNING id, user_id, title, description, completed, \
             created_at, updated_at, priority, tags, due_date, recurrence_pattern",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id).bind(user_id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(completed) = data.completed {
            q = q.bind(completed);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Toggles a task's completion status, owner-scoped
    ///
    /// Flips the boolean and bumps `updated_at` in a single statement. Not
    /// idempotent: each call flips again. Use [`Task::update`] with
    /// `completed` to set an absolute value instead.
    pub async fn toggle_completed(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET completed = NOT completed,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, description, completed,
                      created_at, updated_at, priority, tags, due_date, recurrence_pattern
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task, owner-scoped
    ///
    /// # Returns
    ///
    /// True if the task was deleted, false if it does not exist or is owned
    /// by someone else.
    pub async fn delete_by_owner(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts tasks owned by a user
    pub async fn count_by_owner(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
