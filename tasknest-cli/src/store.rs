/// Local file-backed task store
///
/// A standalone SQLite database for the CLI. This store deliberately does
/// not share a schema with the web stack: user IDs here are free-form
/// strings chosen on the command line, not account references, and the
/// database is a single local file.
///
/// WAL journal mode is enabled so a reader and a writer can overlap.

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;

/// Default database file, next to wherever the command runs
const DEFAULT_DB_PATH: &str = "tasknest.db";

/// Environment variable overriding the database path
const DB_PATH_ENV: &str = "TASKNEST_DB";

/// A task row in the local store
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredTask {
    /// Auto-incrementing task ID
    pub id: i64,

    /// Free-form owner identifier
    pub user_id: String,

    /// Task title (1-200 characters)
    pub title: String,

    /// Completion status
    pub completed: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last modified
    pub updated_at: DateTime<Utc>,
}

/// Handle to the local task database
pub struct TaskStore {
    pool: SqlitePool,
}

impl TaskStore {
    /// Opens the store at the default path (or `TASKNEST_DB` if set)
    ///
    /// Creates the database file and schema on first use.
    pub async fn open_default() -> Result<Self, sqlx::Error> {
        let path = std::env::var(DB_PATH_ENV).unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
        Self::open(Path::new(&path)).await
    }

    /// Opens the store at an explicit path, initializing the schema
    pub async fn open(path: &Path) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS tasks_user_id_idx ON tasks (user_id)")
            .execute(&pool)
            .await?;

        Ok(Self { pool })
    }

    /// Creates a new task for a user
    pub async fn create_task(
        &self,
        user_id: &str,
        title: &str,
    ) -> Result<StoredTask, sqlx::Error> {
        let now = Utc::now();

        let task = sqlx::query_as::<_, StoredTask>(
            r#"
            INSERT INTO tasks (user_id, title, completed, created_at, updated_at)
            VALUES (?1, ?2, 0, ?3, ?3)
            RETURNING id, user_id, title, completed, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    /// Lists a user's tasks, oldest first
    pub async fn tasks_for_user(&self, user_id: &str) -> Result<Vec<StoredTask>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, StoredTask>(
            r#"
            SELECT id, user_id, title, completed, created_at, updated_at
            FROM tasks
            WHERE user_id = ?1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }
}
