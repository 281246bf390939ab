/// Conversation model and database operations
///
/// A conversation is a chat session between a user and the (future) agent.
/// A user can have many conversations but at most one active conversation;
/// the single-active rule is application-enforced, not a database constraint.
///
/// Owner scoping follows the same contract as tasks: every lookup carries
/// `user_id` in the WHERE clause and absence equals foreign ownership.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Conversation model representing a chat session
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Conversation {
    /// Unique conversation ID
    pub id: Uuid,

    /// User who owns this conversation
    pub user_id: Uuid,

    /// Whether this is the user's current conversation
    pub is_active: bool,

    /// When the conversation was created
    pub created_at: DateTime<Utc>,

    /// When the conversation was last updated
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Creates a new active conversation for a user
    pub async fn create(pool: &PgPool, user_id: Uuid) -> Result<Self, sqlx::Error> {
        let conversation = sqlx::query_as::<_, Conversation>(
            r#"
            INSERT INTO conversations (user_id)
            VALUES ($1)
            RETURNING id, user_id, is_active, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(conversation)
    }

    /// Finds a conversation by ID with owner verification in one step
    pub async fn find_by_id_and_owner(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let conversation = sqlx::query_as::<_, Conversation>(
            r#"
            SELECT id, user_id, is_active, created_at, updated_at
            FROM conversations
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(conversation)
    }

    /// Finds the user's active conversation, if any
    ///
    /// Newest first so that a transient double-active state still resolves
    /// to the most recent session.
    pub async fn find_active_by_owner(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let conversation = sqlx::query_as::<_, Conversation>(
            r#"
            SELECT id, user_id, is_active, created_at, updated_at
            FROM conversations
            WHERE user_id = $1 AND is_active = TRUE
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(conversation)
    }

    /// Lists all conversations for a user, newest first
    pub async fn list_by_owner(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let conversations = sqlx::query_as::<_, Conversation>(
            r#"
            SELECT id, user_id, is_active, created_at, updated_at
            FROM conversations
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(conversations)
    }

    /// Archives a conversation (clears the active flag), owner-scoped
    pub async fn archive(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let conversation = sqlx::query_as::<_, Conversation>(
            r#"
            UPDATE conversations
            SET is_active = FALSE,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(conversation)
    }
}
