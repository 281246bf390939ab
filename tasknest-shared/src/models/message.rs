/// Message model and database operations
///
/// A message is one entry in a conversation: human input, agent output, or
/// a tool result kept for the audit trail. Messages carry a denormalized
/// `user_id` (matching the owning conversation's `user_id`) so isolation
/// queries never need a join.
///
/// Content is limited to 4000 characters, enforced both here and by a
/// database CHECK constraint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Human input
    User,

    /// Agent response
    Assistant,

    /// Tool call result
    Tool,
}

impl MessageRole {
    /// Converts role to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::Tool => "tool",
        }
    }

    /// Parses a role from its stored string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(MessageRole::User),
            "assistant" => Some(MessageRole::Assistant),
            "tool" => Some(MessageRole::Tool),
            _ => None,
        }
    }
}

/// Message model representing one conversation entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    /// Unique message ID
    pub id: Uuid,

    /// Conversation this message belongs to
    pub conversation_id: Uuid,

    /// User who owns the conversation
    pub user_id: Uuid,

    /// Role string ("user", "assistant", "tool")
    pub role: String,

    /// Message text (1-4000 characters)
    pub content: String,

    /// When the message was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMessage {
    /// Conversation to append to
    pub conversation_id: Uuid,

    /// Owner of the conversation
    pub user_id: Uuid,

    /// Message role
    pub role: MessageRole,

    /// Message text
    pub content: String,
}

impl Message {
    /// Appends a message to a conversation
    ///
    /// The caller is responsible for having resolved the conversation
    /// through an owner-scoped lookup first, so `user_id` here always
    /// matches the conversation's owner.
    pub async fn create(pool: &PgPool, data: CreateMessage) -> Result<Self, sqlx::Error> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (conversation_id, user_id, role, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, conversation_id, user_id, role, content, created_at
            "#,
        )
        .bind(data.conversation_id)
        .bind(data.user_id)
        .bind(data.role.as_str())
        .bind(data.content)
        .fetch_one(pool)
        .await?;

        Ok(message)
    }

    /// Lists a conversation's messages in chronological order, owner-scoped
    pub async fn list_by_conversation(
        pool: &PgPool,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, conversation_id, user_id, role, content, created_at
            FROM messages
            WHERE conversation_id = $1 AND user_id = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(conversation_id)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(messages)
    }

    /// Counts messages in a conversation, owner-scoped
    pub async fn count_by_conversation(
        pool: &PgPool,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM messages WHERE conversation_id = $1 AND user_id = $2",
        )
        .bind(conversation_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }
}
