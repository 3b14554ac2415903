/**
 * Database Operations for Chat Messages
 *
 * This module persists chat messages and implements the visibility rule.
 *
 * Messages are immutable once written. A message is inserted fully formed
 * in a single statement; the private recipient, when present, is validated
 * by the handler before the insert, so a rejected private chat persists
 * nothing.
 *
 * `created` is epoch milliseconds, assigned at insertion time. Polls use
 * strict `created > cutoff` and descending creation order.
 */

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// A chat message row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatMessage {
    pub id: i64,
    /// Creation time, epoch milliseconds, immutable
    pub created: i64,
    /// Author username
    pub username: String,
    pub content: String,
    /// Single intended recipient; `None` means public
    pub private_user: Option<String>,
}

impl ChatMessage {
    /// Visibility rule: public messages are visible to everyone; a private
    /// message is visible only to its recipient and its author.
    pub fn visible_to(&self, viewer: &str) -> bool {
        match &self.private_user {
            None => true,
            Some(recipient) => recipient == viewer || self.username == viewer,
        }
    }

    /// Creation time re-expressed as whole epoch seconds (wire format)
    pub fn created_secs(&self) -> i64 {
        self.created.div_euclid(1000)
    }

    /// Response-map key: `username@<rfc3339 creation time>`
    pub fn label(&self) -> String {
        let created = Utc
            .timestamp_millis_opt(self.created)
            .single()
            .unwrap_or_default();
        format!("{}@{}", self.username, created.to_rfc3339())
    }
}

/// Insert a new message with a server-assigned creation timestamp
pub async fn insert_message(
    pool: &SqlitePool,
    username: &str,
    content: &str,
    private_user: Option<&str>,
) -> Result<ChatMessage, sqlx::Error> {
    let created = Utc::now().timestamp_millis();

    sqlx::query_as::<_, ChatMessage>(
        r#"
        INSERT INTO chats (created, username, content, private_user)
        VALUES (?, ?, ?, ?)
        RETURNING id, created, username, content, private_user
        "#,
    )
    .bind(created)
    .bind(username)
    .bind(content)
    .bind(private_user)
    .fetch_one(pool)
    .await
}

/// All messages created strictly after `cutoff_ms`, newest first
pub async fn messages_since(
    pool: &SqlitePool,
    cutoff_ms: i64,
) -> Result<Vec<ChatMessage>, sqlx::Error> {
    sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT id, created, username, content, private_user
        FROM chats
        WHERE created > ?
        ORDER BY created DESC
        "#,
    )
    .bind(cutoff_ms)
    .fetch_all(pool)
    .await
}

/// Delete every chat message
///
/// Unauthenticated reset used by `/chat/nuke`; test tooling only.
pub async fn delete_all(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM chats").execute(pool).await?;
    Ok(result.rows_affected())
}
