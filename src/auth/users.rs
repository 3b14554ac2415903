/**
 * User Model and Database Operations
 *
 * This module handles user records and their database operations.
 *
 * Usernames are the primary key of the `users` table, so uniqueness is
 * enforced by the store itself rather than by a read-before-write check.
 * A conflicting insert surfaces as `ApiError::AlreadyExists`.
 */

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::ApiError;

/// User record stored in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Username, unique identifier
    pub username: String,
    /// Hashed password (bcrypt); never plaintext
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Last time this user polled for chats, epoch milliseconds
    pub last_seen: Option<i64>,
}

/// Create a new user
///
/// The caller supplies an already-hashed password. A username collision is
/// detected by the primary-key constraint and returned as `AlreadyExists`;
/// there is no separate existence check, so concurrent registrations of the
/// same name cannot both succeed.
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> Result<User, ApiError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, password_hash)
        VALUES (?, ?)
        RETURNING username, password_hash, last_seen
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            ApiError::AlreadyExists(username.to_string())
        }
        _ => ApiError::Database(e),
    })?;

    Ok(user)
}

/// Get user by username
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT username, password_hash, last_seen
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Verify a plaintext password against a user's stored hash
///
/// bcrypt performs the comparison in constant time.
pub fn verify_password(user: &User, password: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(password, &user.password_hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::init::memory_pool;

    #[tokio::test]
    async fn test_create_and_fetch_user() {
        let pool = memory_pool().await;

        let user = create_user(&pool, "alice", "hash").await.unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.last_seen, None);

        let fetched = get_user_by_username(&pool, "alice").await.unwrap();
        assert!(fetched.is_some());
        assert_eq!(fetched.unwrap().password_hash, "hash");
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let pool = memory_pool().await;

        create_user(&pool, "alice", "hash1").await.unwrap();
        let err = create_user(&pool, "alice", "hash2").await.unwrap_err();
        assert!(matches!(err, ApiError::AlreadyExists(name) if name == "alice"));
    }

    #[tokio::test]
    async fn test_unknown_user_is_none() {
        let pool = memory_pool().await;
        let user = get_user_by_username(&pool, "ghost").await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_verify_password() {
        let pool = memory_pool().await;

        // Low cost keeps the test fast; production uses DEFAULT_COST
        let hash = bcrypt::hash("hunter2", 4).unwrap();
        let user = create_user(&pool, "bob", &hash).await.unwrap();

        assert!(verify_password(&user, "hunter2").unwrap());
        assert!(!verify_password(&user, "wrong").unwrap());
    }
}
