/**
 * Presence Tracking
 *
 * A user's presence is approximated by their most recent poll time: every
 * `/chat/get` refreshes `last_seen`, and `/user/list_current` returns the
 * users seen within the last few seconds (default 10).
 *
 * The response map is keyed by username, the stable identifier.
 */

use axum::{extract::State, response::Json};
use chrono::Utc;
use serde_json::{json, Map, Value};
use sqlx::SqlitePool;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

/// Record that a user checked in just now
pub async fn touch(pool: &SqlitePool, username: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET last_seen = ? WHERE username = ?")
        .bind(Utc::now().timestamp_millis())
        .bind(username)
        .execute(pool)
        .await?;
    Ok(())
}

/// Users whose `last_seen` falls within the last `window_secs` seconds
pub async fn active_since(
    pool: &SqlitePool,
    window_secs: i64,
) -> Result<Vec<(String, i64)>, sqlx::Error> {
    let threshold = Utc::now().timestamp_millis() - window_secs * 1000;

    sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT username, last_seen
        FROM users
        WHERE last_seen > ?
        "#,
    )
    .bind(threshold)
    .fetch_all(pool)
    .await
}

/// List currently-active users
///
/// `GET /user/list_current`. Returns a map keyed by username:
/// `{"alice": {"username": "alice", "last_seen": <epoch seconds>}}`.
pub async fn list_current(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> Result<Json<Value>, ApiError> {
    let active = active_since(&state.pool, state.config.presence_window_secs).await?;

    let mut response = Map::new();
    for (username, last_seen_ms) in active {
        response.insert(
            username.clone(),
            json!({
                "username": username,
                "last_seen": last_seen_ms.div_euclid(1000),
            }),
        );
    }

    Ok(Json(Value::Object(response)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::users::{create_user, get_user_by_username};
    use crate::server::init::memory_pool;

    #[tokio::test]
    async fn test_touch_sets_last_seen() {
        let pool = memory_pool().await;
        create_user(&pool, "alice", "hash").await.unwrap();

        let before = Utc::now().timestamp_millis();
        touch(&pool, "alice").await.unwrap();

        let user = get_user_by_username(&pool, "alice").await.unwrap().unwrap();
        assert!(user.last_seen.unwrap() >= before);
    }

    #[tokio::test]
    async fn test_active_since_window() {
        let pool = memory_pool().await;
        create_user(&pool, "recent", "hash").await.unwrap();
        create_user(&pool, "stale", "hash").await.unwrap();
        create_user(&pool, "never", "hash").await.unwrap();

        let now = Utc::now().timestamp_millis();
        sqlx::query("UPDATE users SET last_seen = ? WHERE username = 'recent'")
            .bind(now - 2_000)
            .execute(&pool)
            .await
            .unwrap();
        // Eleven seconds ago: outside the default ten second window
        sqlx::query("UPDATE users SET last_seen = ? WHERE username = 'stale'")
            .bind(now - 11_000)
            .execute(&pool)
            .await
            .unwrap();

        let active = active_since(&pool, 10).await.unwrap();
        let names: Vec<_> = active.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["recent"]);
    }
}
