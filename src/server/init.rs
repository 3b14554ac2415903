/**
 * Server Initialization
 *
 * This module builds the application: it connects the database pool,
 * creates the schema, assembles the state, and returns the configured
 * router.
 *
 * # Initialization Steps
 *
 * 1. Connect the SQLite pool (creating the file if needed)
 * 2. Create the `users` and `chats` tables if they do not exist
 * 3. Construct `AppState` from the pool and configuration
 * 4. Build the router with all routes and middleware
 */

use axum::Router;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

use crate::routes::router::create_router;
use crate::server::config::Config;
use crate::server::state::AppState;

/// Create and configure the application
///
/// # Errors
///
/// Fails if the database cannot be opened or the schema cannot be created.
pub async fn create_app(config: Config) -> Result<Router, sqlx::Error> {
    tracing::info!("Initializing lazychat server");

    let pool = connect_pool(&config.database_url).await?;
    init_schema(&pool).await?;

    tracing::info!("Database ready at {}", config.database_url);

    let state = AppState::new(pool, config);
    Ok(create_router(state))
}

/// Connect the SQLite connection pool
///
/// In-memory databases get a single connection, since each connection to
/// `sqlite::memory:` would otherwise see its own empty database.
pub async fn connect_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Create the database schema
///
/// Timestamps (`created`, `last_seen`) are stored as epoch milliseconds.
/// The `users` primary key is what turns a duplicate registration into a
/// constraint violation instead of a race.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            username TEXT PRIMARY KEY,
            password_hash TEXT NOT NULL,
            last_seen INTEGER
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS chats (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created INTEGER NOT NULL,
            username TEXT NOT NULL,
            content TEXT NOT NULL,
            private_user TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Polls filter and order on creation time
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_chats_created ON chats (created DESC)")
        .execute(pool)
        .await?;

    Ok(())
}

/// In-memory pool with the schema applied, for tests
#[doc(hidden)]
pub async fn memory_pool() -> SqlitePool {
    let pool = connect_pool("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    init_schema(&pool)
        .await
        .expect("failed to create schema");
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let pool = memory_pool().await;
        init_schema(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_app() {
        let app = create_app(Config::for_tests()).await;
        assert!(app.is_ok());
    }
}
