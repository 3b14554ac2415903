/**
 * Application State
 *
 * This module defines the state container shared by all handlers and the
 * `FromRef` implementations that let handlers extract just the part they
 * need.
 *
 * # Thread Safety
 *
 * Requests are stateless; the only shared resources are the connection
 * pool (internally synchronized by sqlx) and the immutable configuration.
 * There is no other in-process shared mutable state.
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::server::config::Config;

/// Application state passed to every handler
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool holding the `users` and `chats` tables
    pub pool: SqlitePool,
    /// Immutable server configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}

/// Allow handlers that only touch the database to extract the pool directly
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.pool.clone()
    }
}

impl FromRef<AppState> for Arc<Config> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
