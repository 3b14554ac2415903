/**
 * Server Configuration
 *
 * This module loads server configuration from environment variables into
 * an explicit struct that is constructed once in `main` and passed through
 * `AppState`. Nothing reads the environment after startup, so there is no
 * ambient global configuration.
 *
 * # Variables
 *
 * - `SECRET_KEY` - Token signing secret
 * - `DATABASE_URL` - SQLite connection string
 * - `SERVER_PORT` - Listen port (default 3000)
 *
 * Defaults are development-friendly; a production deployment must set
 * `SECRET_KEY`.
 */

use crate::auth::tokens::DEFAULT_TTL_SECS;

/// Seconds a user may be idle and still count as "currently online"
pub const DEFAULT_PRESENCE_WINDOW_SECS: i64 = 10;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Secret used to sign session tokens
    pub secret_key: String,
    /// SQLite connection string
    pub database_url: String,
    /// Port the HTTP server listens on
    pub port: u16,
    /// Lifetime of issued session tokens, in seconds
    pub token_ttl_secs: i64,
    /// Window for `/user/list_current`, in seconds
    pub presence_window_secs: i64,
}

impl Config {
    /// Load configuration from the environment
    pub fn from_env() -> Self {
        let secret_key = std::env::var("SECRET_KEY").unwrap_or_else(|_| {
            tracing::warn!("SECRET_KEY not set, using development default");
            "dev-secret-change-me".to_string()
        });

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:lazychat.sqlite?mode=rwc".to_string());

        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        Self {
            secret_key,
            database_url,
            port,
            token_ttl_secs: DEFAULT_TTL_SECS,
            presence_window_secs: DEFAULT_PRESENCE_WINDOW_SECS,
        }
    }

    /// Configuration for tests: in-memory database, fixed secret
    #[doc(hidden)]
    pub fn for_tests() -> Self {
        Self {
            secret_key: "test-secret".to_string(),
            database_url: "sqlite::memory:".to_string(),
            port: 0,
            token_ttl_secs: DEFAULT_TTL_SECS,
            presence_window_secs: DEFAULT_PRESENCE_WINDOW_SECS,
        }
    }
}
