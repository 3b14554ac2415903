/**
 * Authentication Middleware
 *
 * This module protects routes that require an authenticated user. It
 * parses HTTP Basic credentials from the Authorization header and resolves
 * them to a user.
 *
 * # Credential Forms
 *
 * The Basic "username" field carries either of:
 * 1. A session token (password left empty): `token:`
 * 2. A literal username with its password: `username:password`
 *
 * Token interpretation is tried first. A valid token whose user no longer
 * exists does not authenticate. Any failure returns 401 with no body.
 *
 * On success the resolved user is attached to the request extensions and
 * handlers receive it through the `AuthUser` extractor.
 */

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use sqlx::SqlitePool;

use crate::auth::tokens::verify_token;
use crate::auth::users::{get_user_by_username, verify_password, User};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Authenticated user attached to the request by the middleware
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// Authentication middleware
///
/// Returns 401 Unauthorized if credentials are missing, malformed, or fail
/// verification. Database failures surface as 500.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            StatusCode::UNAUTHORIZED
        })?;

    let (id, password) = decode_basic(auth_header).ok_or_else(|| {
        tracing::warn!("Malformed Basic Authorization header");
        StatusCode::UNAUTHORIZED
    })?;

    let user = authenticate(&state.pool, &state.config.secret_key, &id, &password)
        .await
        .map_err(|e| {
            tracing::error!("Authentication lookup failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(AuthenticatedUser {
        username: user.username,
    });

    Ok(next.run(request).await)
}

/// Resolve a Basic credential pair to a user
///
/// The "username" field is interpreted as a token first, then as a literal
/// username verified against the stored password hash. `Ok(None)` means
/// the credential did not authenticate.
pub async fn authenticate(
    pool: &SqlitePool,
    secret: &str,
    id: &str,
    password: &str,
) -> Result<Option<User>, ApiError> {
    if let Ok(claims) = verify_token(secret, id) {
        // Token user may have been removed since issuance
        return Ok(get_user_by_username(pool, &claims.sub).await?);
    }

    let Some(user) = get_user_by_username(pool, id).await? else {
        return Ok(None);
    };

    if verify_password(&user, password)? {
        Ok(Some(user))
    } else {
        tracing::warn!("Failed login attempt for {}", id);
        Ok(None)
    }
}

/// Decode an HTTP Basic Authorization header value into (username, password)
fn decode_basic(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (id, password) = decoded.split_once(':')?;
    Some((id.to_string(), password.to_string()))
}

/// Axum extractor for the authenticated user
///
/// Usable as a handler parameter on any route behind `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                StatusCode::UNAUTHORIZED
            })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::tokens::issue_token;
    use crate::auth::users::create_user;
    use crate::server::init::memory_pool;

    const SECRET: &str = "test-secret";

    async fn seed_user(pool: &SqlitePool, username: &str, password: &str) {
        let hash = bcrypt::hash(password, 4).unwrap();
        create_user(pool, username, &hash).await.unwrap();
    }

    #[test]
    fn test_decode_basic() {
        let header = format!("Basic {}", BASE64.encode("alice:hunter2"));
        assert_eq!(
            decode_basic(&header),
            Some(("alice".to_string(), "hunter2".to_string()))
        );
    }

    #[test]
    fn test_decode_basic_empty_password() {
        let header = format!("Basic {}", BASE64.encode("some-token:"));
        assert_eq!(
            decode_basic(&header),
            Some(("some-token".to_string(), String::new()))
        );
    }

    #[test]
    fn test_decode_basic_rejects_other_schemes() {
        assert_eq!(decode_basic("Bearer abc"), None);
        assert_eq!(decode_basic("Basic ???"), None);
    }

    #[tokio::test]
    async fn test_authenticate_with_password() {
        let pool = memory_pool().await;
        seed_user(&pool, "alice", "hunter2").await;

        let user = authenticate(&pool, SECRET, "alice", "hunter2").await.unwrap();
        assert_eq!(user.unwrap().username, "alice");
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let pool = memory_pool().await;
        seed_user(&pool, "alice", "hunter2").await;

        let user = authenticate(&pool, SECRET, "alice", "wrong").await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let pool = memory_pool().await;
        let user = authenticate(&pool, SECRET, "ghost", "pw").await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_authenticate_with_token() {
        let pool = memory_pool().await;
        seed_user(&pool, "alice", "hunter2").await;

        let token = issue_token(SECRET, "alice", 3600).unwrap();
        let user = authenticate(&pool, SECRET, &token, "").await.unwrap();
        assert_eq!(user.unwrap().username, "alice");
    }

    #[tokio::test]
    async fn test_token_for_missing_user_does_not_authenticate() {
        let pool = memory_pool().await;

        let token = issue_token(SECRET, "deleted", 3600).unwrap();
        let user = authenticate(&pool, SECRET, &token, "").await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_expired_token_does_not_authenticate() {
        let pool = memory_pool().await;
        seed_user(&pool, "alice", "hunter2").await;

        let token = issue_token(SECRET, "alice", -10).unwrap();
        let user = authenticate(&pool, SECRET, &token, "").await.unwrap();
        assert!(user.is_none());
    }
}
