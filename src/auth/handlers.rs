/**
 * Registration and Login Handlers
 *
 * - `POST /user/register` - Create a user account (no auth required)
 * - `GET /user/login` - Exchange credentials for a session token
 *
 * # Security
 *
 * - Passwords are hashed with bcrypt (DEFAULT_COST) and never stored or
 *   returned in plaintext
 * - Tokens expire after the configured ttl (default 3600 seconds) and
 *   cannot be revoked before that
 */

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::{hash, DEFAULT_COST};
use serde_json::{json, Value};

use crate::auth::tokens::issue_token;
use crate::auth::users::create_user;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::routes::body::{json_body, require_str};
use crate::server::state::AppState;

/// Register a new user
///
/// Body: `{"username": ..., "password": ...}`. Responds 201
/// `{"response":"OK"}` on success, 400 if a key is missing or the username
/// is already taken.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let body = json_body(payload)?;
    let username = require_str(&body, "username")?;
    let password = require_str(&body, "password")?;

    let password_hash = hash(&password, DEFAULT_COST)?;
    create_user(&state.pool, &username, &password_hash).await?;

    tracing::info!("User registered: {}", username);

    Ok((StatusCode::CREATED, Json(json!({ "response": "OK" }))))
}

/// Log in and receive a session token
///
/// The request itself authenticates through the Basic-auth middleware
/// (username/password, or an existing token). Responds
/// `{"token": ..., "duration": <seconds>}`.
pub async fn login(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Value>, ApiError> {
    let ttl = state.config.token_ttl_secs;
    let token = issue_token(&state.config.secret_key, &user.username, ttl)?;

    tracing::info!("Issued token for {}", user.username);

    Ok(Json(json!({ "token": token, "duration": ttl })))
}
