/**
 * Chat Handlers
 *
 * - `POST /chat/add` - Post a public or private message
 * - `POST /chat/get` - Poll for messages newer than a timestamp
 * - `GET /chat/nuke` - Delete every message (test/reset tooling only)
 *
 * # Poll Semantics
 *
 * Clients poll with the `created` value of the newest message they have
 * seen, in epoch seconds. One second is added to `start_time` before
 * filtering, so a message created at exactly `start_time` is never
 * redelivered on the next poll. Each poll also refreshes the caller's
 * `last_seen` before the query runs.
 */

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Map, Value};

use crate::auth::users::get_user_by_username;
use crate::chat::db::{delete_all, insert_message, messages_since};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::presence;
use crate::routes::body::{json_body, require_f64, require_str};
use crate::server::state::AppState;

/// Post a chat message
///
/// Body: `{"content": ..., "private_user"?: ...}`. A private recipient
/// must be a registered user; that is checked before anything is written,
/// so a rejected private chat leaves no public copy behind. Responds 201
/// `{"response":"OK"}`.
pub async fn add_chat(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let body = json_body(payload)?;
    let content = require_str(&body, "content")?;

    // A non-string recipient can never name a registered user, so it gets
    // the same rejection a failed lookup would
    let private_user = match body.get("private_user") {
        None => None,
        Some(value) => Some(value.as_str().ok_or(ApiError::NoSuchUser)?.to_string()),
    };

    if let Some(recipient) = &private_user {
        if get_user_by_username(&state.pool, recipient).await?.is_none() {
            tracing::warn!(
                "{} tried to send a private chat to unknown user {}",
                user.username,
                recipient
            );
            return Err(ApiError::NoSuchUser);
        }
    }

    insert_message(&state.pool, &user.username, &content, private_user.as_deref()).await?;

    Ok((StatusCode::CREATED, Json(json!({ "response": "OK" }))))
}

/// Poll for new messages
///
/// Body: `{"start_time": <epoch seconds>}`. Returns a map keyed by
/// message label, each entry carrying `created` (epoch seconds),
/// `username`, `content`, and `private_user` when set. Messages the caller
/// may not see are silently omitted.
pub async fn get_chats(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let body = json_body(payload)?;
    let start_time = require_f64(&body, "start_time")?;

    // Every poll counts as a check-in
    presence::touch(&state.pool, &user.username).await?;

    // +1 second keeps the previous poll's newest message off the boundary
    let cutoff_ms = ((start_time + 1.0) * 1000.0) as i64;
    let messages = messages_since(&state.pool, cutoff_ms).await?;

    let mut response = Map::new();
    for chat in messages.iter().filter(|m| m.visible_to(&user.username)) {
        let mut entry = json!({
            "created": chat.created_secs(),
            "username": chat.username,
            "content": chat.content,
        });
        if let Some(recipient) = &chat.private_user {
            entry["private_user"] = json!(recipient);
        }
        response.insert(chat.label(), entry);
    }

    Ok(Json(Value::Object(response)))
}

/// Delete every chat message
///
/// Unauthenticated, unconditional. Exists for test/reset tooling and must
/// not be exposed on a production deployment.
pub async fn nuke_chats(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let deleted = delete_all(&state.pool).await?;
    tracing::warn!("/chat/nuke deleted {} messages", deleted);

    Ok(Json(json!({ "response": "OK" })))
}
