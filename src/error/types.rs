/**
 * API Error Types
 *
 * This module defines the error types used by the HTTP handlers. Every
 * application-level failure is handled locally in the handler that detects
 * it and converted to a JSON error envelope; nothing propagates as an
 * unhandled fault under normal operation.
 *
 * # Error Categories
 *
 * ## Client errors (400)
 *
 * - Request body is not JSON
 * - A required JSON key is missing
 * - A required JSON key holds a value of the wrong type
 * - Registering a username that already exists
 * - Targeting a private chat at an unknown user
 *
 * ## Authentication errors (401)
 *
 * - Missing, malformed, expired, or otherwise invalid credentials
 *
 * ## Server errors (500)
 *
 * - Database, password hashing, and token signing failures. There is no
 *   retry logic anywhere; transient store failures surface as 500.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Application error type
///
/// Each variant maps to one of the HTTP statuses the API emits (400, 401,
/// 500). The error message strings for the 400 family are part of the wire
/// contract and mirror what clients already parse.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body was missing or could not be parsed as JSON
    #[error("Request not JSON")]
    NotJson,

    /// A required key was absent from the JSON request body
    #[error("Missing key '{0}'")]
    MissingKey(&'static str),

    /// A required key was present but held a value of the wrong type
    #[error("Invalid value for key '{0}'")]
    InvalidKey(&'static str),

    /// Registration attempted with a username that is already taken
    #[error("User {0} already exists")]
    AlreadyExists(String),

    /// A private chat named a recipient that is not a registered user
    #[error("No such user by that name")]
    NoSuchUser,

    /// Credentials missing or failed verification
    #[error("Unauthorized")]
    Unauthorized,

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing or verification failed
    #[error("Password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Token signing failed
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl ApiError {
    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `NotJson`, `MissingKey`, `InvalidKey`, `AlreadyExists`, `NoSuchUser` - 400 Bad Request
    /// - `Unauthorized` - 401 Unauthorized
    /// - `Database`, `PasswordHash`, `Token` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotJson
            | Self::MissingKey(_)
            | Self::InvalidKey(_)
            | Self::AlreadyExists(_)
            | Self::NoSuchUser => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Database(_) | Self::PasswordHash(_) | Self::Token(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
