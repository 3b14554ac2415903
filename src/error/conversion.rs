/**
 * Error Conversion
 *
 * This module converts `ApiError` values into HTTP responses so handlers
 * can return `Result<_, ApiError>` directly.
 *
 * # Response Format
 *
 * Error responses are returned as JSON:
 * ```json
 * {
 *   "error": "Missing key 'username'"
 * }
 * ```
 *
 * The 401 response carries no body beyond the envelope; clients only key
 * off the status code for authentication failures.
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Log the detail server-side, keep the wire message generic
            tracing::error!("Internal error: {}", self);
            let body = serde_json::json!({ "error": "Internal server error" });
            return (status, Json(body)).into_response();
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}
