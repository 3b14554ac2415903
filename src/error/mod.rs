/**
 * Error Handling
 *
 * This module defines the application error taxonomy and its conversion
 * to HTTP responses.
 *
 * - `types` - The `ApiError` enum covering every handler-detected failure
 * - `conversion` - `IntoResponse` implementation producing the JSON envelope
 */

pub mod conversion;
pub mod types;

pub use types::ApiError;
