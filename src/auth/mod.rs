/**
 * Authentication
 *
 * This module owns user accounts and session tokens.
 *
 * - `users` - User records and their database operations
 * - `tokens` - Signed, time-limited session tokens (JWT)
 * - `handlers` - HTTP handlers for registration and login
 */

pub mod handlers;
pub mod tokens;
pub mod users;
