/**
 * Request Middleware
 *
 * - `auth` - Basic-auth credential resolution guarding protected routes
 */

pub mod auth;
