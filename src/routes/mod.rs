/**
 * Routing
 *
 * - `router` - Assembles all endpoints into the application router
 * - `body` - JSON request body field extraction helpers
 */

pub mod body;
pub mod router;
