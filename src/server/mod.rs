/**
 * Server Infrastructure
 *
 * - `config` - Environment-driven configuration, loaded once at startup
 * - `state` - Shared application state handed to every handler
 * - `init` - Database setup and app construction
 */

pub mod config;
pub mod init;
pub mod state;
