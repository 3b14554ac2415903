//! lazychat - Minimal Multi-User Chat Backend
//!
//! lazychat is a small poll-based chat service: users register, log in with
//! a password or a signed session token, post public or privately targeted
//! messages, and poll for everything created after a timestamp.
//!
//! # Module Structure
//!
//! - **`server`** - Configuration, shared state, and app construction
//! - **`auth`** - User accounts, session tokens, register/login handlers
//! - **`middleware`** - Basic-auth authentication middleware
//! - **`chat`** - Message persistence, visibility, and chat handlers
//! - **`presence`** - Last-seen tracking and the active-user listing
//! - **`error`** - The `ApiError` taxonomy and its HTTP conversion
//! - **`routes`** - Router assembly and request body helpers
//!
//! # Delivery Model
//!
//! There is no push transport. Clients poll `POST /chat/get` with the
//! newest `created` timestamp they have seen; the server returns everything
//! newer, filtered by the private-message visibility rule, and records the
//! poll as the user's `last_seen` for presence.

pub mod auth;
pub mod chat;
pub mod error;
pub mod middleware;
pub mod presence;
pub mod routes;
pub mod server;
