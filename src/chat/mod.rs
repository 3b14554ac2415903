/**
 * Chat
 *
 * - `db` - Chat message records, queries, and the visibility rule
 * - `handlers` - HTTP handlers for posting, polling, and clearing chats
 */

pub mod db;
pub mod handlers;
