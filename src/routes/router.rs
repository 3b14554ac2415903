// Router Configuration
//
// This module combines every endpoint into a single Axum router.
//
// # Route Map
//
// Protected (Basic auth: `username:password` or `token:`):
// - `GET /user/login` - Exchange credentials for a session token
// - `GET /user/list_current` - Recently active users
// - `POST /chat/add` - Post a message
// - `POST /chat/get` - Poll for new messages
//
// Open:
// - `GET /` - Browser chat client
// - `POST /user/register` - Create an account
// - `GET /chat/nuke` - Clear all messages (test/reset tooling)
// - `/static/*` - Static assets (the client script lives at `/static/js/lazychat.js`)

use axum::{
    middleware,
    response::Html,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::auth::handlers::{login, register};
use crate::chat::handlers::{add_chat, get_chats, nuke_chats};
use crate::middleware::auth::auth_middleware;
use crate::presence::list_current;
use crate::server::state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/user/login", get(login))
        .route("/user/list_current", get(list_current))
        .route("/chat/add", post(add_chat))
        .route("/chat/get", post(get_chats))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let open = Router::new()
        .route("/", get(index_page))
        .route("/user/register", post(register))
        .route("/chat/nuke", get(nuke_chats));

    protected
        .merge(open)
        .nest_service("/static", ServeDir::new("static"))
        .fallback(|| async { "404 Not Found" })
        .with_state(state)
}

/// Browser chat client page
///
/// The markup is compiled in; the script it loads is served from
/// `/static` so it can be tweaked without rebuilding.
async fn index_page() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
