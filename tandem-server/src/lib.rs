mod chat;
mod config;
mod room;
mod signaling;
mod state;

pub use chat::*;
pub use config::*;
pub use room::*;
pub use signaling::*;
pub use state::*;

use axum::Router;
use axum::routing::get;
use std::sync::Arc;

/// Builds the HTTP surface: signaling websocket, chat history and health check.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = state.config.cors_layer();

    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(|| async { "ok" }))
        .merge(chat_routes())
        .layer(cors)
        .with_state(state)
}
