//! Chat WebSocket module

pub mod gateway;
pub mod handlers;
pub mod protocol;
pub mod session;

use axum::{extract::ws::WebSocketUpgrade, response::IntoResponse, Extension};
use std::sync::Arc;

use crate::middleware::auth::RequireSession;
pub use gateway::Gateway;

/// WebSocket upgrade handler
pub async fn chat_handler(
    RequireSession(user): RequireSession,
    ws: WebSocketUpgrade,
    Extension(gateway): Extension<Arc<Gateway>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| session::handle_socket(socket, gateway, user))
}
