//! WebSocket module for Parley
//!
//! Provides real-time communication endpoints:
//! - /ws/chat - Streaming chat WebSocket

pub mod chat;

pub use chat::{chat_handler, Gateway};

use axum::{routing::get, Router};

/// Create the WebSocket router
pub fn websocket_router() -> Router {
    Router::new().route("/ws/chat", get(chat_handler))
}
