//! Chat WebSocket message handlers

use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::gateway::{Gateway, Outbox};
use super::protocol::{ClientMessage, ServerMessage};

/// Handle a parsed client event.
///
/// `send_message` runs on its own task so the connection keeps answering
/// pings while a request streams.
pub fn handle_client_message(
    msg: ClientMessage,
    connection_id: Uuid,
    gateway: &Arc<Gateway>,
    tx: &Outbox,
) {
    match msg {
        ClientMessage::SendMessage {
            message,
            show_thoughts,
        } => {
            debug!(%connection_id, show_thoughts, "send_message: {}", message);
            let gateway = gateway.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                gateway.handle_send(&message, show_thoughts, &tx).await;
            });
        }
        ClientMessage::Ping => {
            let _ = tx.send(ServerMessage::Pong);
        }
        ClientMessage::TypingStart | ClientMessage::TypingStop => {
            debug!(%connection_id, "Typing indicator ignored");
        }
    }
}

/// Error event for a frame that could not be parsed
pub fn invalid_message(err: &serde_json::Error) -> ServerMessage {
    ServerMessage::Error {
        message: format!("Invalid message format: {}", err),
        code: Some("INVALID_MESSAGE".to_string()),
    }
}
