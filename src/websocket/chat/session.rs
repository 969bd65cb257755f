//! Chat WebSocket connection loop

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::gateway::Gateway;
use super::handlers::{handle_client_message, invalid_message};
use super::protocol::{ClientMessage, ServerMessage};
use crate::middleware::session::SessionContext;

/// Handle WebSocket connection
pub async fn handle_socket(socket: WebSocket, gateway: Arc<Gateway>, user: SessionContext) {
    let connection_id = Uuid::new_v4();
    info!(
        %connection_id,
        user = %user.username,
        session = ?user.session_id,
        "WebSocket chat connection established"
    );

    let (mut sender, mut receiver) = socket.split();

    let status = ServerMessage::ConnectionStatus {
        status: "Connected".to_string(),
        connection_id,
    };
    if let Ok(json) = serde_json::to_string(&status) {
        let _ = sender.send(Message::Text(json)).await;
    }

    // Events from spawned request tasks back to the WS sender
    let (tx, mut internal_rx) = tokio::sync::mpsc::unbounded_channel::<ServerMessage>();

    loop {
        tokio::select! {
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        debug!(%connection_id, "Received frame: {}", text);
                        match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(client_msg) => {
                                handle_client_message(client_msg, connection_id, &gateway, &tx);
                            }
                            Err(e) => {
                                let _ = tx.send(invalid_message(&e));
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) => {
                        info!(%connection_id, "WebSocket connection closed");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sender.send(Message::Pong(data)).await;
                    }
                    Some(Err(e)) => {
                        error!(%connection_id, "WebSocket error: {}", e);
                        break;
                    }
                    None => break,
                    _ => {}
                }
            }
            server_msg = internal_rx.recv() => {
                match server_msg {
                    Some(msg) => {
                        if let Ok(json) = serde_json::to_string(&msg) {
                            if sender.send(Message::Text(json)).await.is_err() {
                                break;
                            }
                        }
                    }
                    None => break,
                }
            }
        }
    }

    info!(%connection_id, "WebSocket chat connection ended");
}
