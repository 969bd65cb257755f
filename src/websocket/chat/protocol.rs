//! Chat WebSocket protocol definitions
//!
//! Frames are JSON envelopes `{"event": <name>, "data": <payload>}`.

use chrono::{DateTime, Utc};
use parley_core::{StepKind, StepRecord, TraceEntry};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event from client
#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Send a chat message
    SendMessage {
        #[serde(default)]
        message: String,
        #[serde(default)]
        show_thoughts: bool,
    },
    /// Ping for keepalive
    Ping,
    /// User started typing
    TypingStart,
    /// User stopped typing
    TypingStop,
}

/// Event to client
#[derive(Debug, Serialize, Clone)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    /// One step of a request
    ReceiveMessage(ReceiveMessage),
    /// Connection established
    ConnectionStatus { status: String, connection_id: Uuid },
    /// Pong response
    Pong,
    /// Protocol error (the connection stays open)
    Error {
        message: String,
        code: Option<String>,
    },
}

/// `type` field of a `receive_message` payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    UserMessage,
    Thought,
    FinalResponse,
    /// Generic reply; part of the wire vocabulary, no bundled supervisor sends it
    Response,
    Error,
}

impl From<StepKind> for MessageType {
    fn from(kind: StepKind) -> Self {
        match kind {
            StepKind::UserEcho => Self::UserMessage,
            StepKind::Thought => Self::Thought,
            StepKind::FinalAnswer => Self::FinalResponse,
            StepKind::Error => Self::Error,
        }
    }
}

/// Who a message is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Ai,
}

/// Extra information about a step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepMetadata {
    pub supervisor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thought_number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_thoughts: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_entry: Option<TraceEntry>,
}

/// Payload of a `receive_message` event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiveMessage {
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub sender: Sender,
    pub metadata: StepMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thought_number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_thoughts: Option<usize>,
}

impl ReceiveMessage {
    /// Wire form of a step produced by `supervisor`
    pub fn from_step(step: StepRecord, supervisor: &str) -> Self {
        let sender = match step.kind {
            StepKind::UserEcho => Sender::User,
            _ => Sender::Ai,
        };
        Self {
            kind: step.kind.into(),
            content: step.content,
            timestamp: step.timestamp,
            sender,
            metadata: StepMetadata {
                supervisor: supervisor.to_string(),
                thought_number: step.sequence_index,
                total_thoughts: step.total_steps,
                trace_entry: step.trace_entry,
            },
            thought_number: step.sequence_index,
            total_thoughts: step.total_steps,
        }
    }
}
