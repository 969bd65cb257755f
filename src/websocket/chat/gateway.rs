//! Streaming gateway
//!
//! Owns the conversation session behind one lock, so concurrent requests
//! emit their steps one request at a time.

use futures::StreamExt;
use parley_core::{ConversationSession, Error as CoreError, RelabelPolicy, StepRecord, TraceBuffer};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

use super::protocol::{ReceiveMessage, ServerMessage};

/// Channel that carries events to one client
pub type Outbox = mpsc::UnboundedSender<ServerMessage>;

/// Session, trace and pacing shared by every chat connection
pub struct Gateway {
    session: Mutex<ConversationSession>,
    supervisor_name: String,
    trace: Arc<TraceBuffer>,
    emit_delay: Duration,
    relabel: RelabelPolicy,
}

impl Gateway {
    pub fn new(session: ConversationSession, emit_delay: Duration, relabel: RelabelPolicy) -> Self {
        Self {
            supervisor_name: session.supervisor_name().to_string(),
            trace: session.state().trace().clone(),
            session: Mutex::new(session),
            emit_delay,
            relabel,
        }
    }

    /// Trace buffer of the session; readable without the gateway lock
    pub fn trace(&self) -> &Arc<TraceBuffer> {
        &self.trace
    }

    /// Relabel policy for query endpoints
    pub fn relabel(&self) -> &RelabelPolicy {
        &self.relabel
    }

    /// Handle one `send_message` event.
    ///
    /// An empty message gets a single error and nothing else. Otherwise the
    /// trimmed text is echoed, then the session runs under the lock and each
    /// step is forwarded in order. Send failures are ignored: a request that
    /// started always runs to completion.
    pub async fn handle_send(&self, message: &str, show_thoughts: bool, outbox: &Outbox) {
        let text = message.trim();
        if text.is_empty() {
            warn!("Rejected empty message");
            self.emit(
                outbox,
                StepRecord::error(format!("Error processing message: {}", CoreError::EmptyMessage)),
            );
            return;
        }

        self.emit(outbox, StepRecord::user_echo(text));

        let mut session = self.session.lock().await;
        debug!(show_thoughts, "Processing message under gateway lock");

        let mut steps = session.process(text, show_thoughts);
        let mut first = true;
        while let Some(step) = steps.next().await {
            if !first {
                tokio::time::sleep(self.emit_delay).await;
            }
            first = false;
            self.emit(outbox, step);
        }
    }

    fn emit(&self, outbox: &Outbox, step: StepRecord) {
        let msg = ServerMessage::ReceiveMessage(ReceiveMessage::from_step(step, &self.supervisor_name));
        if outbox.send(msg).is_err() {
            debug!("Client gone, dropping step");
        }
    }
}
