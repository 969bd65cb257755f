//! Trace entry type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One simulated agent-to-agent handoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Agent that handed off
    pub caller: String,
    /// Agent the handoff is addressed to
    pub talkto: String,
    /// Message carried by the handoff
    pub message: String,
    /// When the entry was extracted
    pub timestamp: DateTime<Utc>,
}

impl TraceEntry {
    /// Create an entry stamped with the current time.
    pub fn new(
        caller: impl Into<String>,
        talkto: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            caller: caller.into(),
            talkto: talkto.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Rename `from` to `to` in both agent positions (exact matches only).
    pub fn rename_agent(mut self, from: &str, to: &str) -> Self {
        if self.caller == from {
            self.caller = to.to_string();
        }
        if self.talkto == from {
            self.talkto = to.to_string();
        }
        self
    }
}
