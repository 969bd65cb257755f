//! Supervisors
//!
//! A supervisor stands in for the multi-agent backend. It supplies the
//! ordered thoughts of a request and the final answer; the session decides
//! which of them are shown and how they are paced.

mod log_replay;
mod scripted;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::reply::reply_for;
use parley_logs::TraceEntry;

pub use log_replay::LogReplaySupervisor;
pub use scripted::{ScriptedSupervisor, DEFAULT_THOUGHTS};

/// One thought, with the handoff it came from when there is one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thought {
    /// Text shown to the user
    pub content: String,
    /// Handoff recorded when this thought is replayed
    pub handoff: Option<TraceEntry>,
}

impl Thought {
    /// Thought without a handoff
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            handoff: None,
        }
    }

    /// Attach a handoff
    pub fn with_handoff(mut self, handoff: TraceEntry) -> Self {
        self.handoff = Some(handoff);
        self
    }
}

/// Source of thoughts and answers for a conversation
#[async_trait]
pub trait Supervisor: Send + Sync {
    /// Name reported in step metadata
    fn name(&self) -> &str;

    /// Ordered thoughts for a request
    async fn thoughts(&self, user_text: &str) -> Result<Vec<Thought>>;

    /// Final answer for a request
    async fn answer(&self, user_text: &str) -> Result<String> {
        Ok(reply_for(user_text))
    }
}

/// Supervisor selected in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupervisorKind {
    /// Replay thoughts and handoffs scraped from a log file
    #[default]
    LogReplay,
    /// Replay a fixed list of thoughts
    Scripted,
}

impl std::fmt::Display for SupervisorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LogReplay => write!(f, "log_replay"),
            Self::Scripted => write!(f, "scripted"),
        }
    }
}
