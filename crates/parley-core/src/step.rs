//! Step records emitted by a conversation

use chrono::{DateTime, Utc};
use serde::Serialize;

use parley_logs::TraceEntry;

/// Kind of a step record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Intermediate status message shown before the answer
    Thought,
    /// The answer; last step of a successful request
    FinalAnswer,
    /// Failure; last step of a failed request
    Error,
    /// Echo of the trimmed user input
    UserEcho,
}

/// One step of a request. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    /// What the step is
    pub kind: StepKind,
    /// Text shown to the user
    pub content: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// 1-based position among the thoughts of the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_index: Option<usize>,
    /// Number of thoughts in the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_steps: Option<usize>,
    /// Handoff recorded alongside this step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_entry: Option<TraceEntry>,
}

impl StepRecord {
    fn new(kind: StepKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            timestamp: Utc::now(),
            sequence_index: None,
            total_steps: None,
            trace_entry: None,
        }
    }

    /// Echo of the user's input
    pub fn user_echo(content: impl Into<String>) -> Self {
        Self::new(StepKind::UserEcho, content)
    }

    /// Thought `index` of `total` (1-based)
    pub fn thought(
        content: impl Into<String>,
        index: usize,
        total: usize,
        trace_entry: Option<TraceEntry>,
    ) -> Self {
        Self {
            sequence_index: Some(index),
            total_steps: Some(total),
            trace_entry,
            ..Self::new(StepKind::Thought, content)
        }
    }

    /// Final answer
    pub fn final_answer(content: impl Into<String>) -> Self {
        Self::new(StepKind::FinalAnswer, content)
    }

    /// Error step
    pub fn error(content: impl Into<String>) -> Self {
        Self::new(StepKind::Error, content)
    }

    /// Whether no step may follow this one in the same request
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, StepKind::FinalAnswer | StepKind::Error)
    }
}
