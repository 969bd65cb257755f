//! Parley Core - conversation engine
//!
//! This crate turns one user request into an ordered sequence of step records:
//! - Supervisor: pluggable source of thoughts and the final answer
//! - Session: the per-request state machine that replays thoughts and answers
//! - Reply: the keyword decision table used by the mock supervisors
//! - Trace: the shared buffer of agent handoffs and its display relabeling

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod relabel;
pub mod reply;
pub mod session;
pub mod step;
pub mod supervisor;
pub mod trace;

pub use error::{Error, Result};
pub use parley_logs::TraceEntry;
pub use relabel::{RelabelPolicy, RelabelScope};
pub use reply::{classify, reply_for, Category, Predicate, ReplyRule, REPLY_RULES};
pub use session::{ConversationSession, ConversationState, Pacing};
pub use step::{StepKind, StepRecord};
pub use supervisor::{
    LogReplaySupervisor, ScriptedSupervisor, Supervisor, SupervisorKind, Thought, DEFAULT_THOUGHTS,
};
pub use trace::TraceBuffer;
