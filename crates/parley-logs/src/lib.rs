//! Parley Logs - agent-step log extraction
//!
//! The external agent framework writes one step per record, records separated
//! by a literal `----` line. Each record is the Python repr of a
//! `((), {agent: {...}})` tuple, quoted and escaped inconsistently. This crate
//! scrapes two things out of a record:
//! - Thoughts: the human-readable message of the step (`thought`)
//! - Handoffs: a `{caller, talkto, message}` trace entry (`handoff`)
//!
//! Both extractors are ordered lists of independent matchers. The first
//! matcher that captures something wins, so the order resolves ambiguity.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod entry;
pub mod error;
pub mod handoff;
mod patterns;
pub mod source;
pub mod thought;

pub use entry::TraceEntry;
pub use error::{Error, Result};
pub use handoff::{extract_handoff, is_internal_step};
pub use source::{load_records, parse_records, split_records, LogRecord, RECORD_DELIMITER};
pub use thought::extract_thought;
