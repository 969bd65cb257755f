//! Handoff extraction
//!
//! Reads the `{caller, talkto, messages}` shape of a record and turns it into a
//! [`TraceEntry`]. Records that describe tool calls or raw model output are
//! intra-agent processing and never count as handoffs.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::trace;

use crate::entry::TraceEntry;
use crate::patterns::{first_match, first_quoted, list_body, Matcher, TAGGED_MESSAGE_ATTEMPTS};

/// Message used when a handoff carries nothing readable.
pub const PLACEHOLDER_MESSAGE: &str = "Processing request...";

/// Substrings marking a record as internal processing rather than a handoff.
pub const INTERNAL_MARKERS: [&str; 3] = ["tool_calls", "ToolMessage(", "AIMessage("];

// ((), {'Agent': {'caller': C, 'talkto': T, 'messages': [ ...
static TALKTO_THEN_MESSAGES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\(\(\)\s*,\s*\{'([^']+)':\s*\{'caller':\s*'([^']+)',\s*'talkto':\s*'([^']+)',\s*'messages':\s*\[",
    )
    .expect("TALKTO_THEN_MESSAGES is a compile-time constant")
});

// ((), {'Agent': {'caller': C, 'messages': [...], 'talkto': T
static MESSAGES_THEN_TALKTO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)\(\(\)\s*,\s*\{'([^']+)':\s*\{'caller':\s*'([^']+)',\s*'messages':\s*\[(.*?)\]\s*,\s*'talkto':\s*'([^']+)'",
    )
    .expect("MESSAGES_THEN_TALKTO is a compile-time constant")
});

// ((), {'Agent': {'caller': C, 'talkto': T, 'messages': 'plain string'
static PLAIN_STRING_MESSAGES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\(\(\)\s*,\s*\{'([^']+)':\s*\{'caller':\s*'([^']+)',\s*'talkto':\s*'([^']+)',\s*'messages':\s*('(?:[^'\\]|\\.)*')",
    )
    .expect("PLAIN_STRING_MESSAGES is a compile-time constant")
});

/// Fields captured by one record shape; `messages` is the raw field value
/// without its enclosing brackets.
#[derive(Debug)]
struct Shape<'a> {
    agent: &'a str,
    caller: &'a str,
    talkto: &'a str,
    messages: &'a str,
}

type ShapeMatcher = for<'a> fn(&'a str) -> Option<Shape<'a>>;

/// Record shapes in priority order.
const SHAPES: [ShapeMatcher; 3] = [talkto_then_messages, messages_then_talkto, plain_string_messages];

/// Attempts run against the `messages` value of a matched shape.
const MESSAGE_ATTEMPTS: [Matcher; 4] = [
    TAGGED_MESSAGE_ATTEMPTS[0],
    TAGGED_MESSAGE_ATTEMPTS[1],
    TAGGED_MESSAGE_ATTEMPTS[2],
    first_quoted,
];

fn group<'a>(caps: &Captures<'a>, index: usize) -> Option<&'a str> {
    caps.get(index).map(|m| m.as_str())
}

fn talkto_then_messages(record: &str) -> Option<Shape<'_>> {
    let caps = TALKTO_THEN_MESSAGES.captures(record)?;
    let end = caps.get(0)?.end();
    Some(Shape {
        agent: group(&caps, 1)?,
        caller: group(&caps, 2)?,
        talkto: group(&caps, 3)?,
        messages: list_body(&record[end..]),
    })
}

fn messages_then_talkto(record: &str) -> Option<Shape<'_>> {
    let caps = MESSAGES_THEN_TALKTO.captures(record)?;
    Some(Shape {
        agent: group(&caps, 1)?,
        caller: group(&caps, 2)?,
        messages: group(&caps, 3)?,
        talkto: group(&caps, 4)?,
    })
}

fn plain_string_messages(record: &str) -> Option<Shape<'_>> {
    let caps = PLAIN_STRING_MESSAGES.captures(record)?;
    Some(Shape {
        agent: group(&caps, 1)?,
        caller: group(&caps, 2)?,
        talkto: group(&caps, 3)?,
        messages: group(&caps, 4)?,
    })
}

/// Whether the record is a tool call or raw model output.
pub fn is_internal_step(record: &str) -> bool {
    INTERNAL_MARKERS.iter().any(|marker| record.contains(marker))
}

/// Extract the handoff described by a record.
///
/// The entry is stamped with the extraction time.
pub fn extract_handoff(record: &str) -> Option<TraceEntry> {
    if is_internal_step(record) {
        return None;
    }
    let shape = SHAPES.iter().find_map(|shape| shape(record))?;
    trace!(agent = shape.agent, caller = shape.caller, talkto = shape.talkto, "Matched handoff");

    let message = first_match(&MESSAGE_ATTEMPTS, shape.messages)
        .unwrap_or_else(|| PLACEHOLDER_MESSAGE.to_string());
    Some(TraceEntry::new(shape.caller, shape.talkto, message))
}

#[cfg(test)]
mod tests;
