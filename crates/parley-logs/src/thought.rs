//! Thought extraction
//!
//! Pulls the human-readable message out of one logged agent step.

use crate::patterns::{
    first_match, first_quoted, is_empty_tuple_record, messages_value, Matcher,
    TAGGED_MESSAGE_ATTEMPTS,
};

/// Attempts run against the `messages` value, in priority order.
const MESSAGE_ATTEMPTS: [Matcher; 4] = [
    TAGGED_MESSAGE_ATTEMPTS[0],
    TAGGED_MESSAGE_ATTEMPTS[1],
    TAGGED_MESSAGE_ATTEMPTS[2],
    first_quoted,
];

/// Extract the thought text of a record.
///
/// Returns `None` unless the record is a `((), {...})` tuple with a
/// `messages` field holding a tagged `HumanMessage` or at least one quoted
/// string.
pub fn extract_thought(record: &str) -> Option<String> {
    if !is_empty_tuple_record(record) {
        return None;
    }
    let messages = messages_value(record)?;
    first_match(&MESSAGE_ATTEMPTS, messages)
}

#[cfg(test)]
mod tests;
