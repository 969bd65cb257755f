//! Log file loading
//!
//! Splits a log blob into records and runs both extractors over each one.

use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

use crate::entry::TraceEntry;
use crate::error::{Error, Result};
use crate::handoff::extract_handoff;
use crate::thought::extract_thought;

/// Literal separator between records.
pub const RECORD_DELIMITER: &str = "----";

/// What the extractors found in one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Thought text, when the record has one
    pub thought: Option<String>,
    /// Handoff described by the same record
    pub handoff: Option<TraceEntry>,
}

/// Split a blob on [`RECORD_DELIMITER`], trimming and dropping empty records.
pub fn split_records(text: &str) -> impl Iterator<Item = &str> {
    text.split(RECORD_DELIMITER)
        .map(str::trim)
        .filter(|record| !record.is_empty())
}

/// Run both extractors over every record, keeping records where either matched.
pub fn parse_records(text: &str) -> Vec<LogRecord> {
    let mut skipped = 0usize;
    let records: Vec<LogRecord> = split_records(text)
        .filter_map(|raw| {
            let record = LogRecord {
                thought: extract_thought(raw),
                handoff: extract_handoff(raw),
            };
            if record.thought.is_none() && record.handoff.is_none() {
                skipped += 1;
                None
            } else {
                Some(record)
            }
        })
        .collect();
    debug!(parsed = records.len(), skipped, "Parsed log records");
    records
}

/// Read and parse a log file.
///
/// A missing file is not an error: it reads as an empty log.
pub async fn load_records(path: &Path) -> Result<Vec<LogRecord>> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(parse_records(&text)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Log file {} not found, using empty log", path.display());
            Ok(Vec::new())
        }
        Err(source) => Err(Error::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
