//! `parley parse` - offline extraction
//!
//! Runs the thought and handoff extractors over a log file and prints what
//! they found. A missing file prints a notice and succeeds.

use anyhow::{Context, Result};
use parley_logs::{load_records, LogRecord};
use std::path::Path;

pub async fn run(file: &Path, trace: bool, json: bool) -> Result<()> {
    if !file.exists() {
        println!("Log file {} not found; nothing to extract.", file.display());
        return Ok(());
    }

    let records = load_records(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let output = if trace {
        render_trace(&records, json)?
    } else {
        render_thoughts(&records, json)?
    };
    println!("{}", output);
    Ok(())
}

fn render_thoughts(records: &[LogRecord], json: bool) -> Result<String> {
    let thoughts: Vec<&str> = records.iter().filter_map(|r| r.thought.as_deref()).collect();
    if json {
        return serde_json::to_string_pretty(&thoughts).context("Failed to serialize thoughts");
    }
    if thoughts.is_empty() {
        return Ok("No thoughts found.".to_string());
    }
    Ok(thoughts
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{:>3}. {}", i + 1, t))
        .collect::<Vec<_>>()
        .join("\n"))
}

fn render_trace(records: &[LogRecord], json: bool) -> Result<String> {
    let entries: Vec<_> = records.iter().filter_map(|r| r.handoff.as_ref()).collect();
    if json {
        return serde_json::to_string_pretty(&entries).context("Failed to serialize handoffs");
    }
    if entries.is_empty() {
        return Ok("No handoffs found.".to_string());
    }
    Ok(entries
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{:>3}. {} -> {}: {}", i + 1, e.caller, e.talkto, e.message))
        .collect::<Vec<_>>()
        .join("\n"))
}
