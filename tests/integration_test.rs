//! Integration tests for Parley
//!
//! These tests drive the library crates together:
//! - parley-logs: record splitting and extraction from a log file
//! - parley-core: supervisor replay, session state machine and trace buffer

use futures::StreamExt;
use parley_core::{
    ConversationSession, LogReplaySupervisor, RelabelPolicy, RelabelScope, StepKind, StepRecord,
    TraceBuffer,
};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

const AGENT_LOG: &str = r"((), {'Checker': {'caller': 'Checker', 'talkto': 'Supervisor', 'messages': [HumanMessage(content='Create an OCh service from 203_WANHE to 204_LIWAN', additional_kwargs={}, response_metadata={})]}})
----
((), {'Supervisor': {'caller': 'Supervisor', 'talkto': 'NBI Agent', 'messages': [HumanMessage(content='Resolve node names to UUIDs', additional_kwargs={})]}})
----
((), {'NBI Agent': {'caller': 'NBI Agent', 'tool_calls': [{'name': 'lookup'}]}})
----
(('NBI Agent',), {'tools': {'messages': ['nested step']}})
----

----
((), {'NBI Agent': {'caller': 'NBI Agent', 'messages': [HumanMessage(content='UUIDs resolved')], 'talkto': 'Supervisor'}})
----
((), {'Supervisor': {'caller': 'Supervisor', 'talkto': 'Checker', 'messages': 'The OCh service has been created'}})
";

fn log_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(AGENT_LOG.as_bytes()).unwrap();
    file
}

fn session_for(file: &NamedTempFile) -> ConversationSession {
    ConversationSession::new(
        Arc::new(LogReplaySupervisor::new(file.path())),
        Arc::new(TraceBuffer::new()),
    )
}

async fn run(session: &mut ConversationSession, text: &str, show: bool) -> Vec<StepRecord> {
    session.process(text, show).collect().await
}

// ============================================================================
// Extraction
// ============================================================================

#[tokio::test]
async fn test_log_records_extracted() {
    let file = log_file();
    let records = parley_logs::load_records(file.path()).await.unwrap();

    let thoughts: Vec<&str> = records.iter().filter_map(|r| r.thought.as_deref()).collect();
    assert_eq!(
        thoughts,
        vec![
            "Create an OCh service from 203_WANHE to 204_LIWAN",
            "Resolve node names to UUIDs",
            "UUIDs resolved",
            "The OCh service has been created",
        ]
    );

    let handoffs: Vec<(String, String)> = records
        .iter()
        .filter_map(|r| r.handoff.as_ref())
        .map(|e| (e.caller.clone(), e.talkto.clone()))
        .collect();
    assert_eq!(handoffs.len(), 4);
    assert_eq!(handoffs[2], ("NBI Agent".to_string(), "Supervisor".to_string()));
}

// ============================================================================
// Replay through a session
// ============================================================================

#[tokio::test]
async fn test_replay_with_thoughts() {
    let file = log_file();
    let mut session = session_for(&file);

    let steps = run(&mut session, "create an OCh", true).await;

    assert_eq!(steps.len(), 5);
    for (i, step) in steps[..4].iter().enumerate() {
        assert_eq!(step.kind, StepKind::Thought);
        assert_eq!(step.sequence_index, Some(i + 1));
        assert_eq!(step.total_steps, Some(4));
        assert!(step.trace_entry.is_some());
    }
    assert_eq!(steps[4].kind, StepKind::FinalAnswer);

    // Streamed entries are relabeled, the buffer keeps raw names
    assert_eq!(steps[0].trace_entry.as_ref().unwrap().caller, "User");
    let trace = session.state().trace().snapshot().await;
    assert_eq!(trace.len(), 4);
    assert_eq!(trace[0].caller, "Checker");
    assert_eq!(trace[3].talkto, "Checker");
}

#[tokio::test]
async fn test_replay_hidden_thoughts_still_traces() {
    let file = log_file();
    let mut session = session_for(&file);

    let steps = run(&mut session, "hello", false).await;

    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].kind, StepKind::FinalAnswer);
    assert!(steps[0].content.starts_with("Hello!"));
    assert_eq!(session.state().trace().len().await, 4);
}

#[tokio::test]
async fn test_query_relabel_policies() {
    let file = log_file();
    let mut session = session_for(&file);
    run(&mut session, "status", false).await;
    let trace = session.state().trace().snapshot().await;

    let everywhere = RelabelPolicy::default();
    let queries_only = RelabelPolicy::new("Checker", "User", RelabelScope::QueriesOnly);
    let never = RelabelPolicy::new("Checker", "User", RelabelScope::Never);

    assert_eq!(everywhere.for_query(trace[0].clone()).caller, "User");
    assert_eq!(queries_only.for_query(trace[0].clone()).caller, "User");
    assert_eq!(never.for_query(trace[0].clone()).caller, "Checker");
    assert_eq!(everywhere.for_query(trace[1].clone()).caller, "Supervisor");
}

#[tokio::test]
async fn test_missing_log_replays_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = ConversationSession::new(
        Arc::new(LogReplaySupervisor::new(dir.path().join("logs.txt"))),
        Arc::new(TraceBuffer::new()),
    );

    let steps = run(&mut session, "thank you", true).await;

    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].kind, StepKind::FinalAnswer);
    assert!(steps[0].content.starts_with("You're welcome"));
}

#[tokio::test]
async fn test_unreadable_log_is_single_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = ConversationSession::new(
        Arc::new(LogReplaySupervisor::new(dir.path())),
        Arc::new(TraceBuffer::new()),
    );

    let steps = run(&mut session, "hello", true).await;

    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].kind, StepKind::Error);
    assert!(steps[0].content.starts_with("Error processing message:"));
}
