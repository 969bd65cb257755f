use super::*;
use crate::relabel::RelabelScope;
use crate::step::StepKind;
use crate::supervisor::ScriptedSupervisor;
use async_trait::async_trait;
use parley_logs::TraceEntry;

struct HandoffSupervisor;

#[async_trait]
impl Supervisor for HandoffSupervisor {
    fn name(&self) -> &str {
        "handoff"
    }

    async fn thoughts(&self, _user_text: &str) -> Result<Vec<Thought>> {
        Ok(vec![
            Thought::new("Create an OCh")
                .with_handoff(TraceEntry::new("Checker", "Supervisor", "Create an OCh")),
            Thought::new("Checking the inventory"),
            Thought::new("Found two endpoints")
                .with_handoff(TraceEntry::new("NBI Agent", "Plan Agent", "uuid-1, uuid-2")),
        ])
    }
}

struct FailingSupervisor;

#[async_trait]
impl Supervisor for FailingSupervisor {
    fn name(&self) -> &str {
        "failing"
    }

    async fn thoughts(&self, _user_text: &str) -> Result<Vec<Thought>> {
        Err(Error::Supervisor("backend unavailable".to_string()))
    }
}

struct FailingAnswerSupervisor;

#[async_trait]
impl Supervisor for FailingAnswerSupervisor {
    fn name(&self) -> &str {
        "failing_answer"
    }

    async fn thoughts(&self, _user_text: &str) -> Result<Vec<Thought>> {
        Ok(vec![Thought::new("one"), Thought::new("two")])
    }

    async fn answer(&self, _user_text: &str) -> Result<String> {
        Err(Error::Supervisor("no answer".to_string()))
    }
}

struct PanickingSupervisor;

#[async_trait]
impl Supervisor for PanickingSupervisor {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn thoughts(&self, _user_text: &str) -> Result<Vec<Thought>> {
        panic!("lost the plot")
    }
}

fn session(supervisor: impl Supervisor + 'static) -> ConversationSession {
    ConversationSession::new(Arc::new(supervisor), Arc::new(TraceBuffer::new()))
}

async fn collect(session: &mut ConversationSession, text: &str, show: bool) -> Vec<StepRecord> {
    session.process(text, show).collect().await
}

#[tokio::test]
async fn test_hidden_thoughts_yield_single_answer() {
    let mut session = session(ScriptedSupervisor::default());
    let steps = collect(&mut session, "hello", false).await;

    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].kind, StepKind::FinalAnswer);
    assert!(steps[0].content.starts_with("Hello!"));
}

#[tokio::test]
async fn test_shown_thoughts_are_numbered_then_answer() {
    let mut session = session(ScriptedSupervisor::default());
    let steps = collect(&mut session, "what is the coverage here", true).await;

    assert_eq!(steps.len(), 5);
    for (i, step) in steps[..4].iter().enumerate() {
        assert_eq!(step.kind, StepKind::Thought);
        assert_eq!(step.sequence_index, Some(i + 1));
        assert_eq!(step.total_steps, Some(4));
    }
    assert_eq!(steps[4].kind, StepKind::FinalAnswer);
    assert_eq!(session.state().cursor(), 4);
}

#[tokio::test]
async fn test_no_thoughts_still_answers() {
    let mut session = session(ScriptedSupervisor::new(vec![]));
    let steps = collect(&mut session, "thanks", true).await;

    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].kind, StepKind::FinalAnswer);
}

#[tokio::test]
async fn test_trace_filled_even_when_hidden() {
    let mut session = session(HandoffSupervisor);
    collect(&mut session, "create an OCh", false).await;

    let trace = session.state().trace().snapshot().await;
    assert_eq!(trace.len(), 2);
    assert_eq!(trace[0].caller, "Checker");
    assert_eq!(trace[1].caller, "NBI Agent");
}

#[tokio::test]
async fn test_trace_reset_per_request() {
    let mut session = session(HandoffSupervisor);
    collect(&mut session, "first", true).await;
    collect(&mut session, "second", true).await;

    assert_eq!(session.state().trace().len().await, 2);
}

#[tokio::test]
async fn test_stream_trace_entries_relabeled() {
    let mut session = session(HandoffSupervisor);
    let steps = collect(&mut session, "create an OCh", true).await;

    let first = steps[0].trace_entry.as_ref().unwrap();
    assert_eq!(first.caller, "User");
    assert!(steps[1].trace_entry.is_none());

    // The buffer keeps raw names; renaming happens on the way out
    let trace = session.state().trace().snapshot().await;
    assert_eq!(trace[0].caller, "Checker");
}

#[tokio::test]
async fn test_queries_only_scope_keeps_stream_raw() {
    let mut session = session(HandoffSupervisor)
        .with_relabel(RelabelPolicy::new("Checker", "User", RelabelScope::QueriesOnly));
    let steps = collect(&mut session, "create an OCh", true).await;

    assert_eq!(steps[0].trace_entry.as_ref().unwrap().caller, "Checker");
}

#[tokio::test]
async fn test_supervisor_failure_yields_single_error() {
    let mut session = session(FailingSupervisor);
    let steps = collect(&mut session, "hello", true).await;

    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].kind, StepKind::Error);
    assert!(steps[0].content.starts_with("Error processing message:"));
    assert!(steps[0].content.contains("backend unavailable"));
}

#[tokio::test]
async fn test_answer_failure_ends_after_thoughts() {
    let mut session = session(FailingAnswerSupervisor);
    let steps = collect(&mut session, "hello", true).await;

    let kinds: Vec<StepKind> = steps.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![StepKind::Thought, StepKind::Thought, StepKind::Error]
    );
}

#[tokio::test]
async fn test_supervisor_panic_becomes_error() {
    let mut session = session(PanickingSupervisor);
    let steps = collect(&mut session, "hello", true).await;

    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].kind, StepKind::Error);
    assert!(steps[0].content.contains("lost the plot"));
}

#[tokio::test]
async fn test_session_usable_after_error() {
    let mut session = session(FailingAnswerSupervisor);
    collect(&mut session, "first", false).await;
    let steps = collect(&mut session, "second", false).await;

    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].kind, StepKind::Error);
}

#[tokio::test(start_paused = true)]
async fn test_pacing_between_shown_steps() {
    let mut session = session(ScriptedSupervisor::new(vec![
        "one".to_string(),
        "two".to_string(),
        "three".to_string(),
    ]))
    .with_pacing(Pacing::fixed(Duration::from_millis(500)));

    let start = tokio::time::Instant::now();
    let steps = collect(&mut session, "hello", true).await;

    assert_eq!(steps.len(), 4);
    assert!(start.elapsed() >= Duration::from_millis(1500));
}

#[tokio::test(start_paused = true)]
async fn test_hidden_thoughts_are_not_paced() {
    let mut session = session(ScriptedSupervisor::default())
        .with_pacing(Pacing::fixed(Duration::from_millis(500)));

    let start = tokio::time::Instant::now();
    collect(&mut session, "hello", false).await;

    assert!(start.elapsed() < Duration::from_millis(500));
}

#[test]
fn test_jitter_bounds() {
    let pacing = Pacing {
        thought_delay: Duration::from_millis(100),
        jitter: Duration::from_millis(50),
    };
    for _ in 0..20 {
        let delay = pacing.next_delay();
        assert!(delay >= Duration::from_millis(100));
        assert!(delay <= Duration::from_millis(150));
    }
}
