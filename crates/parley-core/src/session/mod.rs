//! Conversation session
//!
//! Drives one user request through `Idle → Thoughts → FinalAnswer → Idle`,
//! with `Error` reachable from any point. Steps are produced lazily: the
//! caller pulls them from the returned stream, and nothing past a terminal
//! step is ever produced.

use futures::future::FutureExt;
use futures::stream::{self, BoxStream, StreamExt};
use rand::Rng;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::relabel::RelabelPolicy;
use crate::step::StepRecord;
use crate::supervisor::{Supervisor, Thought};
use crate::trace::TraceBuffer;

/// Delay between shown steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pacing {
    /// Fixed delay after each shown thought
    pub thought_delay: Duration,
    /// Upper bound of a random extra delay
    pub jitter: Duration,
}

impl Pacing {
    /// Pacing with a fixed delay and no jitter
    pub fn fixed(thought_delay: Duration) -> Self {
        Self {
            thought_delay,
            jitter: Duration::ZERO,
        }
    }

    /// No delay at all
    pub fn none() -> Self {
        Self::default()
    }

    fn next_delay(&self) -> Duration {
        if self.jitter.is_zero() {
            return self.thought_delay;
        }
        let extra = rand::thread_rng().gen_range(0..=self.jitter.as_millis() as u64);
        self.thought_delay + Duration::from_millis(extra)
    }
}

/// Per-conversation state: the trace being built and the replay position
#[derive(Debug)]
pub struct ConversationState {
    trace: Arc<TraceBuffer>,
    cursor: usize,
}

impl ConversationState {
    /// State writing to `trace`
    pub fn new(trace: Arc<TraceBuffer>) -> Self {
        Self { trace, cursor: 0 }
    }

    /// Trace buffer of this conversation
    pub fn trace(&self) -> &Arc<TraceBuffer> {
        &self.trace
    }

    /// Number of thoughts replayed so far in the current request
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    async fn reset(&mut self) {
        self.trace.clear().await;
        self.cursor = 0;
    }
}

/// Orchestrates requests against one supervisor
pub struct ConversationSession {
    supervisor: Arc<dyn Supervisor>,
    state: ConversationState,
    pacing: Pacing,
    relabel: RelabelPolicy,
}

impl ConversationSession {
    /// Session over `supervisor`, recording handoffs into `trace`
    pub fn new(supervisor: Arc<dyn Supervisor>, trace: Arc<TraceBuffer>) -> Self {
        Self {
            supervisor,
            state: ConversationState::new(trace),
            pacing: Pacing::none(),
            relabel: RelabelPolicy::default(),
        }
    }

    /// Set thought pacing
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Set the relabel policy for trace entries attached to thoughts
    pub fn with_relabel(mut self, relabel: RelabelPolicy) -> Self {
        self.relabel = relabel;
        self
    }

    /// Name of the supervisor
    pub fn supervisor_name(&self) -> &str {
        self.supervisor.name()
    }

    /// Conversation state
    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Run one request.
    ///
    /// The trace is cleared before the supervisor is consulted. Thought steps
    /// are only produced when `show_thoughts` is set, but their handoffs are
    /// recorded either way. The stream ends after the final answer or after
    /// the first error step.
    pub fn process(&mut self, user_text: &str, show_thoughts: bool) -> BoxStream<'_, StepRecord> {
        let run = Run {
            supervisor: self.supervisor.clone(),
            state: &mut self.state,
            pacing: &self.pacing,
            relabel: &self.relabel,
            user_text: user_text.to_string(),
            show_thoughts,
            shown: 0,
            phase: Phase::Start,
        };
        stream::unfold(run, |mut run| async move {
            let step = run.next_step().await?;
            Some((step, run))
        })
        .boxed()
    }
}

enum Phase {
    Start,
    Thoughts(Vec<Thought>),
    Answer,
    Done,
}

struct Run<'a> {
    supervisor: Arc<dyn Supervisor>,
    state: &'a mut ConversationState,
    pacing: &'a Pacing,
    relabel: &'a RelabelPolicy,
    user_text: String,
    show_thoughts: bool,
    shown: usize,
    phase: Phase,
}

impl Run<'_> {
    async fn next_step(&mut self) -> Option<StepRecord> {
        loop {
            match std::mem::replace(&mut self.phase, Phase::Done) {
                Phase::Start => {
                    self.state.reset().await;
                    match guarded(self.supervisor.thoughts(&self.user_text)).await {
                        Ok(thoughts) => {
                            debug!(
                                supervisor = self.supervisor.name(),
                                thoughts = thoughts.len(),
                                "Starting request"
                            );
                            self.phase = Phase::Thoughts(thoughts);
                        }
                        Err(e) => return Some(self.fail(e)),
                    }
                }
                Phase::Thoughts(thoughts) => {
                    let total = thoughts.len();
                    let Some(thought) = thoughts.get(self.state.cursor).cloned() else {
                        self.phase = Phase::Answer;
                        continue;
                    };
                    self.state.cursor += 1;
                    let index = self.state.cursor;
                    self.phase = Phase::Thoughts(thoughts);

                    if let Some(handoff) = &thought.handoff {
                        self.state.trace.push(handoff.clone()).await;
                    }
                    if !self.show_thoughts {
                        continue;
                    }

                    self.pause().await;
                    self.shown += 1;
                    let trace_entry = thought.handoff.map(|h| self.relabel.for_stream(h));
                    return Some(StepRecord::thought(thought.content, index, total, trace_entry));
                }
                Phase::Answer => {
                    self.pause().await;
                    return Some(match guarded(self.supervisor.answer(&self.user_text)).await {
                        Ok(answer) => StepRecord::final_answer(answer),
                        Err(e) => self.fail(e),
                    });
                }
                Phase::Done => return None,
            }
        }
    }

    async fn pause(&self) {
        if self.shown > 0 {
            tokio::time::sleep(self.pacing.next_delay()).await;
        }
    }

    fn fail(&mut self, e: Error) -> StepRecord {
        error!(supervisor = self.supervisor.name(), "Request failed: {}", e);
        self.phase = Phase::Done;
        StepRecord::error(format!("Error processing message: {}", e))
    }
}

/// Await a supervisor call, turning a panic into an error.
async fn guarded<T, F>(call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match AssertUnwindSafe(call).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(Error::Internal(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("supervisor panicked: {}", msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("supervisor panicked: {}", msg)
    } else {
        "supervisor panicked".to_string()
    }
}

#[cfg(test)]
mod tests;
