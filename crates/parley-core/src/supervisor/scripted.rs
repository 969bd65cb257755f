//! Supervisor with a fixed thought list

use async_trait::async_trait;

use super::{Supervisor, Thought};
use crate::error::Result;

/// Thoughts used when none are configured
pub const DEFAULT_THOUGHTS: [&str; 4] = [
    "Analyzing user input...",
    "Understanding the context...",
    "Generating appropriate response...",
    "Finalizing the answer...",
];

/// Replays the same thoughts for every request
#[derive(Debug, Clone)]
pub struct ScriptedSupervisor {
    thoughts: Vec<String>,
}

impl ScriptedSupervisor {
    /// Supervisor with the given thoughts
    pub fn new(thoughts: Vec<String>) -> Self {
        Self { thoughts }
    }
}

impl Default for ScriptedSupervisor {
    fn default() -> Self {
        Self::new(DEFAULT_THOUGHTS.iter().map(|t| t.to_string()).collect())
    }
}

#[async_trait]
impl Supervisor for ScriptedSupervisor {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn thoughts(&self, _user_text: &str) -> Result<Vec<Thought>> {
        Ok(self.thoughts.iter().map(Thought::new).collect())
    }
}
