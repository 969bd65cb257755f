//! Supervisor that replays a captured agent log

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{Supervisor, Thought};
use crate::error::Result;
use parley_logs::load_records;

/// Replays the thoughts and handoffs of a log file.
///
/// The file is re-read on every request, so it can be swapped while the
/// server runs. A missing file replays as an empty log.
#[derive(Debug, Clone)]
pub struct LogReplaySupervisor {
    path: PathBuf,
}

impl LogReplaySupervisor {
    /// Supervisor reading `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Log file being replayed
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Supervisor for LogReplaySupervisor {
    fn name(&self) -> &str {
        "log_replay"
    }

    async fn thoughts(&self, _user_text: &str) -> Result<Vec<Thought>> {
        let records = load_records(&self.path).await?;
        let thoughts: Vec<Thought> = records
            .into_iter()
            .filter_map(|record| {
                let thought = Thought::new(record.thought?);
                Some(match record.handoff {
                    Some(handoff) => thought.with_handoff(handoff),
                    None => thought,
                })
            })
            .collect();
        debug!(
            "Loaded {} thoughts from {}",
            thoughts.len(),
            self.path.display()
        );
        Ok(thoughts)
    }
}
