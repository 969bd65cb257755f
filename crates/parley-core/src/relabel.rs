//! Display relabeling of the reserved agent name
//!
//! The agent framework logs the human side of the conversation under a
//! reserved agent name (`Checker`); the visualization shows it as `User`.
//! Two code paths disagree on where the rename happens, so the scope is
//! configurable.

use serde::{Deserialize, Serialize};

use parley_logs::TraceEntry;

/// Default reserved agent name
pub const DEFAULT_SENTINEL: &str = "Checker";

/// Default label shown in place of the sentinel
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Where the rename is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelabelScope {
    /// Query endpoints and streamed thoughts
    #[default]
    Everywhere,
    /// Query endpoints only; streamed thoughts keep raw names
    QueriesOnly,
    /// Never rename
    Never,
}

/// Rename rule for trace entries leaving the process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelabelPolicy {
    sentinel: String,
    display_name: String,
    scope: RelabelScope,
}

impl RelabelPolicy {
    /// Create a policy
    pub fn new(
        sentinel: impl Into<String>,
        display_name: impl Into<String>,
        scope: RelabelScope,
    ) -> Self {
        Self {
            sentinel: sentinel.into(),
            display_name: display_name.into(),
            scope,
        }
    }

    /// Policy that leaves every name untouched
    pub fn disabled() -> Self {
        Self::new(DEFAULT_SENTINEL, DEFAULT_DISPLAY_NAME, RelabelScope::Never)
    }

    /// Configured scope
    pub fn scope(&self) -> RelabelScope {
        self.scope
    }

    /// Apply the policy for a query endpoint
    pub fn for_query(&self, entry: TraceEntry) -> TraceEntry {
        match self.scope {
            RelabelScope::Everywhere | RelabelScope::QueriesOnly => self.rename(entry),
            RelabelScope::Never => entry,
        }
    }

    /// Apply the policy for a trace entry attached to a streamed step
    pub fn for_stream(&self, entry: TraceEntry) -> TraceEntry {
        match self.scope {
            RelabelScope::Everywhere => self.rename(entry),
            RelabelScope::QueriesOnly | RelabelScope::Never => entry,
        }
    }

    fn rename(&self, entry: TraceEntry) -> TraceEntry {
        entry.rename_agent(&self.sentinel, &self.display_name)
    }
}

impl Default for RelabelPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SENTINEL, DEFAULT_DISPLAY_NAME, RelabelScope::default())
    }
}
