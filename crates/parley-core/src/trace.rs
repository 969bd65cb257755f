//! Shared trace buffer
//!
//! One buffer per supervisor instance. The session writes to it while
//! replaying a request; query endpoints read snapshots without going through
//! the gateway lock, so readers may see a trace that is mid-request.

use tokio::sync::RwLock;

use parley_logs::TraceEntry;

/// Ordered handoffs of the current conversation
#[derive(Debug, Default)]
pub struct TraceBuffer {
    entries: RwLock<Vec<TraceEntry>>,
}

impl TraceBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handoff
    pub async fn push(&self, entry: TraceEntry) {
        self.entries.write().await.push(entry);
    }

    /// Remove every handoff
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Copy of all handoffs, oldest first
    pub async fn snapshot(&self) -> Vec<TraceEntry> {
        self.entries.read().await.clone()
    }

    /// The last `count` handoffs (oldest first) and the total number held
    pub async fn recent(&self, count: usize) -> (Vec<TraceEntry>, usize) {
        let entries = self.entries.read().await;
        let total = entries.len();
        let start = total.saturating_sub(count);
        (entries[start..].to_vec(), total)
    }

    /// Number of handoffs held
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the buffer is empty
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
