//! Error types for parley-core

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// User message was empty after trimming
    #[error("message is empty")]
    EmptyMessage,

    /// Supervisor failed while producing a step
    #[error("supervisor error: {0}")]
    Supervisor(String),

    /// Log source could not be read
    #[error("log error: {0}")]
    Logs(#[from] parley_logs::Error),

    /// Internal error (panics, invariant violations)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
