//! Error types for parley-logs

use std::path::PathBuf;
use thiserror::Error;

/// Log loading error
///
/// Pattern misses are not errors: extractors return `None` for them.
#[derive(Debug, Error)]
pub enum Error {
    /// The log file exists but could not be read
    #[error("failed to read log file {path}: {source}")]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
