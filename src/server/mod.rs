//! Server module for Parley
//!
//! Contains the main server initialization and runtime logic.
//!
//! # Module Structure
//!
//! - `config`: Configuration structures for all server components
//! - `loader`: Configuration loading from files and environment
//! - `validation`: Startup configuration checks
//! - `shutdown`: Signal handling for graceful shutdown
//! - `init`: Builders and the main run loop

pub mod config;
mod init;
mod loader;
mod shutdown;
mod validation;

// Re-export public API
pub use init::run;
pub use loader::{environment_name, load_config};
pub use validation::validate_config;
