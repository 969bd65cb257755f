//! CLI module for Parley
//!
//! Provides commands:
//! - `serve`: run the chat gateway (default)
//! - `parse`: run the log extractors over a file offline
//! - `check-config`: print the effective configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod config;
pub mod parse;

/// Parley chat gateway CLI
#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(about = "Streaming chat gateway for multi-agent supervisor logs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the server (default)
    Serve,
    /// Extract thoughts or handoffs from a log file
    Parse {
        /// Log file to read
        file: PathBuf,
        /// Print handoffs instead of thoughts
        #[arg(long)]
        trace: bool,
        /// Print JSON instead of numbered text
        #[arg(long)]
        json: bool,
    },
    /// Load, validate and print the configuration (passwords masked)
    CheckConfig,
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        None | Some(Commands::Serve) => crate::server::run().await,
        Some(Commands::Parse { file, trace, json }) => parse::run(&file, trace, json).await,
        Some(Commands::CheckConfig) => config::run(),
    }
}
