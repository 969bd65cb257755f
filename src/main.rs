//! Parley - streaming chat gateway
//!
//! CLI entry point for the Parley server.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod cli;
mod middleware;
mod server;
mod websocket;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Held for the process lifetime so buffered file logs are flushed on exit
    let _guard = init_tracing();

    let cli = cli::Cli::parse();
    debug!(?cli, "Parsed command line");

    cli::run(cli).await
}

fn init_tracing() -> Option<WorkerGuard> {
    let log_dir = server::load_config()
        .ok()
        .and_then(|config| config.logging.directory);

    let (file_layer, guard) = match &log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "parley.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "parley=info,parley_core=info,parley_logs=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    if let Some(dir) = log_dir {
        info!("Writing logs to {}", dir.display());
    }
    guard
}
