//! Server initialization and main run loop
//!
//! Contains the main `run()` function plus the builders it uses, which are
//! also what the router tests start from.

use super::config::{AppConfig, SupervisorConfig};
use super::loader::{environment_name, load_config};
use super::shutdown::wait_for_shutdown_signal;
use super::validation::validate_config;
use crate::api::{api_router, CommunicationState};
use crate::middleware::session::AuthStore;
use crate::websocket::{websocket_router, Gateway};
use anyhow::{Context, Result};
use axum::{routing::get, Extension, Router};
use parley_core::{
    ConversationSession, LogReplaySupervisor, ScriptedSupervisor, Supervisor, SupervisorKind,
    TraceBuffer,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{debug, info};

/// Create the configured supervisor
pub fn build_supervisor(config: &SupervisorConfig) -> Arc<dyn Supervisor> {
    match config.kind {
        SupervisorKind::LogReplay => {
            info!("Replaying agent log from {}", config.log_path.display());
            Arc::new(LogReplaySupervisor::new(&config.log_path))
        }
        SupervisorKind::Scripted => {
            info!("Using {} scripted thoughts", config.thoughts.len());
            Arc::new(ScriptedSupervisor::new(config.thoughts.clone()))
        }
    }
}

/// Create the gateway: one session, one trace buffer, one lock
pub fn build_gateway(config: &AppConfig) -> Arc<Gateway> {
    let relabel = config.trace.relabel_policy();
    let session = ConversationSession::new(
        build_supervisor(&config.supervisor),
        Arc::new(TraceBuffer::new()),
    )
    .with_pacing(config.supervisor.pacing())
    .with_relabel(relabel.clone());

    Arc::new(Gateway::new(session, config.gateway.emit_delay(), relabel))
}

/// Build the main router with all endpoints
pub fn build_router(config: &AppConfig, gateway: Arc<Gateway>, auth_store: Arc<AuthStore>) -> Router {
    let communication = CommunicationState::new(gateway.clone(), config.trace.recent_default);

    let app = Router::new()
        // Health (public), login and trace endpoints (auth applied per-handler via RequireSession)
        .merge(api_router(config.server.service_name.clone(), communication))
        .merge(websocket_router())
        .layer(Extension(gateway))
        .layer(Extension(auth_store))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let static_dir = &config.server.static_dir;
    if static_dir.exists() {
        info!("Serving static files from {}", static_dir.display());
        app.fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true))
    } else {
        debug!("Static directory {} not found", static_dir.display());
        app.route("/", get(|| async { "Parley chat gateway" }))
    }
}

/// Run the server
pub async fn run() -> Result<()> {
    info!("Starting Parley v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config().context("Failed to load configuration")?;
    info!(environment = %environment_name(), "Configuration loaded");

    validate_config(&config).context("Invalid configuration")?;

    let gateway = build_gateway(&config);
    info!(supervisor = %config.supervisor.kind, relabel = ?config.trace.relabel, "Gateway initialized");

    let auth_store = Arc::new(AuthStore::new(config.auth.enabled, config.auth.users.clone()));
    if !config.auth.enabled {
        info!("Authentication disabled");
    }

    let app = build_router(&config, gateway, auth_store);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Parley shutdown complete");
    Ok(())
}
