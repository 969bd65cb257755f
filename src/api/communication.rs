//! Communication trace API endpoints
//!
//! GET  /api/communication               - Whole trace, oldest first
//! GET  /api/communication/recent?count= - Most recent entries plus total
//! POST /api/communication/clear         - Empty the trace
//!
//! Reads go straight to the trace buffer and never wait on a running
//! request, so a response may show a trace that is mid-request.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use parley_core::TraceEntry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::middleware::auth::RequireSession;
use crate::websocket::Gateway;

/// Shared state for the trace endpoints
#[derive(Clone)]
pub struct CommunicationState {
    gateway: Arc<Gateway>,
    recent_default: usize,
}

impl CommunicationState {
    pub fn new(gateway: Arc<Gateway>, recent_default: usize) -> Self {
        Self {
            gateway,
            recent_default,
        }
    }
}

/// Query of the most-recent endpoint
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub count: Option<usize>,
}

/// Most recent entries and the number held
#[derive(Debug, Serialize)]
pub struct RecentResponse {
    pub entries: Vec<TraceEntry>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub success: bool,
}

async fn get_trace(
    RequireSession(_user): RequireSession,
    State(state): State<CommunicationState>,
) -> Json<Vec<TraceEntry>> {
    let policy = state.gateway.relabel();
    let entries = state.gateway.trace().snapshot().await;
    Json(entries.into_iter().map(|e| policy.for_query(e)).collect())
}

async fn get_recent(
    RequireSession(_user): RequireSession,
    State(state): State<CommunicationState>,
    Query(query): Query<RecentQuery>,
) -> Json<RecentResponse> {
    let count = query.count.unwrap_or(state.recent_default);
    let policy = state.gateway.relabel();
    let (entries, total) = state.gateway.trace().recent(count).await;
    Json(RecentResponse {
        entries: entries.into_iter().map(|e| policy.for_query(e)).collect(),
        total,
    })
}

async fn clear_trace(
    RequireSession(user): RequireSession,
    State(state): State<CommunicationState>,
) -> Json<ClearResponse> {
    state.gateway.trace().clear().await;
    info!(user = %user.username, "Communication trace cleared");
    Json(ClearResponse { success: true })
}

/// Create communication routes.
pub fn communication_routes(state: CommunicationState) -> Router {
    Router::new()
        .route("/api/communication", get(get_trace))
        .route("/api/communication/recent", get(get_recent))
        .route("/api/communication/clear", post(clear_trace))
        .with_state(state)
}
