//! Web API module for Parley
//!
//! Provides REST API endpoints for:
//! - Health checks
//! - Login and logout
//! - Communication trace queries

pub mod auth;
pub mod communication;
pub mod health;

use axum::Router;

pub use auth::auth_routes;
pub use communication::{communication_routes, CommunicationState};
pub use health::health_routes;

/// Create the API router with all endpoints
pub fn api_router(service_name: String, communication: CommunicationState) -> Router {
    Router::new()
        .merge(health_routes(service_name))
        .merge(auth_routes())
        .merge(communication_routes(communication))
}
