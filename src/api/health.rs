//! Health check endpoint
//!
//! `/health` is public so load balancers can probe it without a session.

use axum::response::Json;
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub service: String,
}

async fn health_check(service: String) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        service,
    })
}

/// Create health routes reporting `service_name`
pub fn health_routes(service_name: String) -> Router {
    Router::new().route("/health", get(move || health_check(service_name.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_response() {
        let Json(resp) = health_check("parley".to_string()).await;
        assert_eq!(resp.status, "healthy");
        assert_eq!(resp.service, "parley");

        let json = serde_json::to_value(&resp).unwrap();
        assert!(json["timestamp"].is_string());
    }
}
