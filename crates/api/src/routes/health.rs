//! Liveness endpoint.
//!
//! Sits outside `/api` so load balancers and the SPA's startup check can
//! hit it without the accounting routes' tracing noise.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service name.
    pub service: &'static str,
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Health check handler.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "rxledger",
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_payload_names_the_service() {
        let Json(body) = health_check().await;
        assert_eq!(body.service, "rxledger");
        assert_eq!(body.status, "healthy");
        assert!(!body.version.is_empty());
    }
}
