//! Health check handlers.

use axum::Json;
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
}

fn health_of(service: &str) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: service.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Auth service health.
pub async fn auth_health() -> Json<HealthResponse> {
    health_of("auth")
}

/// Billing service health.
pub async fn billing_health() -> Json<HealthResponse> {
    health_of("billing")
}

/// Order service health.
pub async fn order_health() -> Json<HealthResponse> {
    health_of("order")
}
