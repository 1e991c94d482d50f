//! Health check handlers.

use axum::Json;
use serde::Serialize;

/// Root response.
#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
}

/// Root endpoint, doubles as a liveness probe.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "AdForge video generator API".to_string(),
        status: "healthy".to_string(),
    })
}

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: ServiceStatuses,
}

#[derive(Serialize)]
pub struct ServiceStatuses {
    pub script_generation: String,
    pub video_generation: String,
    pub tts: String,
}

/// Detailed health check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services: ServiceStatuses {
            script_generation: "ready".to_string(),
            video_generation: "ready".to_string(),
            tts: "ready".to_string(),
        },
    })
}
