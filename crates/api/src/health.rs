use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::AppState;

/// Current application version from Cargo.toml
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

static SERVER_START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

pub fn mark_server_start() {
    SERVER_START.get_or_init(Instant::now);
}

fn get_uptime() -> Duration {
    SERVER_START.get().map(|start| start.elapsed()).unwrap_or_default()
}

/// Basic liveness check - just returns 200 OK
/// GET /health
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Readiness check - verifies the session store is usable
/// GET /health/ready
pub async fn readiness(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.store.health_check().await {
        Ok(latency_ms) => Ok(Json(json!({
            "status": "ready",
            "uptime_seconds": get_uptime().as_secs(),
            "checks": [{
                "name": "storage",
                "backend": state.store.name(),
                "status": "healthy",
                "latency_ms": latency_ms
            }]
        }))),
        Err(e) => {
            tracing::error!("Storage health check failed: {}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "checks": [{
                        "name": "storage",
                        "backend": state.store.name(),
                        "status": "unhealthy"
                    }]
                })),
            ))
        }
    }
}

/// GET /api/version
pub async fn get_current_version() -> Json<Value> {
    Json(json!({
        "version": CURRENT_VERSION,
        "name": "Cloak"
    }))
}
