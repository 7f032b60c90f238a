//! Health check endpoints.
//!
//! Provides endpoints for monitoring server health and readiness.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Server status
    pub status: &'static str,
    /// Server version
    pub version: &'static str,
}

/// Liveness probe - server is running
///
/// GET /health/live
async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness probe - server can accept requests
///
/// GET /health/ready
async fn readiness(State(state): State<AppState>) -> Json<ReadinessResponse> {
    // Check database connectivity by counting both record types
    let users = state.db.user_count().ok();
    let videos = state.db.video_count().ok();
    let db_ok = users.is_some() && videos.is_some();

    let status = if db_ok { "ready" } else { "not_ready" };

    Json(ReadinessResponse {
        status,
        database: if db_ok { "connected" } else { "disconnected" },
        users,
        videos,
    })
}

/// Readiness response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: &'static str,
    /// Stored user records, absent when the count failed
    pub users: Option<u64>,
    /// Stored video records, absent when the count failed
    pub videos: Option<u64>,
}

/// Create health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
}
