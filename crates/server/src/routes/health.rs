//! Health and readiness endpoints.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    /// Seconds since startup.
    pub uptime: f64,
    pub database: &'static str,
    pub cloudinary: &'static str,
    pub environment: String,
}

async fn database_reachable(state: &AppState) -> bool {
    sqlx::query("SELECT 1").fetch_one(state.pool()).await.is_ok()
}

/// Health report with dependency status. Always 200 so that the hosting
/// platform can tell a slow database from a dead process.
///
/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let (database, cloudinary) = tokio::join!(database_reachable(&state), state.media().ping());

    Json(HealthReport {
        status: "OK",
        timestamp: Utc::now(),
        uptime: state.uptime_secs(),
        database: if database { "connected" } else { "disconnected" },
        cloudinary: cloudinary.as_str(),
        environment: state.config().app_env.clone(),
    })
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if database_reachable(&state).await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
