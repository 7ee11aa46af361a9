//! Admin dashboard handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::{DashboardRepository, DashboardStats};
use crate::error::Result;
use crate::state::AppState;

/// GET /api/admin/dashboard/stats
#[instrument(skip(state))]
pub async fn stats(State(state): State<AppState>) -> Result<Json<DashboardStats>> {
    Ok(Json(DashboardRepository::new(state.pool()).stats().await?))
}
