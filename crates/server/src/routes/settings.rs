//! Site settings handlers. The storefront and the admin panel read the same
//! row; only the admin can change it.

use axum::{Json, extract::State};
use serde_json::{Value, json};
use tracing::instrument;

use super::JsonBody;
use crate::db::SettingsRepository;
use crate::error::Result;
use crate::models::{SettingsUpdate, WebsiteSettings};
use crate::state::AppState;

/// Read the settings, creating the defaults on first use.
///
/// GET /api/frontend/settings, GET /api/admin/settings
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<WebsiteSettings>> {
    Ok(Json(SettingsRepository::new(state.pool()).get_or_create().await?))
}

/// PUT /api/admin/settings
#[instrument(skip(state, update))]
pub async fn update(
    State(state): State<AppState>,
    JsonBody(update): JsonBody<SettingsUpdate>,
) -> Result<Json<Value>> {
    let update = update.validate()?;
    let settings = SettingsRepository::new(state.pool()).update(&update).await?;
    tracing::info!("Website settings updated");

    Ok(Json(json!({ "success": true, "settings": settings })))
}
