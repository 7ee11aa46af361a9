//! Admin login and logout.

use axum::{Json, extract::State};
use chrono::Utc;
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;

use super::JsonBody;
use crate::error::Result;
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::models::{CurrentAdmin, LoginRequest};
use crate::services::AuthService;
use crate::state::AppState;

/// Log the admin in and start a session.
///
/// POST /api/admin/login
#[instrument(skip(state, session, request), fields(username = %request.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<Value>> {
    let auth = AuthService::new(state.pool(), &state.config().admin);
    let admin = auth
        .login(request.username.trim(), &request.password)
        .await?;

    let current = CurrentAdmin {
        id: admin.id,
        username: admin.username,
        logged_in_at: Utc::now(),
    };
    set_current_admin(&session, &current).await?;
    tracing::info!(admin_id = %current.id, "Admin logged in");

    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
        "username": current.username,
    })))
}

/// End the admin session.
///
/// POST /api/admin/logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<Value>> {
    clear_current_admin(&session).await?;
    Ok(Json(json!({ "success": true, "message": "Logged out" })))
}

