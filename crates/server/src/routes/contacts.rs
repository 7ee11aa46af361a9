//! Contact form and admin inbox handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use tracing::instrument;

use royal_trust_core::ContactId;

use super::{JsonBody, parse_id};
use crate::db::ContactRepository;
use crate::error::{AppError, Result};
use crate::models::{ContactInput, ContactMessage};
use crate::state::AppState;

/// Store a contact form message.
///
/// POST /api/frontend/contact
#[instrument(skip(state, input))]
pub async fn submit(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ContactInput>,
) -> Result<Json<Value>> {
    let message = input.into_new()?;
    let message = ContactRepository::new(state.pool()).create(&message).await?;
    tracing::info!(contact_id = %message.id, "Contact message received");

    Ok(Json(json!({
        "success": true,
        "message": "আপনার বার্তা পাঠানো হয়েছে। শীঘ্রই যোগাযোগ করা হবে।",
    })))
}

/// GET /api/admin/contacts
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ContactMessage>>> {
    Ok(Json(ContactRepository::new(state.pool()).list().await?))
}

/// PUT /api/admin/contacts/{id}/read
#[instrument(skip(state))]
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let id: ContactId = parse_id(&id, "Message")?;
    let message = ContactRepository::new(state.pool())
        .mark_read(id)
        .await?
        .ok_or_else(|| AppError::not_found("Message"))?;

    Ok(Json(json!({ "success": true, "contact": message })))
}

/// DELETE /api/admin/contacts/{id}
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    let id: ContactId = parse_id(&id, "Message")?;
    if !ContactRepository::new(state.pool()).delete(id).await? {
        return Err(AppError::not_found("Message"));
    }

    Ok(Json(json!({ "success": true, "message": "Message deleted" })))
}
