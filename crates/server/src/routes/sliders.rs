//! Hero slider route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use tracing::instrument;

use royal_trust_core::SliderId;

use super::{JsonBody, parse_id};
use crate::db::SliderRepository;
use crate::error::{AppError, Result};
use crate::models::{Slider, SliderInput};
use crate::state::AppState;

const SLIDER_IMAGE_FOLDER: &str = "sliders";

/// Upload the slider's attached image, if any.
async fn upload_image(state: &AppState, input: &mut SliderInput) -> Result<Option<String>> {
    match input.take_image_file() {
        Some(data_uri) => Ok(Some(
            state
                .media()
                .upload_data_uri(&data_uri, SLIDER_IMAGE_FOLDER)
                .await?,
        )),
        None => Ok(None),
    }
}

/// Active sliders in slide order.
///
/// GET /api/frontend/sliders
#[instrument(skip(state))]
pub async fn list_active(State(state): State<AppState>) -> Result<Json<Vec<Slider>>> {
    Ok(Json(SliderRepository::new(state.pool()).list_active().await?))
}

/// GET /api/admin/sliders
#[instrument(skip(state))]
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Slider>>> {
    Ok(Json(SliderRepository::new(state.pool()).list_all().await?))
}

/// POST /api/admin/sliders
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(mut input): JsonBody<SliderInput>,
) -> Result<Json<Value>> {
    let uploaded = upload_image(&state, &mut input).await?;
    let slider = input.into_new(uploaded)?;

    let slider = SliderRepository::new(state.pool()).create(&slider).await?;
    tracing::info!(slider_id = %slider.id, slide_number = slider.slide_number, "Slider created");

    Ok(Json(json!({
        "success": true,
        "message": "স্লাইডার যোগ করা হয়েছে",
        "slider": slider,
    })))
}

/// PUT /api/admin/sliders/{id}
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(mut input): JsonBody<SliderInput>,
) -> Result<Json<Value>> {
    let id: SliderId = parse_id(&id, "Slider")?;
    let uploaded = upload_image(&state, &mut input).await?;
    let update = input.into_update(uploaded)?;

    let slider = SliderRepository::new(state.pool())
        .update(id, &update)
        .await?
        .ok_or_else(|| AppError::not_found("Slider"))?;
    tracing::info!(slider_id = %slider.id, "Slider updated");

    Ok(Json(json!({
        "success": true,
        "message": "স্লাইডার আপডেট হয়েছে",
        "slider": slider,
    })))
}

/// DELETE /api/admin/sliders/{id}
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    let id: SliderId = parse_id(&id, "Slider")?;
    if !SliderRepository::new(state.pool()).delete(id).await? {
        return Err(AppError::not_found("Slider"));
    }
    tracing::info!(slider_id = %id, "Slider deleted");

    Ok(Json(json!({ "success": true, "message": "Slider deleted" })))
}
