//! Category route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use tracing::instrument;

use royal_trust_core::CategoryId;

use super::{JsonBody, parse_id};
use crate::db::CategoryRepository;
use crate::error::{AppError, Result};
use crate::models::{Category, CategoryInput};
use crate::state::AppState;

/// GET /api/frontend/categories
#[instrument(skip(state))]
pub async fn list_active(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    Ok(Json(CategoryRepository::new(state.pool()).list_active().await?))
}

/// GET /api/admin/categories
#[instrument(skip(state))]
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    Ok(Json(CategoryRepository::new(state.pool()).list_all().await?))
}

/// POST /api/admin/categories
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CategoryInput>,
) -> Result<Json<Value>> {
    let category = input.into_new()?;
    let category = CategoryRepository::new(state.pool()).create(&category).await?;
    tracing::info!(category_id = %category.id, slug = %category.slug, "Category created");

    Ok(Json(json!({ "success": true, "category": category })))
}

/// PUT /api/admin/categories/{id}
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<CategoryInput>,
) -> Result<Json<Value>> {
    let id: CategoryId = parse_id(&id, "Category")?;
    let update = input.into_update()?;
    let category = CategoryRepository::new(state.pool())
        .update(id, &update)
        .await?
        .ok_or_else(|| AppError::not_found("Category"))?;

    Ok(Json(json!({ "success": true, "category": category })))
}

/// DELETE /api/admin/categories/{id}
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    let id: CategoryId = parse_id(&id, "Category")?;
    if !CategoryRepository::new(state.pool()).delete(id).await? {
        return Err(AppError::not_found("Category"));
    }
    tracing::info!(category_id = %id, "Category deleted");

    Ok(Json(json!({ "success": true, "message": "Category deleted" })))
}
