//! Product route handlers (storefront catalogue and admin CRUD).

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use royal_trust_core::ProductId;

use super::{JsonBody, parse_id};
use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::{ColorInput, ColorVariant, Product, ProductInput};
use crate::services::MediaService;
use crate::state::AppState;

/// Folder colour photos are uploaded to.
const COLOR_IMAGE_FOLDER: &str = "products/colors";

/// Storefront product filter.
#[derive(Debug, Default, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
}

/// Upload any freshly attached colour photos and finish the variants.
async fn finish_colors(media: &MediaService, colors: Vec<ColorInput>) -> Result<Vec<ColorVariant>> {
    let mut variants = Vec::with_capacity(colors.len());
    for color in colors {
        let uploaded = match color.pending_upload() {
            Some(data_uri) => Some(media.upload_data_uri(data_uri, COLOR_IMAGE_FOLDER).await?),
            None => None,
        };
        variants.push(color.into_variant(uploaded));
    }
    Ok(variants)
}

/// List active products, newest first.
///
/// GET /api/frontend/products
#[instrument(skip(state))]
pub async fn list_active(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>> {
    let category = filter
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let products = ProductRepository::new(state.pool())
        .list_active(category)
        .await?;
    Ok(Json(products))
}

/// Show one active product.
///
/// GET /api/frontend/products/{id}
#[instrument(skip(state))]
pub async fn show_active(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let id: ProductId = parse_id(&id, "Product")?;
    ProductRepository::new(state.pool())
        .get_active(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Product"))
}

/// List every product, newest first.
///
/// GET /api/admin/products
#[instrument(skip(state))]
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    Ok(Json(ProductRepository::new(state.pool()).list_all().await?))
}

/// GET /api/admin/products/{id}
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let id: ProductId = parse_id(&id, "Product")?;
    ProductRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Product"))
}

/// Create a product. Colour photos attached as data URIs are uploaded
/// first.
///
/// POST /api/admin/products
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(mut input): JsonBody<ProductInput>,
) -> Result<Json<Value>> {
    let colors = finish_colors(state.media(), input.colors.take().unwrap_or_default()).await?;
    let product = input.into_new(colors)?;

    let product = ProductRepository::new(state.pool()).create(&product).await?;
    tracing::info!(product_id = %product.id, name = %product.name, "Product created");

    Ok(Json(json!({
        "success": true,
        "message": "পণ্য সফলভাবে যোগ করা হয়েছে",
        "product": product,
    })))
}

/// Partially update a product.
///
/// PUT /api/admin/products/{id}
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(mut input): JsonBody<ProductInput>,
) -> Result<Json<Value>> {
    let id: ProductId = parse_id(&id, "Product")?;
    let repo = ProductRepository::new(state.pool());
    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Product"))?;

    let colors = match input.colors.take() {
        Some(colors) => Some(finish_colors(state.media(), colors).await?),
        None => None,
    };
    let update = input.into_update(colors, &existing)?;

    let product = repo
        .update(id, &update)
        .await?
        .ok_or_else(|| AppError::not_found("Product"))?;
    tracing::info!(product_id = %product.id, "Product updated");

    Ok(Json(json!({
        "success": true,
        "message": "পণ্য আপডেট হয়েছে",
        "product": product,
    })))
}

/// DELETE /api/admin/products/{id}
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    let id: ProductId = parse_id(&id, "Product")?;
    if !ProductRepository::new(state.pool()).delete(id).await? {
        return Err(AppError::not_found("Product"));
    }
    tracing::info!(product_id = %id, "Product deleted");

    Ok(Json(json!({ "success": true, "message": "পণ্য ডিলিট হয়েছে" })))
}
