//! Review route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use royal_trust_core::ReviewId;

use super::{JsonBody, parse_id};
use crate::db::ReviewRepository;
use crate::error::{AppError, Result};
use crate::models::{Review, ReviewInput};
use crate::state::AppState;

/// Approved reviews shown on the storefront.
const STOREFRONT_REVIEW_LIMIT: i64 = 10;

/// Admin review filter. `approved=true` selects approved reviews; any
/// other value selects pending ones.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewFilter {
    pub approved: Option<String>,
}

impl ReviewFilter {
    fn approved(&self) -> Option<bool> {
        self.approved.as_deref().map(|v| v == "true")
    }
}

/// GET /api/frontend/reviews
#[instrument(skip(state))]
pub async fn list_approved(State(state): State<AppState>) -> Result<Json<Vec<Review>>> {
    let reviews = ReviewRepository::new(state.pool())
        .list_approved(STOREFRONT_REVIEW_LIMIT)
        .await?;
    Ok(Json(reviews))
}

/// Submit a review. It stays hidden until approved.
///
/// POST /api/frontend/review
#[instrument(skip(state, input))]
pub async fn submit(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ReviewInput>,
) -> Result<Json<Value>> {
    let review = input.into_new()?;
    let review = ReviewRepository::new(state.pool()).create(&review).await?;
    tracing::info!(review_id = %review.id, rating = review.rating.get(), "Review submitted");

    Ok(Json(json!({
        "success": true,
        "message": "রিভিউ জমা দেওয়া হয়েছে! এপ্রুভ হলে দেখানো হবে।",
    })))
}

/// GET /api/admin/reviews
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ReviewFilter>,
) -> Result<Json<Vec<Review>>> {
    let reviews = ReviewRepository::new(state.pool())
        .list(filter.approved())
        .await?;
    Ok(Json(reviews))
}

/// PUT /api/admin/reviews/{id}/approve
#[instrument(skip(state))]
pub async fn approve(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    let id: ReviewId = parse_id(&id, "Review")?;
    let review = ReviewRepository::new(state.pool())
        .approve(id)
        .await?
        .ok_or_else(|| AppError::not_found("Review"))?;
    tracing::info!(review_id = %review.id, "Review approved");

    Ok(Json(json!({ "success": true, "review": review })))
}

/// DELETE /api/admin/reviews/{id}
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    let id: ReviewId = parse_id(&id, "Review")?;
    if !ReviewRepository::new(state.pool()).delete(id).await? {
        return Err(AppError::not_found("Review"));
    }
    tracing::info!(review_id = %id, "Review deleted");

    Ok(Json(json!({ "success": true, "message": "Review deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(approved: Option<&str>) -> ReviewFilter {
        ReviewFilter {
            approved: approved.map(str::to_owned),
        }
    }

    #[test]
    fn test_approved_filter() {
        assert_eq!(filter(None).approved(), None);
        assert_eq!(filter(Some("true")).approved(), Some(true));
        assert_eq!(filter(Some("false")).approved(), Some(false));
        assert_eq!(filter(Some("yes")).approved(), Some(false));
        assert_eq!(filter(Some("")).approved(), Some(false));
    }
}
