//! Coupon route handlers: storefront check and admin CRUD.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::instrument;

use royal_trust_core::CouponId;

use super::{JsonBody, parse_id};
use crate::db::CouponRepository;
use crate::error::{AppError, Result};
use crate::models::{Coupon, CouponCheck, CouponInput, CouponRejection, ValidationError, money};
use crate::models::coupon::normalize_code;
use crate::state::AppState;

/// Result of a successful coupon check.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponQuote {
    pub valid: bool,
    pub code: String,
    pub discount: Decimal,
    pub final_amount: Decimal,
}

impl CouponQuote {
    fn new(code: String, amount: Decimal, discount: Decimal) -> Self {
        Self {
            valid: true,
            code,
            discount,
            final_amount: (amount - discount).max(Decimal::ZERO),
        }
    }
}

/// Check a coupon against an order amount without using it.
///
/// POST /api/frontend/coupon/validate
#[instrument(skip(state, check))]
pub async fn validate(
    State(state): State<AppState>,
    JsonBody(check): JsonBody<CouponCheck>,
) -> Result<Json<CouponQuote>> {
    let code = check
        .code
        .as_deref()
        .map(normalize_code)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ValidationError::required("code"))?;
    let amount = money(
        check
            .amount
            .ok_or_else(|| ValidationError::required("amount"))?,
        "amount",
    )?;

    let coupon = CouponRepository::new(state.pool())
        .get_by_code(&code)
        .await?
        .ok_or(CouponRejection::NotFound)?;
    let discount = coupon.evaluate(amount, Utc::now())?;

    Ok(Json(CouponQuote::new(coupon.code, amount, discount)))
}

/// GET /api/admin/coupons
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Coupon>>> {
    Ok(Json(CouponRepository::new(state.pool()).list().await?))
}

/// POST /api/admin/coupons
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CouponInput>,
) -> Result<Json<Value>> {
    let coupon = input.into_new()?;
    let coupon = CouponRepository::new(state.pool()).create(&coupon).await?;
    tracing::info!(coupon_id = %coupon.id, code = %coupon.code, "Coupon created");

    Ok(Json(json!({ "success": true, "coupon": coupon })))
}

/// PUT /api/admin/coupons/{id}
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<CouponInput>,
) -> Result<Json<Value>> {
    let id: CouponId = parse_id(&id, "Coupon")?;
    let repo = CouponRepository::new(state.pool());
    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Coupon"))?;

    let update = input.into_update(&existing)?;
    let coupon = repo
        .update(id, &update)
        .await?
        .ok_or_else(|| AppError::not_found("Coupon"))?;

    Ok(Json(json!({ "success": true, "coupon": coupon })))
}

/// DELETE /api/admin/coupons/{id}
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    let id: CouponId = parse_id(&id, "Coupon")?;
    if !CouponRepository::new(state.pool()).delete(id).await? {
        return Err(AppError::not_found("Coupon"));
    }
    tracing::info!(coupon_id = %id, "Coupon deleted");

    Ok(Json(json!({ "success": true, "message": "Coupon deleted" })))
}
