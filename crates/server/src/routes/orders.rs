//! Order route handlers: storefront checkout and admin order management.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use royal_trust_core::{OrderId, OrderNumber, OrderStatus};

use super::{JsonBody, parse_id};
use crate::db::{CouponRepository, OrderPricing, OrderRepository, SettingsRepository};
use crate::error::{AppError, Result};
use crate::models::{CouponRejection, Order, OrderInput, OrderStatusUpdate};
use crate::state::AppState;

/// Confirmation shown to the customer.
const ORDER_PLACED_MESSAGE: &str = "অর্ডার সফল হয়েছে!";

/// Response to a placed order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlaced {
    pub success: bool,
    pub message: &'static str,
    pub order_id: OrderNumber,
    pub delivery_charge: Decimal,
    pub discount: Decimal,
    pub total_price: Decimal,
}

/// Admin order filter. `all` or an empty value means no filter.
#[derive(Debug, Default, Deserialize)]
pub struct OrderFilter {
    pub status: Option<String>,
}

impl OrderFilter {
    fn status(&self) -> Result<Option<OrderStatus>> {
        match self.status.as_deref().map(str::trim) {
            None | Some("" | "all") => Ok(None),
            Some(raw) => raw
                .parse::<OrderStatus>()
                .map(Some)
                .map_err(|e| AppError::BadRequest(e.to_string())),
        }
    }
}

/// Place an order.
///
/// The delivery charge comes from the settings and the address. A coupon,
/// when given, must pass every rule or the order is rejected; its discount
/// is subtracted from the total and its usage count is bumped. The shop
/// owner is emailed in the background.
///
/// POST /api/frontend/order
#[instrument(skip(state, input))]
pub async fn submit(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<OrderInput>,
) -> Result<Json<OrderPlaced>> {
    let order = input.into_new()?;

    let settings = SettingsRepository::new(state.pool()).get_or_create().await?;
    let delivery_charge = settings.delivery_charge_for(&order.address);

    let coupons = CouponRepository::new(state.pool());
    let coupon = match order.coupon_code.as_deref() {
        Some(code) => {
            let coupon = coupons
                .get_by_code(code)
                .await?
                .ok_or(CouponRejection::NotFound)?;
            let discount = coupon.evaluate(order.total_price, Utc::now())?;
            Some((coupon, discount))
        }
        None => None,
    };

    let discount = coupon.as_ref().map_or(Decimal::ZERO, |(_, d)| *d);
    let pricing = OrderPricing {
        total_price: (order.total_price - discount).max(Decimal::ZERO),
        delivery_charge,
        discount,
    };

    let number = OrderNumber::generate();
    let applied_code = coupon.as_ref().map(|(c, _)| c.code.as_str());
    let placed = OrderRepository::new(state.pool())
        .create(&order, &number, pricing, applied_code)
        .await?;

    if let Some((coupon, _)) = &coupon
        && !coupons.increment_usage(coupon.id).await?
    {
        tracing::warn!(code = %coupon.code, "Coupon usage limit reached while ordering");
    }

    tracing::info!(
        order_number = %placed.order_number,
        total = %placed.total_price,
        coupon = ?placed.coupon_code,
        "Order placed"
    );

    if let Some(email) = state.email() {
        email.spawn_order_notification(placed.clone());
    }

    Ok(Json(OrderPlaced {
        success: true,
        message: ORDER_PLACED_MESSAGE,
        order_id: placed.order_number,
        delivery_charge: placed.delivery_charge,
        discount: placed.discount,
        total_price: placed.total_price,
    }))
}

/// List orders, newest first.
///
/// GET /api/admin/orders
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<OrderFilter>,
) -> Result<Json<Value>> {
    let orders = OrderRepository::new(state.pool())
        .list(filter.status()?)
        .await?;
    Ok(Json(json!({ "orders": orders })))
}

/// GET /api/admin/orders/{id}
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Order>> {
    let id: OrderId = parse_id(&id, "Order")?;
    OrderRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Order"))
}

/// Change an order's status and/or notes.
///
/// PUT /api/admin/orders/{id}/status
#[instrument(skip(state, update))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(update): JsonBody<OrderStatusUpdate>,
) -> Result<Json<Value>> {
    let id: OrderId = parse_id(&id, "Order")?;
    let order = OrderRepository::new(state.pool())
        .update_status(id, update.status, update.notes.as_deref())
        .await?
        .ok_or_else(|| AppError::not_found("Order"))?;

    tracing::info!(order_number = %order.order_number, status = %order.status, "Order updated");
    Ok(Json(json!({ "success": true, "order": order })))
}

/// DELETE /api/admin/orders/{id}
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    let id: OrderId = parse_id(&id, "Order")?;
    if !OrderRepository::new(state.pool()).delete(id).await? {
        return Err(AppError::not_found("Order"));
    }
    tracing::info!(order_id = %id, "Order deleted");

    Ok(Json(json!({ "success": true, "message": "Order deleted" })))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filter(status: Option<&str>) -> OrderFilter {
        OrderFilter {
            status: status.map(String::from),
        }
    }

    #[test]
    fn test_order_filter() {
        assert_eq!(filter(None).status().unwrap(), None);
        assert_eq!(filter(Some("all")).status().unwrap(), None);
        assert_eq!(
            filter(Some("delivered")).status().unwrap(),
            Some(OrderStatus::Delivered)
        );
        assert!(matches!(
            filter(Some("lost")).status(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_order_placed_shape() {
        let placed = OrderPlaced {
            success: true,
            message: ORDER_PLACED_MESSAGE,
            order_id: OrderNumber::from_parts(1_700_000_123_456, 4321),
            delivery_charge: Decimal::from(60),
            discount: Decimal::ZERO,
            total_price: Decimal::from(1450),
        };
        let value = serde_json::to_value(&placed).unwrap();
        assert_eq!(value["orderId"], "RT1234564321");
        assert_eq!(value["deliveryCharge"], 60.0);
        assert_eq!(value["message"], "অর্ডার সফল হয়েছে!");
    }
}
