//! Customer orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use royal_trust_core::{OrderId, OrderNumber, OrderStatus, ProductId};

use super::{ValidationError, money, optional_text, required_text};

/// An order as stored and served.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    /// Human-facing order number, shown to the customer.
    #[serde(rename = "orderId")]
    pub order_number: OrderNumber,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub product_category: Option<String>,
    pub color: String,
    pub size: String,
    pub quantity: i32,
    pub total_price: Decimal,
    pub delivery_charge: Decimal,
    pub coupon_code: Option<String>,
    pub discount: Decimal,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Order form submission from the storefront.
///
/// `product_id` is accepted as free text because the storefront sometimes
/// sends a placeholder; anything that is not a UUID is dropped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub product_category: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub quantity: Option<i32>,
    pub total_price: Option<Decimal>,
    pub coupon_code: Option<String>,
    pub notes: Option<String>,
}

/// A validated order, before pricing.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub product_category: Option<String>,
    pub color: String,
    pub size: String,
    pub quantity: i32,
    /// Client-computed total before any coupon.
    pub total_price: Decimal,
    /// Upper-cased coupon code the customer entered.
    pub coupon_code: Option<String>,
    pub notes: Option<String>,
}

impl OrderInput {
    /// Validate an order submission.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when a required field is missing, the
    /// quantity is below 1 or the total is negative.
    pub fn into_new(self) -> Result<NewOrder, ValidationError> {
        let customer_name = required_text(self.customer_name, "customerName")?;
        let phone = required_text(self.phone, "phone")?;
        let address = required_text(self.address, "address")?;
        let product_name = required_text(self.product_name, "productName")?;
        let color = required_text(self.color, "color")?;
        let size = required_text(self.size, "size")?;
        let total_price = money(
            self.total_price
                .ok_or_else(|| ValidationError::required("totalPrice"))?,
            "totalPrice",
        )?;

        let quantity = self.quantity.unwrap_or(1);
        if quantity < 1 {
            return Err(ValidationError("quantity must be at least 1".into()));
        }

        Ok(NewOrder {
            customer_name,
            phone,
            address,
            product_id: self.product_id.and_then(|id| id.trim().parse().ok()),
            product_name,
            product_category: optional_text(self.product_category),
            color,
            size,
            quantity,
            total_price,
            coupon_code: optional_text(self.coupon_code).map(|c| c.to_uppercase()),
            notes: optional_text(self.notes),
        })
    }
}

/// Admin status change. Either field may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub status: Option<OrderStatus>,
    pub notes: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid() -> serde_json::Value {
        serde_json::json!({
            "customerName": "Rahim Uddin",
            "phone": "01711000000",
            "address": "Mirpur 10, Dhaka",
            "productId": "not-a-uuid",
            "productName": "রয়েল ব্লু পাঞ্জাবি",
            "color": "রয়েল ব্লু",
            "size": "L",
            "totalPrice": 1390,
            "couponCode": " eid10 "
        })
    }

    #[test]
    fn test_into_new_defaults_and_normalizes() {
        let input: OrderInput = serde_json::from_value(valid()).unwrap();
        let order = input.into_new().unwrap();
        assert_eq!(order.quantity, 1);
        assert_eq!(order.product_id, None);
        assert_eq!(order.coupon_code.as_deref(), Some("EID10"));
        assert_eq!(order.total_price, Decimal::from(1390));
    }

    #[test]
    fn test_into_new_missing_field() {
        let mut raw = valid();
        raw.as_object_mut().unwrap().remove("address");
        let input: OrderInput = serde_json::from_value(raw).unwrap();
        assert_eq!(
            input.into_new().unwrap_err(),
            ValidationError("address is required".into())
        );
    }

    #[test]
    fn test_into_new_rejects_zero_quantity() {
        let mut raw = valid();
        raw["quantity"] = serde_json::json!(0);
        let input: OrderInput = serde_json::from_value(raw).unwrap();
        assert!(input.into_new().is_err());
    }

    #[test]
    fn test_status_update_parses_known_statuses() {
        let update: OrderStatusUpdate =
            serde_json::from_value(serde_json::json!({"status": "shipped"})).unwrap();
        assert_eq!(update.status, Some(OrderStatus::Shipped));
        assert!(
            serde_json::from_value::<OrderStatusUpdate>(serde_json::json!({"status": "lost"}))
                .is_err()
        );
    }
}
