//! Domain models and request payloads.
//!
//! Response types serialize with camelCase field names and the record id as
//! `_id`, which is what the storefront and admin panel JavaScript reads.
//! Request payloads keep every field optional so that missing required
//! fields produce a 400 with a readable message instead of a serde error.

pub mod admin_user;
pub mod category;
pub mod contact;
pub mod coupon;
pub mod order;
pub mod product;
pub mod review;
pub mod session;
pub mod settings;
pub mod slider;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use royal_trust_core::check_money;

pub use admin_user::{AdminUser, LoginRequest};
pub use category::{Category, CategoryInput, CategoryUpdate, NewCategory};
pub use contact::{ContactInput, ContactMessage, NewContactMessage};
pub use coupon::{Coupon, CouponCheck, CouponInput, CouponRejection, CouponUpdate, NewCoupon};
pub use order::{NewOrder, Order, OrderInput, OrderStatusUpdate};
pub use product::{ColorInput, ColorVariant, NewProduct, Product, ProductInput, ProductUpdate};
pub use review::{NewReview, Review, ReviewInput};
pub use session::{CurrentAdmin, keys as session_keys};
pub use settings::{SettingsUpdate, WebsiteSettings};
pub use slider::{NewSlider, Slider, SliderInput, SliderUpdate};

/// A request payload failed validation. The message is shown to the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        Self(format!("{field} is required"))
    }
}

/// Trim a required text field, rejecting it when missing or blank.
pub(crate) fn required_text(value: Option<String>, field: &str) -> Result<String, ValidationError> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ValidationError::required(field))
}

/// Trim an optional text field, treating blank as absent.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Trim a text field on a partial update, rejecting an explicit blank.
pub(crate) fn updated_text(value: Option<String>, field: &str) -> Result<Option<String>, ValidationError> {
    value.map(|v| required_text(Some(v), field)).transpose()
}

/// Keep an explicit `null` apart from an absent field on partial updates:
/// absent is `None`, `null` is `Some(None)`. Pair with `#[serde(default)]`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Reject money amounts that a `NUMERIC(12, 2)` column cannot hold.
pub(crate) fn money(value: Decimal, field: &str) -> Result<Decimal, ValidationError> {
    check_money(value).map_err(|e| ValidationError(format!("{field} {e}")))
}
