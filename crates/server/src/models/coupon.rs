//! Discount coupons.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use royal_trust_core::{CouponId, DiscountType, compute_discount};

use super::{ValidationError, money, nullable, required_text};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(rename = "_id")]
    pub id: CouponId,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_order_amount: Decimal,
    pub max_uses: Option<i32>,
    pub used_count: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Why a coupon cannot be applied. The message is shown to the customer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CouponRejection {
    #[error("Coupon not found")]
    NotFound,
    #[error("Coupon is not active")]
    Inactive,
    #[error("Coupon has expired")]
    Expired,
    #[error("Coupon usage limit reached")]
    UsageLimitReached,
    #[error("Minimum order amount is {0}")]
    BelowMinimum(Decimal),
    #[error("Order amount is out of range")]
    AmountOutOfRange,
}

impl Coupon {
    /// Discount this coupon gives on `amount` at time `now`.
    ///
    /// # Errors
    ///
    /// Returns the first `CouponRejection` rule that fails.
    pub fn evaluate(&self, amount: Decimal, now: DateTime<Utc>) -> Result<Decimal, CouponRejection> {
        if !self.is_active {
            return Err(CouponRejection::Inactive);
        }
        if self.expires_at.is_some_and(|at| at <= now) {
            return Err(CouponRejection::Expired);
        }
        if self.max_uses.is_some_and(|max| self.used_count >= max) {
            return Err(CouponRejection::UsageLimitReached);
        }
        if amount < self.min_order_amount {
            return Err(CouponRejection::BelowMinimum(self.min_order_amount));
        }
        compute_discount(self.discount_type, self.discount_value, amount)
            .map_err(|_| CouponRejection::AmountOutOfRange)
    }
}

/// Normalize a coupon code as typed by a customer or admin.
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponInput {
    pub code: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<Decimal>,
    pub min_order_amount: Option<Decimal>,
    /// `null` removes the usage limit.
    #[serde(default, deserialize_with = "nullable")]
    pub max_uses: Option<Option<i32>>,
    /// `null` removes the expiry.
    #[serde(default, deserialize_with = "nullable")]
    pub expires_at: Option<Option<DateTime<Utc>>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NewCoupon {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_order_amount: Decimal,
    pub max_uses: Option<i32>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CouponUpdate {
    pub code: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<Decimal>,
    pub min_order_amount: Option<Decimal>,
    /// `Some(None)` clears the limit.
    pub max_uses: Option<Option<i32>>,
    /// `Some(None)` clears the expiry.
    pub expires_at: Option<Option<DateTime<Utc>>>,
    pub is_active: Option<bool>,
}

fn check_value(kind: DiscountType, value: Decimal) -> Result<Decimal, ValidationError> {
    let value = money(value, "discountValue")?;
    if value.is_zero() {
        return Err(ValidationError("discountValue must be greater than 0".into()));
    }
    if kind == DiscountType::Percentage && value > Decimal::ONE_HUNDRED {
        return Err(ValidationError(
            "percentage discountValue cannot exceed 100".into(),
        ));
    }
    Ok(value)
}

fn check_max_uses(max_uses: Option<i32>) -> Result<Option<i32>, ValidationError> {
    match max_uses {
        Some(n) if n < 1 => Err(ValidationError("maxUses must be at least 1".into())),
        other => Ok(other),
    }
}

impl CouponInput {
    /// # Errors
    ///
    /// Returns `ValidationError` for a missing code, type or value, or a
    /// value out of range for its type.
    pub fn into_new(self) -> Result<NewCoupon, ValidationError> {
        let code = normalize_code(&required_text(self.code, "code")?);
        let discount_type = self
            .discount_type
            .ok_or_else(|| ValidationError::required("discountType"))?;
        let discount_value = check_value(
            discount_type,
            self.discount_value
                .ok_or_else(|| ValidationError::required("discountValue"))?,
        )?;

        Ok(NewCoupon {
            code,
            discount_type,
            discount_value,
            min_order_amount: money(
                self.min_order_amount.unwrap_or(Decimal::ZERO),
                "minOrderAmount",
            )?,
            max_uses: check_max_uses(self.max_uses.flatten())?,
            expires_at: self.expires_at.flatten(),
            is_active: self.is_active.unwrap_or(true),
        })
    }

    /// Validate an update against the stored coupon, so that a percentage
    /// cap is checked against whichever type the coupon ends up with.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when the resulting type and value are
    /// inconsistent or the code is blanked.
    pub fn into_update(self, existing: &Coupon) -> Result<CouponUpdate, ValidationError> {
        let kind = self.discount_type.unwrap_or(existing.discount_type);
        let value = self.discount_value.unwrap_or(existing.discount_value);
        if self.discount_type.is_some() || self.discount_value.is_some() {
            check_value(kind, value)?;
        }

        Ok(CouponUpdate {
            code: self
                .code
                .map(|c| required_text(Some(c), "code").map(|c| normalize_code(&c)))
                .transpose()?,
            discount_type: self.discount_type,
            discount_value: self.discount_value,
            min_order_amount: self
                .min_order_amount
                .map(|m| money(m, "minOrderAmount"))
                .transpose()?,
            max_uses: self.max_uses.map(check_max_uses).transpose()?,
            expires_at: self.expires_at,
            is_active: self.is_active,
        })
    }
}

/// Coupon check request from the storefront.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CouponCheck {
    pub code: Option<String>,
    pub amount: Option<Decimal>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn coupon(kind: DiscountType, value: i64) -> Coupon {
        Coupon {
            id: CouponId::new(),
            code: "EID10".into(),
            discount_type: kind,
            discount_value: Decimal::from(value),
            min_order_amount: Decimal::from(500),
            max_uses: Some(3),
            used_count: 0,
            expires_at: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_percentage_coupon() {
        let c = coupon(DiscountType::Percentage, 10);
        assert_eq!(c.evaluate(Decimal::from(1390), Utc::now()), Ok(Decimal::from(139)));
    }

    #[test]
    fn test_fixed_coupon_capped() {
        let mut c = coupon(DiscountType::Fixed, 800);
        c.min_order_amount = Decimal::ZERO;
        assert_eq!(c.evaluate(Decimal::from(600), Utc::now()), Ok(Decimal::from(600)));
    }

    #[test]
    fn test_rejections() {
        let now = Utc::now();

        let mut c = coupon(DiscountType::Fixed, 100);
        c.is_active = false;
        assert_eq!(c.evaluate(Decimal::from(1000), now), Err(CouponRejection::Inactive));

        let mut c = coupon(DiscountType::Fixed, 100);
        c.expires_at = Some(now - Duration::hours(1));
        assert_eq!(c.evaluate(Decimal::from(1000), now), Err(CouponRejection::Expired));

        let mut c = coupon(DiscountType::Fixed, 100);
        c.used_count = 3;
        assert_eq!(
            c.evaluate(Decimal::from(1000), now),
            Err(CouponRejection::UsageLimitReached)
        );

        let c = coupon(DiscountType::Fixed, 100);
        assert_eq!(
            c.evaluate(Decimal::from(499), now),
            Err(CouponRejection::BelowMinimum(Decimal::from(500)))
        );
    }

    #[test]
    fn test_overflowing_amount_is_rejected() {
        let c = coupon(DiscountType::Percentage, 10);
        let huge = Decimal::from_i128_with_scale(70_000_000_000_000_000_000_000_000_000, 0);
        assert_eq!(
            c.evaluate(huge, Utc::now()),
            Err(CouponRejection::AmountOutOfRange)
        );
    }

    #[test]
    fn test_future_expiry_and_unlimited_uses() {
        let now = Utc::now();
        let mut c = coupon(DiscountType::Fixed, 100);
        c.expires_at = Some(now + Duration::days(2));
        c.max_uses = None;
        c.used_count = 10_000;
        assert_eq!(c.evaluate(Decimal::from(1000), now), Ok(Decimal::from(100)));
    }

    #[test]
    fn test_into_new_normalizes_and_checks() {
        let new = CouponInput {
            code: Some(" eid10 ".into()),
            discount_type: Some(DiscountType::Percentage),
            discount_value: Some(Decimal::from(10)),
            ..CouponInput::default()
        }
        .into_new()
        .unwrap();
        assert_eq!(new.code, "EID10");
        assert_eq!(new.min_order_amount, Decimal::ZERO);

        let over = CouponInput {
            code: Some("BIG".into()),
            discount_type: Some(DiscountType::Percentage),
            discount_value: Some(Decimal::from(120)),
            ..CouponInput::default()
        };
        assert!(over.into_new().is_err());
    }

    #[test]
    fn test_update_can_clear_limit_and_expiry() {
        let existing = coupon(DiscountType::Fixed, 300);

        let input: CouponInput = serde_json::from_value(serde_json::json!({
            "maxUses": null,
            "expiresAt": null,
        }))
        .unwrap();
        let update = input.into_update(&existing).unwrap();
        assert_eq!(update.max_uses, Some(None));
        assert_eq!(update.expires_at, Some(None));

        let input: CouponInput = serde_json::from_value(serde_json::json!({ "maxUses": 5 })).unwrap();
        let update = input.into_update(&existing).unwrap();
        assert_eq!(update.max_uses, Some(Some(5)));
        assert_eq!(update.expires_at, None);
    }

    #[test]
    fn test_update_rejects_zero_max_uses() {
        let existing = coupon(DiscountType::Fixed, 300);
        let input: CouponInput = serde_json::from_value(serde_json::json!({ "maxUses": 0 })).unwrap();
        assert!(input.into_update(&existing).is_err());
    }

    #[test]
    fn test_update_checks_against_existing_type() {
        let existing = coupon(DiscountType::Fixed, 300);
        let update = CouponInput {
            discount_type: Some(DiscountType::Percentage),
            ..CouponInput::default()
        };
        // 300 percent is not a valid percentage
        assert!(update.into_update(&existing).is_err());
    }
}
