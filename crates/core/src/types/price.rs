//! Price arithmetic using decimal math.
//!
//! Prices are Bangladeshi taka held as [`Decimal`]. Nothing here converts
//! through floating point, and all arithmetic is checked: `Decimal`'s
//! operators panic on overflow.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Decimal places a stored money amount may carry.
pub const MONEY_SCALE: u32 = 2;

/// Largest amount a money column (`NUMERIC(12, 2)`) can hold: 9,999,999,999.99.
#[must_use]
pub fn max_money() -> Decimal {
    Decimal::new(999_999_999_999, MONEY_SCALE)
}

/// Price arithmetic left the representable range.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("price arithmetic overflowed")]
pub struct PriceOverflow;

/// A money amount that cannot be stored.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoneyError {
    #[error("cannot be negative")]
    Negative,
    #[error("cannot exceed 9999999999.99")]
    TooLarge,
    #[error("can have at most 2 decimal places")]
    TooPrecise,
}

/// Check that `value` fits a money column.
///
/// # Errors
///
/// Returns the first [`MoneyError`] that applies.
pub fn check_money(value: Decimal) -> Result<Decimal, MoneyError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(MoneyError::Negative);
    }
    if value > max_money() {
        return Err(MoneyError::TooLarge);
    }
    if value.normalize().scale() > MONEY_SCALE {
        return Err(MoneyError::TooPrecise);
    }
    Ok(value)
}

/// Discount percentage shown next to a product's offer price.
///
/// Computes `(regular - offer) / regular * 100` and rounds half up, so
/// 26.5 becomes 27 and -0.5 becomes 0. A zero regular price yields 0.
///
/// ```
/// use royal_trust_core::offer_percentage;
/// use rust_decimal::Decimal;
///
/// assert_eq!(offer_percentage(Decimal::from(1890), Decimal::from(1390)), Ok(26));
/// assert_eq!(offer_percentage(Decimal::ZERO, Decimal::from(100)), Ok(0));
/// ```
///
/// # Errors
///
/// Returns [`PriceOverflow`] when an intermediate step overflows or the
/// percentage does not fit an `i32`.
pub fn offer_percentage(regular: Decimal, offer: Decimal) -> Result<i32, PriceOverflow> {
    if regular.is_zero() {
        return Ok(0);
    }
    regular
        .checked_sub(offer)
        .and_then(|saved| saved.checked_div(regular))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|raw| raw.checked_add(Decimal::new(5, 1)))
        .and_then(|raw| raw.floor().to_i32())
        .ok_or(PriceOverflow)
}

/// How a coupon's value is applied to an order amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "discount_type", rename_all = "lowercase")
)]
pub enum DiscountType {
    /// `value` percent of the amount.
    #[default]
    Percentage,
    /// A flat `value` off the amount.
    Fixed,
}

/// Amount taken off `amount` by a coupon of the given kind and value.
///
/// Percentage discounts are rounded to 2 decimal places (half away from
/// zero). Neither kind ever exceeds `amount`.
///
/// # Errors
///
/// Returns [`PriceOverflow`] when `amount * value` overflows.
pub fn compute_discount(
    kind: DiscountType,
    value: Decimal,
    amount: Decimal,
) -> Result<Decimal, PriceOverflow> {
    let discount = match kind {
        DiscountType::Percentage => amount
            .checked_mul(value)
            .and_then(|d| d.checked_div(Decimal::ONE_HUNDRED))
            .ok_or(PriceOverflow)?
            .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero),
        DiscountType::Fixed => value,
    };
    Ok(discount.min(amount).max(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn test_offer_percentage_seed_products() {
        assert_eq!(offer_percentage(d(1890), d(1390)), Ok(26));
        assert_eq!(offer_percentage(d(990), d(690)), Ok(30));
    }

    #[test]
    fn test_offer_percentage_rounds_half_up() {
        // 200 -> 147 is 26.5% off
        assert_eq!(offer_percentage(d(200), d(147)), Ok(27));
        // 200 -> 149 is 25.5% off
        assert_eq!(offer_percentage(d(200), d(149)), Ok(26));
        assert_eq!(offer_percentage(d(3), d(2)), Ok(33));
    }

    #[test]
    fn test_offer_percentage_edges() {
        assert_eq!(offer_percentage(Decimal::ZERO, d(50)), Ok(0));
        assert_eq!(offer_percentage(d(100), d(100)), Ok(0));
        assert_eq!(offer_percentage(d(100), Decimal::ZERO), Ok(100));
        assert_eq!(offer_percentage(d(100), d(120)), Ok(-20));
    }

    #[test]
    fn test_offer_percentage_overflow_is_an_error() {
        let tiny = Decimal::new(1, 10);
        let huge = Decimal::from_i128_with_scale(10_000_000_000_000_000_000, 0);
        assert_eq!(offer_percentage(tiny, huge), Err(PriceOverflow));

        // Fits a Decimal but not an i32
        assert_eq!(
            offer_percentage(Decimal::new(1, 2), max_money()),
            Err(PriceOverflow)
        );
    }

    #[test]
    fn test_percentage_discount() {
        assert_eq!(compute_discount(DiscountType::Percentage, d(10), d(1390)), Ok(d(139)));
        assert_eq!(
            compute_discount(DiscountType::Percentage, d(15), Decimal::new(99999, 2)),
            Ok(Decimal::new(15000, 2))
        );
    }

    #[test]
    fn test_percentage_discount_overflow_is_an_error() {
        let huge = Decimal::from_i128_with_scale(70_000_000_000_000_000_000_000_000_000, 0);
        assert_eq!(
            compute_discount(DiscountType::Percentage, d(10), huge),
            Err(PriceOverflow)
        );
        assert_eq!(
            compute_discount(DiscountType::Percentage, d(100), max_money()),
            Ok(max_money())
        );
    }

    #[test]
    fn test_fixed_discount_capped_at_amount() {
        assert_eq!(compute_discount(DiscountType::Fixed, d(200), d(1000)), Ok(d(200)));
        assert_eq!(compute_discount(DiscountType::Fixed, d(200), d(150)), Ok(d(150)));
    }

    #[test]
    fn test_check_money_bounds() {
        assert_eq!(check_money(Decimal::ZERO), Ok(Decimal::ZERO));
        assert_eq!(check_money(max_money()), Ok(max_money()));
        assert_eq!(check_money(d(10_000_000_000)), Err(MoneyError::TooLarge));
        assert_eq!(check_money(d(-1)), Err(MoneyError::Negative));
    }

    #[test]
    fn test_check_money_scale() {
        // Trailing zeros do not count
        assert!(check_money(Decimal::new(145_000, 3)).is_ok());
        assert_eq!(check_money(Decimal::new(14_505, 3)), Err(MoneyError::TooPrecise));
        assert_eq!(
            check_money(Decimal::from_i128_with_scale(1, 28)),
            Err(MoneyError::TooPrecise)
        );
    }

    #[test]
    fn test_discount_type_serde() {
        assert_eq!(
            serde_json::to_string(&DiscountType::Fixed).unwrap_or_default(),
            "\"fixed\""
        );
    }
}
