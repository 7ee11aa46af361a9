//! Core types for Royal Trust BD.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod delivery;
pub mod email;
pub mod id;
pub mod order_number;
pub mod price;
pub mod rating;
pub mod status;

pub use category::{ProductCategory, SlugError, validate_slug};
pub use delivery::DeliveryZone;
pub use email::{Email, EmailError};
pub use id::*;
pub use order_number::{OrderNumber, OrderNumberError};
pub use price::{
    DiscountType, MONEY_SCALE, MoneyError, PriceOverflow, check_money, compute_discount, max_money,
    offer_percentage,
};
pub use rating::{Rating, RatingError};
pub use status::*;
