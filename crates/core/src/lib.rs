//! Royal Trust Core - Shared domain types.
//!
//! This crate provides the types used by the Royal Trust BD components:
//! - `server` - The storefront and admin REST API
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. The `postgres` feature adds `sqlx` encode/decode
//! support for the id and enum types.
//!
//! # Modules
//!
//! - [`types`] - Ids, order statuses, prices and discounts, categories,
//!   delivery zones, order numbers, ratings and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
