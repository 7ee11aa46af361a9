//! Database operations.
//!
//! ## Tables
//!
//! - `product` - Catalogue, colour variants as JSONB
//! - `customer_order` - Orders placed from the storefront
//! - `review` - Customer reviews awaiting or past approval
//! - `slider` - Homepage hero slides
//! - `website_settings` - Single row of site-wide settings
//! - `admin_user` - The admin account (argon2 password hash)
//! - `category` - Admin-managed product categories
//! - `coupon` - Discount codes
//! - `contact_message` - Contact form submissions
//! - `tower_sessions.session` - Admin sessions (managed by tower-sessions)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p royal-trust-cli -- migrate
//! ```

pub mod admin_users;
pub mod categories;
pub mod contacts;
pub mod coupons;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod seed;
pub mod settings;
pub mod sliders;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use admin_users::AdminUserRepository;
pub use categories::CategoryRepository;
pub use contacts::ContactRepository;
pub use coupons::CouponRepository;
pub use dashboard::{DashboardRepository, DashboardStats};
pub use orders::{OrderPricing, OrderRepository};
pub use products::ProductRepository;
pub use reviews::ReviewRepository;
pub use seed::{SeedError, SeedReport, seed_defaults};
pub use settings::SettingsRepository;
pub use sliders::SliderRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate slide number).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Classify an insert/update error, turning unique violations into
    /// `Conflict` with a readable message.
    pub(crate) fn from_write(e: sqlx::Error, conflict_message: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return Self::Conflict(conflict_message.to_string());
        }
        Self::Database(e)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
