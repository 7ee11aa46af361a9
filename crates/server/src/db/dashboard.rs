//! Dashboard aggregates for the admin panel.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use tracing::instrument;

use super::{OrderRepository, ProductRepository, RepositoryError, ReviewRepository};
use crate::models::Order;

/// Number of orders shown in the dashboard's recent list.
const RECENT_ORDERS: i64 = 5;

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_orders: i64,
    pub pending_orders: i64,
    pub delivered_orders: i64,
    pub total_products: i64,
    pub total_reviews: i64,
    pub pending_reviews: i64,
    /// Sum of `total_price` over delivered orders.
    pub total_revenue: Decimal,
    pub recent_orders: Vec<Order>,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderTotals {
    total: i64,
    pending: i64,
    delivered: i64,
    revenue: Decimal,
}

pub struct DashboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DashboardRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Gather dashboard statistics.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if any of the underlying queries fail.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<DashboardStats, RepositoryError> {
        let totals = sqlx::query_as::<_, OrderTotals>(
            "SELECT \
                COUNT(*) AS total, \
                COUNT(*) FILTER (WHERE status = 'pending') AS pending, \
                COUNT(*) FILTER (WHERE status = 'delivered') AS delivered, \
                COALESCE(SUM(total_price) FILTER (WHERE status = 'delivered'), 0) AS revenue \
             FROM customer_order",
        )
        .fetch_one(self.pool)
        .await?;

        let total_products = ProductRepository::new(self.pool).count().await?;
        let (total_reviews, pending_reviews) = ReviewRepository::new(self.pool).counts().await?;
        let recent_orders = OrderRepository::new(self.pool).recent(RECENT_ORDERS).await?;

        Ok(DashboardStats {
            total_orders: totals.total,
            pending_orders: totals.pending,
            delivered_orders: totals.delivered,
            total_products,
            total_reviews,
            pending_reviews,
            total_revenue: totals.revenue,
            recent_orders,
        })
    }
}
