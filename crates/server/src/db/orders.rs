//! Order repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use royal_trust_core::{OrderId, OrderNumber, OrderStatus, ProductId};

use super::RepositoryError;
use crate::models::{NewOrder, Order};

const COLUMNS: &str = "id, order_number, customer_name, phone, address, product_id, product_name, \
                       product_category, color, size, quantity, total_price, delivery_charge, \
                       coupon_code, discount, status, notes, is_read, created_at";

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    order_number: String,
    customer_name: String,
    phone: String,
    address: String,
    product_id: Option<ProductId>,
    product_name: String,
    product_category: Option<String>,
    color: String,
    size: String,
    quantity: i32,
    total_price: Decimal,
    delivery_charge: Decimal,
    coupon_code: Option<String>,
    discount: Decimal,
    status: OrderStatus,
    notes: Option<String>,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let order_number = OrderNumber::parse(&row.order_number).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order number in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            order_number,
            customer_name: row.customer_name,
            phone: row.phone,
            address: row.address,
            product_id: row.product_id,
            product_name: row.product_name,
            product_category: row.product_category,
            color: row.color,
            size: row.size,
            quantity: row.quantity,
            total_price: row.total_price,
            delivery_charge: row.delivery_charge,
            coupon_code: row.coupon_code,
            discount: row.discount,
            status: row.status,
            notes: row.notes,
            is_read: row.is_read,
            created_at: row.created_at,
        })
    }
}

fn convert(rows: Vec<OrderRow>) -> Result<Vec<Order>, RepositoryError> {
    rows.into_iter().map(TryInto::try_into).collect()
}

/// Server-computed pricing for a new order.
#[derive(Debug, Clone, Copy)]
pub struct OrderPricing {
    /// Total after the coupon discount.
    pub total_price: Decimal,
    pub delivery_charge: Decimal,
    pub discount: Decimal,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an order under a freshly generated order number.
    ///
    /// `coupon_code` is recorded only when a coupon was actually applied.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the order number collides.
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, order), fields(order_number = %number))]
    pub async fn create(
        &self,
        order: &NewOrder,
        number: &OrderNumber,
        pricing: OrderPricing,
        coupon_code: Option<&str>,
    ) -> Result<Order, RepositoryError> {
        let sql = format!(
            "INSERT INTO customer_order (id, order_number, customer_name, phone, address, \
                product_id, product_name, product_category, color, size, quantity, \
                total_price, delivery_charge, coupon_code, discount, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(OrderId::new())
            .bind(number.as_str())
            .bind(&order.customer_name)
            .bind(&order.phone)
            .bind(&order.address)
            .bind(order.product_id)
            .bind(&order.product_name)
            .bind(order.product_category.as_deref())
            .bind(&order.color)
            .bind(&order.size)
            .bind(order.quantity)
            .bind(pricing.total_price)
            .bind(pricing.delivery_charge)
            .bind(coupon_code)
            .bind(pricing.discount)
            .bind(order.notes.as_deref())
            .fetch_one(self.pool)
            .await
            .map_err(|e| RepositoryError::from_write(e, "order number already exists"))?;
        row.try_into()
    }

    /// All orders, newest first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM customer_order \
             WHERE ($1::order_status IS NULL OR status = $1) \
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(status)
            .fetch_all(self.pool)
            .await?;
        convert(rows)
    }

    /// The most recent orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent(&self, limit: i64) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM customer_order ORDER BY created_at DESC LIMIT $1");
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(limit)
            .fetch_all(self.pool)
            .await?;
        convert(rows)
    }

    /// The most recent unread orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_unread(&self, limit: i64) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM customer_order WHERE NOT is_read \
             ORDER BY created_at DESC LIMIT $1"
        );
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(limit)
            .fetch_all(self.pool)
            .await?;
        convert(rows)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM customer_order WHERE id = $1");
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        row.map(TryInto::try_into).transpose()
    }

    /// Change an order's status and/or notes. Returns `None` when the order
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self, notes), fields(order_id = %id))]
    pub async fn update_status(
        &self,
        id: OrderId,
        status: Option<OrderStatus>,
        notes: Option<&str>,
    ) -> Result<Option<Order>, RepositoryError> {
        let sql = format!(
            "UPDATE customer_order SET \
                status = COALESCE($2, status), \
                notes = COALESCE($3, notes) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .bind(status)
            .bind(notes)
            .fetch_optional(self.pool)
            .await?;
        row.map(TryInto::try_into).transpose()
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn delete(&self, id: OrderId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM customer_order WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark one order read. Returns `false` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn mark_read(&self, id: OrderId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE customer_order SET is_read = TRUE WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark every order read. Returns the number of rows changed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn mark_all_read(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("UPDATE customer_order SET is_read = TRUE WHERE NOT is_read")
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
