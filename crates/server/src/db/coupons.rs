//! Coupon repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use royal_trust_core::{CouponId, DiscountType};

use super::RepositoryError;
use crate::models::{Coupon, CouponUpdate, NewCoupon};

const COLUMNS: &str = "id, code, discount_type, discount_value, min_order_amount, max_uses, \
                       used_count, expires_at, is_active, created_at";

const DUPLICATE_CODE: &str = "coupon code already exists";

#[derive(Debug, sqlx::FromRow)]
struct CouponRow {
    id: CouponId,
    code: String,
    discount_type: DiscountType,
    discount_value: Decimal,
    min_order_amount: Decimal,
    max_uses: Option<i32>,
    used_count: i32,
    expires_at: Option<DateTime<Utc>>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<CouponRow> for Coupon {
    fn from(row: CouponRow) -> Self {
        Self {
            id: row.id,
            code: row.code,
            discount_type: row.discount_type,
            discount_value: row.discount_value,
            min_order_amount: row.min_order_amount,
            max_uses: row.max_uses,
            used_count: row.used_count,
            expires_at: row.expires_at,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

/// Repository for coupon database operations.
pub struct CouponRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CouponRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Coupon>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM coupon ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, CouponRow>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(coupon_id = %id))]
    pub async fn get(&self, id: CouponId) -> Result<Option<Coupon>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM coupon WHERE id = $1");
        let row = sqlx::query_as::<_, CouponRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Look up a coupon by its (already upper-cased) code.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get_by_code(&self, code: &str) -> Result<Option<Coupon>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM coupon WHERE code = $1");
        let row = sqlx::query_as::<_, CouponRow>(&sql)
            .bind(code)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the code is taken.
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, coupon), fields(code = %coupon.code))]
    pub async fn create(&self, coupon: &NewCoupon) -> Result<Coupon, RepositoryError> {
        let sql = format!(
            "INSERT INTO coupon (id, code, discount_type, discount_value, min_order_amount, \
                                 max_uses, expires_at, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, CouponRow>(&sql)
            .bind(CouponId::new())
            .bind(&coupon.code)
            .bind(coupon.discount_type)
            .bind(coupon.discount_value)
            .bind(coupon.min_order_amount)
            .bind(coupon.max_uses)
            .bind(coupon.expires_at)
            .bind(coupon.is_active)
            .fetch_one(self.pool)
            .await
            .map_err(|e| RepositoryError::from_write(e, DUPLICATE_CODE))?;
        Ok(row.into())
    }

    /// Apply a partial update. Returns `None` when the coupon does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the new code is taken.
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self, update), fields(coupon_id = %id))]
    pub async fn update(
        &self,
        id: CouponId,
        update: &CouponUpdate,
    ) -> Result<Option<Coupon>, RepositoryError> {
        let sql = format!(
            "UPDATE coupon SET \
                code = COALESCE($2, code), \
                discount_type = COALESCE($3, discount_type), \
                discount_value = COALESCE($4, discount_value), \
                min_order_amount = COALESCE($5, min_order_amount), \
                max_uses = CASE WHEN $6 THEN $7 ELSE max_uses END, \
                expires_at = CASE WHEN $8 THEN $9 ELSE expires_at END, \
                is_active = COALESCE($10, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, CouponRow>(&sql)
            .bind(id)
            .bind(update.code.as_deref())
            .bind(update.discount_type)
            .bind(update.discount_value)
            .bind(update.min_order_amount)
            .bind(update.max_uses.is_some())
            .bind(update.max_uses.flatten())
            .bind(update.expires_at.is_some())
            .bind(update.expires_at.flatten())
            .bind(update.is_active)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| RepositoryError::from_write(e, DUPLICATE_CODE))?;
        Ok(row.map(Into::into))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    #[instrument(skip(self), fields(coupon_id = %id))]
    pub async fn delete(&self, id: CouponId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM coupon WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count one use of a coupon, unless it has hit its limit in the
    /// meantime. Returns `false` when no use was recorded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self), fields(coupon_id = %id))]
    pub async fn increment_usage(&self, id: CouponId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE coupon SET used_count = used_count + 1 \
             WHERE id = $1 AND (max_uses IS NULL OR used_count < max_uses)",
        )
        .bind(id)
        .execute(self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
