//! Product repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;

use royal_trust_core::ProductId;

use super::RepositoryError;
use crate::models::{ColorVariant, NewProduct, Product, ProductUpdate};

const COLUMNS: &str = "id, name, description, colors, size, regular_price, offer_price, \
                       offer_percentage, is_active, category, features, has_variants, created_at";

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    description: String,
    colors: Json<Vec<ColorVariant>>,
    size: String,
    regular_price: Decimal,
    offer_price: Decimal,
    offer_percentage: i32,
    is_active: bool,
    category: String,
    features: Vec<String>,
    has_variants: bool,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            colors: row.colors.0,
            size: row.size,
            regular_price: row.regular_price,
            offer_price: row.offer_price,
            offer_percentage: row.offer_percentage,
            is_active: row.is_active,
            category: row.category,
            features: row.features,
            has_variants: row.has_variants,
            created_at: row.created_at,
        }
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active products for the storefront, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_active(&self, category: Option<&str>) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM product \
             WHERE is_active AND ($1::text IS NULL OR category = $1) \
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(category)
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Every product, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM product ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a product by id, active or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM product WHERE id = $1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Get a product only if it is active.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_active(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM product WHERE id = $1 AND is_active");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Insert a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let sql = format!(
            "INSERT INTO product (id, name, description, colors, size, regular_price, offer_price, \
                                  offer_percentage, is_active, category, features, has_variants) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(ProductId::new())
            .bind(&product.name)
            .bind(&product.description)
            .bind(Json(&product.colors))
            .bind(&product.size)
            .bind(product.regular_price)
            .bind(product.offer_price)
            .bind(product.offer_percentage)
            .bind(product.is_active)
            .bind(&product.category)
            .bind(&product.features)
            .bind(product.has_variants)
            .fetch_one(self.pool)
            .await?;
        Ok(row.into())
    }

    /// Apply a partial update. Returns `None` when the product does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self, update), fields(product_id = %id))]
    pub async fn update(
        &self,
        id: ProductId,
        update: &ProductUpdate,
    ) -> Result<Option<Product>, RepositoryError> {
        let sql = format!(
            "UPDATE product SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                colors = COALESCE($4, colors), \
                size = COALESCE($5, size), \
                regular_price = COALESCE($6, regular_price), \
                offer_price = COALESCE($7, offer_price), \
                offer_percentage = COALESCE($8, offer_percentage), \
                is_active = COALESCE($9, is_active), \
                category = COALESCE($10, category), \
                features = COALESCE($11, features), \
                has_variants = COALESCE($12, has_variants) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .bind(update.name.as_deref())
            .bind(update.description.as_deref())
            .bind(update.colors.as_ref().map(Json))
            .bind(update.size.as_deref())
            .bind(update.regular_price)
            .bind(update.offer_price)
            .bind(update.offer_percentage)
            .bind(update.is_active)
            .bind(update.category.as_deref())
            .bind(update.features.as_deref())
            .bind(update.has_variants)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Delete a product. Returns `false` when it did not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of products, active or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
