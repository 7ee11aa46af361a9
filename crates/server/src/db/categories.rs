//! Category repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use royal_trust_core::CategoryId;

use super::RepositoryError;
use crate::models::{Category, CategoryUpdate, NewCategory};

const COLUMNS: &str = "id, name, slug, description, image_url, sort_order, is_active, created_at";

const DUPLICATE_SLUG: &str = "category slug already exists";

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: CategoryId,
    name: String,
    slug: String,
    description: Option<String>,
    image_url: Option<String>,
    sort_order: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            image_url: row.image_url,
            sort_order: row.sort_order,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active categories ordered by `sort_order`, then name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> Result<Vec<Category>, RepositoryError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM category WHERE is_active ORDER BY sort_order, name"
        );
        let rows = sqlx::query_as::<_, CategoryRow>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM category ORDER BY sort_order, name");
        let rows = sqlx::query_as::<_, CategoryRow>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is taken.
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, category), fields(slug = %category.slug))]
    pub async fn create(&self, category: &NewCategory) -> Result<Category, RepositoryError> {
        let sql = format!(
            "INSERT INTO category (id, name, slug, description, image_url, sort_order, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(CategoryId::new())
            .bind(&category.name)
            .bind(&category.slug)
            .bind(category.description.as_deref())
            .bind(category.image_url.as_deref())
            .bind(category.sort_order)
            .bind(category.is_active)
            .fetch_one(self.pool)
            .await
            .map_err(|e| RepositoryError::from_write(e, DUPLICATE_SLUG))?;
        Ok(row.into())
    }

    /// Apply a partial update. An empty description or image URL clears it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the new slug is taken.
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self, update), fields(category_id = %id))]
    pub async fn update(
        &self,
        id: CategoryId,
        update: &CategoryUpdate,
    ) -> Result<Option<Category>, RepositoryError> {
        let sql = format!(
            "UPDATE category SET \
                name = COALESCE($2, name), \
                slug = COALESCE($3, slug), \
                description = CASE WHEN $4::text IS NULL THEN description ELSE NULLIF($4, '') END, \
                image_url = CASE WHEN $5::text IS NULL THEN image_url ELSE NULLIF($5, '') END, \
                sort_order = COALESCE($6, sort_order), \
                is_active = COALESCE($7, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(id)
            .bind(update.name.as_deref())
            .bind(update.slug.as_deref())
            .bind(update.description.as_deref())
            .bind(update.image_url.as_deref())
            .bind(update.sort_order)
            .bind(update.is_active)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| RepositoryError::from_write(e, DUPLICATE_SLUG))?;
        Ok(row.map(Into::into))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete(&self, id: CategoryId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM category WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
