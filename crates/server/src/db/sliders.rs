//! Slider repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use royal_trust_core::{BadgeColor, SliderId};

use super::RepositoryError;
use crate::models::{NewSlider, Slider, SliderUpdate};

const COLUMNS: &str = "id, slide_number, title, subtitle, description, image_url, badge_text, \
                       badge_color, price, original_price, is_active, created_at";

const DUPLICATE_SLIDE: &str = "slide number already in use";

#[derive(Debug, sqlx::FromRow)]
struct SliderRow {
    id: SliderId,
    slide_number: i32,
    title: String,
    subtitle: String,
    description: String,
    image_url: String,
    badge_text: Option<String>,
    badge_color: BadgeColor,
    price: Option<Decimal>,
    original_price: Option<Decimal>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<SliderRow> for Slider {
    fn from(row: SliderRow) -> Self {
        Self {
            id: row.id,
            slide_number: row.slide_number,
            title: row.title,
            subtitle: row.subtitle,
            description: row.description,
            image_url: row.image_url,
            badge_text: row.badge_text,
            badge_color: row.badge_color,
            price: row.price,
            original_price: row.original_price,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

/// Repository for slider database operations.
pub struct SliderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SliderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active slides in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> Result<Vec<Slider>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM slider WHERE is_active ORDER BY slide_number");
        let rows = sqlx::query_as::<_, SliderRow>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Every slide in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Slider>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM slider ORDER BY slide_number");
        let rows = sqlx::query_as::<_, SliderRow>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slide number is taken.
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, slider), fields(slide_number = slider.slide_number))]
    pub async fn create(&self, slider: &NewSlider) -> Result<Slider, RepositoryError> {
        let sql = format!(
            "INSERT INTO slider (id, slide_number, title, subtitle, description, image_url, \
                                 badge_text, badge_color, price, original_price, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, SliderRow>(&sql)
            .bind(SliderId::new())
            .bind(slider.slide_number)
            .bind(&slider.title)
            .bind(&slider.subtitle)
            .bind(&slider.description)
            .bind(&slider.image_url)
            .bind(slider.badge_text.as_deref())
            .bind(slider.badge_color)
            .bind(slider.price)
            .bind(slider.original_price)
            .bind(slider.is_active)
            .fetch_one(self.pool)
            .await
            .map_err(|e| RepositoryError::from_write(e, DUPLICATE_SLIDE))?;
        Ok(row.into())
    }

    /// Apply a partial update. Returns `None` when the slide does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the new slide number is taken.
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self, update), fields(slider_id = %id))]
    pub async fn update(
        &self,
        id: SliderId,
        update: &SliderUpdate,
    ) -> Result<Option<Slider>, RepositoryError> {
        let sql = format!(
            "UPDATE slider SET \
                slide_number = COALESCE($2, slide_number), \
                title = COALESCE($3, title), \
                subtitle = COALESCE($4, subtitle), \
                description = COALESCE($5, description), \
                image_url = COALESCE($6, image_url), \
                badge_text = COALESCE($7, badge_text), \
                badge_color = COALESCE($8, badge_color), \
                price = COALESCE($9, price), \
                original_price = COALESCE($10, original_price), \
                is_active = COALESCE($11, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, SliderRow>(&sql)
            .bind(id)
            .bind(update.slide_number)
            .bind(update.title.as_deref())
            .bind(update.subtitle.as_deref())
            .bind(update.description.as_deref())
            .bind(update.image_url.as_deref())
            .bind(update.badge_text.as_deref())
            .bind(update.badge_color)
            .bind(update.price)
            .bind(update.original_price)
            .bind(update.is_active)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| RepositoryError::from_write(e, DUPLICATE_SLIDE))?;
        Ok(row.map(Into::into))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    #[instrument(skip(self), fields(slider_id = %id))]
    pub async fn delete(&self, id: SliderId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM slider WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM slider")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
