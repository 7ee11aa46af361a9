//! Review repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use royal_trust_core::{Rating, ReviewId};

use super::RepositoryError;
use crate::models::{NewReview, Review};

const COLUMNS: &str = "id, name, location, rating, text, is_approved, is_read, created_at";

#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: ReviewId,
    name: String,
    location: String,
    rating: i32,
    text: String,
    is_approved: bool,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = RepositoryError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let rating = Rating::new(i64::from(row.rating))
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        Ok(Self {
            id: row.id,
            name: row.name,
            location: row.location,
            rating,
            text: row.text,
            is_approved: row.is_approved,
            is_read: row.is_read,
            created_at: row.created_at,
        })
    }
}

fn convert(rows: Vec<ReviewRow>) -> Result<Vec<Review>, RepositoryError> {
    rows.into_iter().map(TryInto::try_into).collect()
}

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Newest approved reviews for the storefront.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_approved(&self, limit: i64) -> Result<Vec<Review>, RepositoryError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM review WHERE is_approved \
             ORDER BY created_at DESC LIMIT $1"
        );
        let rows = sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(limit)
            .fetch_all(self.pool)
            .await?;
        convert(rows)
    }

    /// All reviews, newest first, optionally filtered by approval state.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(&self, approved: Option<bool>) -> Result<Vec<Review>, RepositoryError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM review \
             WHERE ($1::boolean IS NULL OR is_approved = $1) \
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(approved)
            .fetch_all(self.pool)
            .await?;
        convert(rows)
    }

    /// Store a new review, unapproved and unread.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, review), fields(name = %review.name))]
    pub async fn create(&self, review: &NewReview) -> Result<Review, RepositoryError> {
        let sql = format!(
            "INSERT INTO review (id, name, location, rating, text) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(ReviewId::new())
            .bind(&review.name)
            .bind(&review.location)
            .bind(review.rating.get())
            .bind(&review.text)
            .fetch_one(self.pool)
            .await?;
        row.try_into()
    }

    /// Approve a review. Returns `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self), fields(review_id = %id))]
    pub async fn approve(&self, id: ReviewId) -> Result<Option<Review>, RepositoryError> {
        let sql = format!("UPDATE review SET is_approved = TRUE WHERE id = $1 RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        row.map(TryInto::try_into).transpose()
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    #[instrument(skip(self), fields(review_id = %id))]
    pub async fn delete(&self, id: ReviewId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM review WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The most recent unread reviews.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_unread(&self, limit: i64) -> Result<Vec<Review>, RepositoryError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM review WHERE NOT is_read \
             ORDER BY created_at DESC LIMIT $1"
        );
        let rows = sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(limit)
            .fetch_all(self.pool)
            .await?;
        convert(rows)
    }

    /// Mark one review read. Returns `false` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn mark_read(&self, id: ReviewId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE review SET is_read = TRUE WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn mark_all_read(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("UPDATE review SET is_read = TRUE WHERE NOT is_read")
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Review counts as `(total, pending approval)`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn counts(&self) -> Result<(i64, i64), RepositoryError> {
        let counts: (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE NOT is_approved) FROM review",
        )
        .fetch_one(self.pool)
        .await?;
        Ok(counts)
    }
}
