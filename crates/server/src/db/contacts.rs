//! Contact message repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use royal_trust_core::{ContactId, Email};

use super::RepositoryError;
use crate::models::{ContactMessage, NewContactMessage};

const COLUMNS: &str = "id, name, phone, email, subject, message, is_read, created_at";

#[derive(Debug, sqlx::FromRow)]
struct ContactRow {
    id: ContactId,
    name: String,
    phone: String,
    email: Option<Email>,
    subject: Option<String>,
    message: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl From<ContactRow> for ContactMessage {
    fn from(row: ContactRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            phone: row.phone,
            email: row.email,
            subject: row.subject,
            message: row.message,
            is_read: row.is_read,
            created_at: row.created_at,
        }
    }
}

/// Repository for contact form messages.
pub struct ContactRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, message), fields(name = %message.name))]
    pub async fn create(&self, message: &NewContactMessage) -> Result<ContactMessage, RepositoryError> {
        let sql = format!(
            "INSERT INTO contact_message (id, name, phone, email, subject, message) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ContactRow>(&sql)
            .bind(ContactId::new())
            .bind(&message.name)
            .bind(&message.phone)
            .bind(message.email.as_ref())
            .bind(message.subject.as_deref())
            .bind(&message.message)
            .fetch_one(self.pool)
            .await?;
        Ok(row.into())
    }

    /// All messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ContactMessage>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM contact_message ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, ContactRow>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// The most recent unread messages.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_unread(&self, limit: i64) -> Result<Vec<ContactMessage>, RepositoryError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM contact_message WHERE NOT is_read \
             ORDER BY created_at DESC LIMIT $1"
        );
        let rows = sqlx::query_as::<_, ContactRow>(&sql)
            .bind(limit)
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Mark a message read. Returns `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self), fields(contact_id = %id))]
    pub async fn mark_read(&self, id: ContactId) -> Result<Option<ContactMessage>, RepositoryError> {
        let sql = format!(
            "UPDATE contact_message SET is_read = TRUE WHERE id = $1 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ContactRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn mark_all_read(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("UPDATE contact_message SET is_read = TRUE WHERE NOT is_read")
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    #[instrument(skip(self), fields(contact_id = %id))]
    pub async fn delete(&self, id: ContactId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM contact_message WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
