//! Admin account repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use royal_trust_core::AdminUserId;

use super::RepositoryError;
use crate::models::AdminUser;

const COLUMNS: &str = "id, username, password_hash, last_login, created_at";

#[derive(Debug, sqlx::FromRow)]
struct AdminUserRow {
    id: AdminUserId,
    username: String,
    password_hash: String,
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<AdminUserRow> for AdminUser {
    fn from(row: AdminUserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            last_login: row.last_login,
            created_at: row.created_at,
        }
    }
}

/// Repository for the admin account.
pub struct AdminUserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminUserRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get_by_username(&self, username: &str) -> Result<Option<AdminUser>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM admin_user WHERE username = $1");
        let row = sqlx::query_as::<_, AdminUserRow>(&sql)
            .bind(username)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Stamp the last successful login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account is gone.
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self), fields(admin_id = %id))]
    pub async fn record_login(&self, id: AdminUserId) -> Result<AdminUser, RepositoryError> {
        let sql = format!(
            "UPDATE admin_user SET last_login = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AdminUserRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;
        Ok(row.into())
    }

    /// Create the account or replace its password hash, and stamp the login.
    ///
    /// Used when the configured password has changed since the row was
    /// written.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    #[instrument(skip(self, password_hash))]
    pub async fn upsert_login(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<AdminUser, RepositoryError> {
        let sql = format!(
            "INSERT INTO admin_user (id, username, password_hash, last_login) \
             VALUES ($1, $2, $3, NOW()) \
             ON CONFLICT (username) DO UPDATE SET \
                password_hash = EXCLUDED.password_hash, \
                last_login = NOW() \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AdminUserRow>(&sql)
            .bind(AdminUserId::new())
            .bind(username)
            .bind(password_hash)
            .fetch_one(self.pool)
            .await?;
        Ok(row.into())
    }

    /// Insert the admin account only if no account exists yet.
    /// Returns `true` when a row was created.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, password_hash))]
    pub async fn ensure_default(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO admin_user (id, username, password_hash) \
             SELECT $1, $2, $3 \
             WHERE NOT EXISTS (SELECT 1 FROM admin_user)",
        )
        .bind(AdminUserId::new())
        .bind(username)
        .bind(password_hash)
        .execute(self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_user")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
