//! Website settings repository. The table holds exactly one row.

use sqlx::PgPool;
use tracing::instrument;

use super::RepositoryError;
use crate::models::{SettingsUpdate, WebsiteSettings};

const COLUMNS: &str = "whatsapp_number, phone_number, footer_text, delivery_charge_inside_dhaka, \
                       delivery_charge_outside_dhaka, service_hours, home_page_title, \
                       order_form_title, updated_at";

pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Read the settings row, creating it with defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get_or_create(&self) -> Result<WebsiteSettings, RepositoryError> {
        sqlx::query("INSERT INTO website_settings (id) VALUES (1) ON CONFLICT (id) DO NOTHING")
            .execute(self.pool)
            .await?;

        let sql = format!("SELECT {COLUMNS} FROM website_settings WHERE id = 1");
        let settings = sqlx::query_as::<_, WebsiteSettings>(&sql)
            .fetch_one(self.pool)
            .await?;
        Ok(settings)
    }

    /// Apply a partial update and bump `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self, update))]
    pub async fn update(&self, update: &SettingsUpdate) -> Result<WebsiteSettings, RepositoryError> {
        self.get_or_create().await?;

        let sql = format!(
            "UPDATE website_settings SET \
                whatsapp_number = COALESCE($1, whatsapp_number), \
                phone_number = COALESCE($2, phone_number), \
                footer_text = COALESCE($3, footer_text), \
                delivery_charge_inside_dhaka = COALESCE($4, delivery_charge_inside_dhaka), \
                delivery_charge_outside_dhaka = COALESCE($5, delivery_charge_outside_dhaka), \
                service_hours = COALESCE($6, service_hours), \
                home_page_title = COALESCE($7, home_page_title), \
                order_form_title = COALESCE($8, order_form_title), \
                updated_at = NOW() \
             WHERE id = 1 \
             RETURNING {COLUMNS}"
        );
        let settings = sqlx::query_as::<_, WebsiteSettings>(&sql)
            .bind(update.whatsapp_number.as_deref())
            .bind(update.phone_number.as_deref())
            .bind(update.footer_text.as_deref())
            .bind(update.delivery_charge_inside_dhaka)
            .bind(update.delivery_charge_outside_dhaka)
            .bind(update.service_hours.as_deref())
            .bind(update.home_page_title.as_deref())
            .bind(update.order_form_title.as_deref())
            .fetch_one(self.pool)
            .await?;
        Ok(settings)
    }
}
