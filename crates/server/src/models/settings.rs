//! Site-wide storefront settings (a single row).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use royal_trust_core::DeliveryZone;

use super::{ValidationError, money};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteSettings {
    pub whatsapp_number: String,
    pub phone_number: String,
    pub footer_text: String,
    pub delivery_charge_inside_dhaka: Decimal,
    pub delivery_charge_outside_dhaka: Decimal,
    pub service_hours: String,
    pub home_page_title: String,
    pub order_form_title: String,
    pub updated_at: DateTime<Utc>,
}

impl WebsiteSettings {
    /// Delivery charge for an order shipping to `address`.
    #[must_use]
    pub fn delivery_charge_for(&self, address: &str) -> Decimal {
        match DeliveryZone::from_address(address) {
            DeliveryZone::InsideDhaka => self.delivery_charge_inside_dhaka,
            DeliveryZone::OutsideDhaka => self.delivery_charge_outside_dhaka,
        }
    }
}

/// Partial settings update from the admin panel.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub whatsapp_number: Option<String>,
    pub phone_number: Option<String>,
    pub footer_text: Option<String>,
    pub delivery_charge_inside_dhaka: Option<Decimal>,
    pub delivery_charge_outside_dhaka: Option<Decimal>,
    pub service_hours: Option<String>,
    pub home_page_title: Option<String>,
    pub order_form_title: Option<String>,
}

impl SettingsUpdate {
    /// Reject negative delivery charges.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` naming the offending charge.
    pub fn validate(self) -> Result<Self, ValidationError> {
        if let Some(charge) = self.delivery_charge_inside_dhaka {
            money(charge, "deliveryChargeInsideDhaka")?;
        }
        if let Some(charge) = self.delivery_charge_outside_dhaka {
            money(charge, "deliveryChargeOutsideDhaka")?;
        }
        Ok(self)
    }
}
