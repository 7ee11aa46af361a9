//! Contact form messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use royal_trust_core::{ContactId, Email};

use super::{ValidationError, optional_text, required_text};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(rename = "_id")]
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    pub email: Option<Email>,
    pub subject: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub phone: String,
    pub email: Option<Email>,
    pub subject: Option<String>,
    pub message: String,
}

impl ContactInput {
    /// # Errors
    ///
    /// Returns `ValidationError` for missing fields or a malformed email.
    pub fn into_new(self) -> Result<NewContactMessage, ValidationError> {
        let email = optional_text(self.email)
            .map(|e| Email::parse(&e).map_err(|err| ValidationError(err.to_string())))
            .transpose()?;

        Ok(NewContactMessage {
            name: required_text(self.name, "name")?,
            phone: required_text(self.phone, "phone")?,
            email,
            subject: optional_text(self.subject),
            message: required_text(self.message, "message")?,
        })
    }
}
