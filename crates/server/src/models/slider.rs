//! Homepage hero sliders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use royal_trust_core::{BadgeColor, SliderId};

use super::{ValidationError, money, optional_text, required_text, updated_text};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slider {
    #[serde(rename = "_id")]
    pub id: SliderId,
    pub slide_number: i32,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: String,
    pub badge_text: Option<String>,
    pub badge_color: BadgeColor,
    pub price: Option<Decimal>,
    pub original_price: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Create or update payload. `image_file` is a data URI that, when present,
/// is uploaded and replaces `image_url`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderInput {
    pub slide_number: Option<i32>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub image_file: Option<String>,
    pub badge_text: Option<String>,
    pub badge_color: Option<BadgeColor>,
    pub price: Option<Decimal>,
    pub original_price: Option<Decimal>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NewSlider {
    pub slide_number: i32,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: String,
    pub badge_text: Option<String>,
    pub badge_color: BadgeColor,
    pub price: Option<Decimal>,
    pub original_price: Option<Decimal>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SliderUpdate {
    pub slide_number: Option<i32>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub badge_text: Option<String>,
    pub badge_color: Option<BadgeColor>,
    pub price: Option<Decimal>,
    pub original_price: Option<Decimal>,
    pub is_active: Option<bool>,
}

fn optional_price(value: Option<Decimal>, field: &str) -> Result<Option<Decimal>, ValidationError> {
    value.map(|p| money(p, field)).transpose()
}

impl SliderInput {
    /// Take the attached image data URI, if any.
    pub fn take_image_file(&mut self) -> Option<String> {
        self.image_file.take().filter(|f| f.starts_with("data:"))
    }

    /// Validate a create request. `uploaded` is the URL of an image that
    /// was just uploaded from `image_file`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for missing fields or negative prices.
    pub fn into_new(self, uploaded: Option<String>) -> Result<NewSlider, ValidationError> {
        let slide_number = self
            .slide_number
            .ok_or_else(|| ValidationError::required("slideNumber"))?;
        Ok(NewSlider {
            slide_number,
            title: required_text(self.title, "title")?,
            subtitle: required_text(self.subtitle, "subtitle")?,
            description: required_text(self.description, "description")?,
            image_url: required_text(uploaded.or(self.image_url), "imageUrl")?,
            badge_text: optional_text(self.badge_text),
            badge_color: self.badge_color.unwrap_or_default(),
            price: optional_price(self.price, "price")?,
            original_price: optional_price(self.original_price, "originalPrice")?,
            is_active: self.is_active.unwrap_or(true),
        })
    }

    /// Validate an update request.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when a required text field is blanked or a
    /// price is negative.
    pub fn into_update(self, uploaded: Option<String>) -> Result<SliderUpdate, ValidationError> {
        Ok(SliderUpdate {
            slide_number: self.slide_number,
            title: updated_text(self.title, "title")?,
            subtitle: updated_text(self.subtitle, "subtitle")?,
            description: updated_text(self.description, "description")?,
            image_url: updated_text(uploaded.or(self.image_url), "imageUrl")?,
            badge_text: self.badge_text.map(|t| t.trim().to_owned()),
            badge_color: self.badge_color,
            price: optional_price(self.price, "price")?,
            original_price: optional_price(self.original_price, "originalPrice")?,
            is_active: self.is_active,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input() -> SliderInput {
        serde_json::from_value(serde_json::json!({
            "slideNumber": 2,
            "title": "ঈদ কালেকশন",
            "subtitle": "নতুন পাঞ্জাবি",
            "description": "সীমিত স্টক",
            "imageUrl": "https://images.example/eid.jpg",
            "badgeColor": "green",
            "price": 1590
        }))
        .unwrap()
    }

    #[test]
    fn test_into_new() {
        let slider = input().into_new(None).unwrap();
        assert_eq!(slider.slide_number, 2);
        assert_eq!(slider.badge_color, BadgeColor::Green);
        assert!(slider.is_active);
        assert_eq!(slider.original_price, None);
    }

    #[test]
    fn test_uploaded_image_wins() {
        let mut raw = input();
        raw.image_file = Some("data:image/webp;base64,UklGR".into());
        let file = raw.take_image_file();
        assert!(file.is_some());
        let slider = raw.into_new(Some("/uploads/sliders/x.webp".into())).unwrap();
        assert_eq!(slider.image_url, "/uploads/sliders/x.webp");
    }

    #[test]
    fn test_missing_image_url() {
        let mut raw = input();
        raw.image_url = None;
        assert_eq!(
            raw.into_new(None).unwrap_err(),
            ValidationError("imageUrl is required".into())
        );
    }

    #[test]
    fn test_update_only_touches_given_fields() {
        let update = SliderInput {
            is_active: Some(false),
            ..SliderInput::default()
        }
        .into_update(None)
        .unwrap();
        assert_eq!(update.is_active, Some(false));
        assert!(update.title.is_none());
        assert!(update.image_url.is_none());
    }
}
