//! Customer reviews.
//!
//! Reviews are hidden from the storefront until an admin approves them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use royal_trust_core::{Rating, ReviewId};

use super::{ValidationError, required_text};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: ReviewId,
    pub name: String,
    pub location: String,
    pub rating: Rating,
    pub text: String,
    pub is_approved: bool,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Review form submission. `rating` is taken as a raw number so an
/// out-of-range value yields a validation message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    pub name: Option<String>,
    pub location: Option<String>,
    pub rating: Option<i64>,
    pub text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub name: String,
    pub location: String,
    pub rating: Rating,
    pub text: String,
}

impl ReviewInput {
    /// Validate a review submission.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for missing fields or a rating outside 1-5.
    pub fn into_new(self) -> Result<NewReview, ValidationError> {
        let name = required_text(self.name, "name")?;
        let location = required_text(self.location, "location")?;
        let text = required_text(self.text, "text")?;
        let rating = self
            .rating
            .ok_or_else(|| ValidationError::required("rating"))
            .and_then(|r| Rating::new(r).map_err(|e| ValidationError(e.to_string())))?;

        Ok(NewReview {
            name,
            location,
            rating,
            text,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input(rating: i64) -> ReviewInput {
        ReviewInput {
            name: Some("Karim".into()),
            location: Some("Chattogram".into()),
            rating: Some(rating),
            text: Some("দারুণ কাপড়".into()),
        }
    }

    #[test]
    fn test_valid_review() {
        let review = input(5).into_new().unwrap();
        assert_eq!(review.rating.get(), 5);
    }

    #[test]
    fn test_rating_out_of_range() {
        assert!(input(0).into_new().is_err());
        assert!(input(9).into_new().is_err());
    }

    #[test]
    fn test_missing_rating() {
        let mut raw = input(3);
        raw.rating = None;
        assert_eq!(
            raw.into_new().unwrap_err(),
            ValidationError("rating is required".into())
        );
    }
}
