//! Product categories managed from the admin panel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use royal_trust_core::{CategoryId, validate_slug};

use super::{ValidationError, optional_text, required_text, updated_text};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

fn checked_slug(slug: String) -> Result<String, ValidationError> {
    validate_slug(&slug).map_err(|e| ValidationError(e.to_string()))?;
    Ok(slug)
}

impl CategoryInput {
    /// # Errors
    ///
    /// Returns `ValidationError` for a missing name or slug, or a slug with
    /// characters outside `[a-z0-9-]`.
    pub fn into_new(self) -> Result<NewCategory, ValidationError> {
        Ok(NewCategory {
            name: required_text(self.name, "name")?,
            slug: checked_slug(required_text(self.slug, "slug")?)?,
            description: optional_text(self.description),
            image_url: optional_text(self.image_url),
            sort_order: self.sort_order.unwrap_or(0),
            is_active: self.is_active.unwrap_or(true),
        })
    }

    /// # Errors
    ///
    /// Returns `ValidationError` when the name is blanked or the new slug
    /// is invalid.
    pub fn into_update(self) -> Result<CategoryUpdate, ValidationError> {
        Ok(CategoryUpdate {
            name: updated_text(self.name, "name")?,
            slug: updated_text(self.slug, "slug")?.map(checked_slug).transpose()?,
            description: self.description.map(|d| d.trim().to_owned()),
            image_url: self.image_url.map(|u| u.trim().to_owned()),
            sort_order: self.sort_order,
            is_active: self.is_active,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_into_new() {
        let category = CategoryInput {
            name: Some("Three Piece".into()),
            slug: Some("three-piece".into()),
            ..CategoryInput::default()
        }
        .into_new()
        .unwrap();
        assert_eq!(category.sort_order, 0);
        assert!(category.is_active);
    }

    #[test]
    fn test_bad_slug() {
        let err = CategoryInput {
            name: Some("Winter".into()),
            slug: Some("Winter Sale".into()),
            ..CategoryInput::default()
        }
        .into_new()
        .unwrap_err();
        assert!(err.0.contains("slug"));
    }

    #[test]
    fn test_update_checks_slug() {
        let update = CategoryInput {
            slug: Some("UPPER".into()),
            ..CategoryInput::default()
        };
        assert!(update.into_update().is_err());
    }
}
