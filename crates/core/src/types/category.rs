//! Product categories and category slugs.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The built-in apparel categories the storefront knows how to display.
///
/// Products store their category as a free slug so admins can add new
/// categories; these are the slugs used when a product arrives without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    #[default]
    Panjabi,
    Tshirt,
    ThreePiece,
    Fitness,
}

/// Keyword table for [`ProductCategory::infer`], checked top to bottom.
const KEYWORDS: &[(ProductCategory, &[&str])] = &[
    (
        ProductCategory::ThreePiece,
        &["three piece", "three-piece", "3 piece", "থ্রি পিস"],
    ),
    (
        ProductCategory::Tshirt,
        &["t-shirt", "tshirt", "t shirt", "টি-শার্ট"],
    ),
    (
        ProductCategory::Fitness,
        &["fitness", "gym", "sports", "ফিটনেস"],
    ),
    (
        ProductCategory::Panjabi,
        &["panjabi", "punjabi", "পাঞ্জাবি"],
    ),
];

impl ProductCategory {
    /// Guess a category from a product name.
    ///
    /// Matching is a case-insensitive substring search. Names that match
    /// nothing fall back to [`ProductCategory::Panjabi`], the shop's
    /// flagship line.
    ///
    /// ```
    /// use royal_trust_core::ProductCategory;
    ///
    /// assert_eq!(ProductCategory::infer("Premium Cotton T-Shirt"), ProductCategory::Tshirt);
    /// assert_eq!(ProductCategory::infer("রয়েল ব্লু পাঞ্জাবি"), ProductCategory::Panjabi);
    /// ```
    #[must_use]
    pub fn infer(name: &str) -> Self {
        let name = name.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| name.contains(w)))
            .map_or(Self::Panjabi, |(category, _)| *category)
    }

    /// The slug stored on products of this category.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Panjabi => "panjabi",
            Self::Tshirt => "tshirt",
            Self::ThreePiece => "three-piece",
            Self::Fitness => "fitness",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Errors from [`validate_slug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug cannot be empty")]
    Empty,
    #[error("slug must be at most {max} characters")]
    TooLong { max: usize },
    #[error("slug may contain only lowercase letters, digits and '-'")]
    InvalidCharacter,
}

/// Maximum slug length.
pub const MAX_SLUG_LENGTH: usize = 64;

/// Check that a category slug is non-empty and uses only `[a-z0-9-]`.
///
/// # Errors
///
/// Returns [`SlugError`] naming the rule that failed.
pub fn validate_slug(slug: &str) -> Result<(), SlugError> {
    if slug.is_empty() {
        return Err(SlugError::Empty);
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(SlugError::TooLong {
            max: MAX_SLUG_LENGTH,
        });
    }
    if !slug
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    {
        return Err(SlugError::InvalidCharacter);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_english_names() {
        assert_eq!(ProductCategory::infer("Royal Blue Panjabi"), ProductCategory::Panjabi);
        assert_eq!(ProductCategory::infer("Classic TSHIRT"), ProductCategory::Tshirt);
        assert_eq!(ProductCategory::infer("Gym Shorts"), ProductCategory::Fitness);
        assert_eq!(ProductCategory::infer("Lawn 3 Piece Set"), ProductCategory::ThreePiece);
    }

    #[test]
    fn test_infer_bangla_names() {
        assert_eq!(
            ProductCategory::infer("প্রিমিয়াম কটন টি-শার্ট"),
            ProductCategory::Tshirt
        );
        assert_eq!(ProductCategory::infer("সুতি থ্রি পিস"), ProductCategory::ThreePiece);
        assert_eq!(ProductCategory::infer("ফিটনেস ট্র্যাকসুট"), ProductCategory::Fitness);
    }

    #[test]
    fn test_infer_order_and_fallback() {
        // Earlier rows win when several keywords match
        assert_eq!(
            ProductCategory::infer("Three Piece Panjabi Combo"),
            ProductCategory::ThreePiece
        );
        assert_eq!(ProductCategory::infer("Leather Belt"), ProductCategory::Panjabi);
        assert_eq!(ProductCategory::infer(""), ProductCategory::Panjabi);
    }

    #[test]
    fn test_slugs() {
        assert_eq!(ProductCategory::ThreePiece.slug(), "three-piece");
        assert_eq!(ProductCategory::Tshirt.to_string(), "tshirt");
    }

    #[test]
    fn test_validate_slug() {
        assert_eq!(validate_slug("winter-sale-2025"), Ok(()));
        assert_eq!(validate_slug(""), Err(SlugError::Empty));
        assert_eq!(validate_slug("Winter"), Err(SlugError::InvalidCharacter));
        assert_eq!(validate_slug("a b"), Err(SlugError::InvalidCharacter));
        assert!(matches!(
            validate_slug(&"a".repeat(65)),
            Err(SlugError::TooLong { .. })
        ));
    }
}
