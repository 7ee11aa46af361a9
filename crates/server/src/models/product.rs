//! Product catalogue types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use royal_trust_core::{ProductCategory, ProductId, offer_percentage};

use super::{ValidationError, money, optional_text, required_text, updated_text};

/// One colour option of a product, with its photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorVariant {
    /// Display name, e.g. "রয়েল ব্লু".
    pub name: String,
    /// CSS colour code, e.g. `#4169E1`.
    pub code: String,
    /// Photo URL.
    #[serde(default)]
    pub image: String,
}

/// A product as stored and served.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub colors: Vec<ColorVariant>,
    pub size: String,
    pub regular_price: Decimal,
    pub offer_price: Decimal,
    pub offer_percentage: i32,
    pub is_active: bool,
    pub category: String,
    pub features: Vec<String>,
    pub has_variants: bool,
    pub created_at: DateTime<Utc>,
}

/// Colour variant as submitted by the admin panel.
///
/// `image_file` carries a freshly picked photo as a data URI; it is uploaded
/// and replaces `image`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_file: Option<String>,
}

impl ColorInput {
    /// The data URI to upload, if one was attached.
    #[must_use]
    pub fn pending_upload(&self) -> Option<&str> {
        self.image_file
            .as_deref()
            .filter(|f| f.starts_with("data:"))
    }

    /// Finish the variant, preferring a freshly uploaded URL.
    #[must_use]
    pub fn into_variant(self, uploaded: Option<String>) -> ColorVariant {
        ColorVariant {
            name: self.name,
            code: self.code,
            image: uploaded.or(self.image).unwrap_or_default(),
        }
    }
}

/// Create or update payload for a product.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub colors: Option<Vec<ColorInput>>,
    pub size: Option<String>,
    pub regular_price: Option<Decimal>,
    pub offer_price: Option<Decimal>,
    pub offer_percentage: Option<i32>,
    pub is_active: Option<bool>,
    pub category: Option<String>,
    pub features: Option<Vec<String>>,
    pub has_variants: Option<bool>,
}

/// A validated product ready to insert.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub colors: Vec<ColorVariant>,
    pub size: String,
    pub regular_price: Decimal,
    pub offer_price: Decimal,
    pub offer_percentage: i32,
    pub is_active: bool,
    pub category: String,
    pub features: Vec<String>,
    pub has_variants: bool,
}

/// A validated partial update. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub colors: Option<Vec<ColorVariant>>,
    pub size: Option<String>,
    pub regular_price: Option<Decimal>,
    pub offer_price: Option<Decimal>,
    pub offer_percentage: Option<i32>,
    pub is_active: Option<bool>,
    pub category: Option<String>,
    pub features: Option<Vec<String>>,
    pub has_variants: Option<bool>,
}

fn clean_features(features: Vec<String>) -> Vec<String> {
    features
        .into_iter()
        .map(|f| f.trim().to_owned())
        .filter(|f| !f.is_empty())
        .collect()
}

fn percentage_for(regular: Decimal, offer: Decimal) -> Result<i32, ValidationError> {
    offer_percentage(regular, offer)
        .map_err(|_| ValidationError("offerPrice is out of range for regularPrice".into()))
}

impl ProductInput {
    /// Validate a create request.
    ///
    /// `colors` are the variants after any image uploads. A missing
    /// category is inferred from the name and a missing offer percentage is
    /// computed from the two prices.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when a required field is missing or a
    /// price is negative.
    pub fn into_new(self, colors: Vec<ColorVariant>) -> Result<NewProduct, ValidationError> {
        let name = required_text(self.name, "name")?;
        let description = required_text(self.description, "description")?;
        let size = required_text(self.size, "size")?;
        let regular_price = money(
            self.regular_price
                .ok_or_else(|| ValidationError::required("regularPrice"))?,
            "regularPrice",
        )?;
        let offer_price = money(
            self.offer_price
                .ok_or_else(|| ValidationError::required("offerPrice"))?,
            "offerPrice",
        )?;

        let category = optional_text(self.category)
            .unwrap_or_else(|| ProductCategory::infer(&name).slug().to_owned());
        let offer_percentage = match self.offer_percentage {
            Some(pct) => pct,
            None => percentage_for(regular_price, offer_price)?,
        };

        Ok(NewProduct {
            name,
            description,
            colors,
            size,
            regular_price,
            offer_price,
            offer_percentage,
            is_active: self.is_active.unwrap_or(true),
            category,
            features: clean_features(self.features.unwrap_or_default()),
            has_variants: self.has_variants.unwrap_or(true),
        })
    }

    /// Validate an update request against the stored product.
    ///
    /// When either price changes and no percentage is given, the percentage
    /// is recomputed from the resulting prices.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when a text field is blanked or a price is
    /// negative.
    pub fn into_update(
        self,
        colors: Option<Vec<ColorVariant>>,
        existing: &Product,
    ) -> Result<ProductUpdate, ValidationError> {
        let regular_price = self
            .regular_price
            .map(|p| money(p, "regularPrice"))
            .transpose()?;
        let offer_price = self
            .offer_price
            .map(|p| money(p, "offerPrice"))
            .transpose()?;

        let prices_changed = regular_price.is_some() || offer_price.is_some();
        let offer_percentage = match self.offer_percentage {
            Some(pct) => Some(pct),
            None if prices_changed => Some(percentage_for(
                regular_price.unwrap_or(existing.regular_price),
                offer_price.unwrap_or(existing.offer_price),
            )?),
            None => None,
        };

        Ok(ProductUpdate {
            name: updated_text(self.name, "name")?,
            description: updated_text(self.description, "description")?,
            colors,
            size: updated_text(self.size, "size")?,
            regular_price,
            offer_price,
            offer_percentage,
            is_active: self.is_active,
            category: optional_text(self.category),
            features: self.features.map(clean_features),
            has_variants: self.has_variants,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input() -> ProductInput {
        serde_json::from_value(serde_json::json!({
            "name": "Premium Cotton T-Shirt",
            "description": "Soft combed cotton",
            "size": "M, L, XL",
            "regularPrice": 990,
            "offerPrice": 690
        }))
        .unwrap()
    }

    fn stored() -> Product {
        Product {
            id: ProductId::new(),
            name: "Royal Blue Panjabi".into(),
            description: "Festive".into(),
            colors: vec![],
            size: "M, L".into(),
            regular_price: Decimal::from(1890),
            offer_price: Decimal::from(1390),
            offer_percentage: 26,
            is_active: true,
            category: "panjabi".into(),
            features: vec![],
            has_variants: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_into_new_fills_defaults() {
        let product = input().into_new(vec![]).unwrap();
        assert_eq!(product.category, "tshirt");
        assert_eq!(product.offer_percentage, 30);
        assert!(product.is_active);
        assert!(product.has_variants);
        assert!(product.features.is_empty());
    }

    #[test]
    fn test_into_new_keeps_explicit_values() {
        let mut raw = input();
        raw.category = Some("winter".into());
        raw.offer_percentage = Some(35);
        let product = raw.into_new(vec![]).unwrap();
        assert_eq!(product.category, "winter");
        assert_eq!(product.offer_percentage, 35);
    }

    #[test]
    fn test_into_new_requires_fields() {
        let mut raw = input();
        raw.size = None;
        assert_eq!(
            raw.into_new(vec![]).unwrap_err(),
            ValidationError("size is required".into())
        );

        let mut raw = input();
        raw.offer_price = Some(Decimal::from(-5));
        assert!(raw.into_new(vec![]).is_err());
    }

    #[test]
    fn test_into_new_rejects_unstorable_prices() {
        let mut raw = input();
        raw.regular_price = Some(Decimal::from_i128_with_scale(1, 28));
        assert_eq!(
            raw.into_new(vec![]).unwrap_err(),
            ValidationError("regularPrice can have at most 2 decimal places".into())
        );

        let mut raw = input();
        raw.offer_price = Some(Decimal::from(10_000_000_000_i64));
        assert_eq!(
            raw.into_new(vec![]).unwrap_err(),
            ValidationError("offerPrice cannot exceed 9999999999.99".into())
        );
    }

    #[test]
    fn test_into_new_rejects_percentage_overflow() {
        let mut raw = input();
        raw.regular_price = Some(Decimal::new(1, 2));
        raw.offer_price = Some(Decimal::new(999_999_999_999, 2));
        assert_eq!(
            raw.into_new(vec![]).unwrap_err(),
            ValidationError("offerPrice is out of range for regularPrice".into())
        );
    }

    #[test]
    fn test_update_recomputes_percentage_when_price_changes() {
        let update = ProductInput {
            offer_price: Some(Decimal::from(1512)),
            ..ProductInput::default()
        }
        .into_update(None, &stored())
        .unwrap();
        assert_eq!(update.offer_percentage, Some(20));
        assert!(update.name.is_none());
    }

    #[test]
    fn test_update_leaves_percentage_alone_otherwise() {
        let update = ProductInput {
            name: Some("Renamed".into()),
            ..ProductInput::default()
        }
        .into_update(None, &stored())
        .unwrap();
        assert_eq!(update.offer_percentage, None);
        assert_eq!(update.name.as_deref(), Some("Renamed"));
    }

    #[test]
    fn test_color_input_prefers_upload() {
        let color: ColorInput = serde_json::from_value(serde_json::json!({
            "name": "Black",
            "code": "#000000",
            "image": "https://old.example/a.jpg",
            "imageFile": "data:image/png;base64,AAAA"
        }))
        .unwrap();
        assert!(color.pending_upload().is_some());
        let variant = color.into_variant(Some("https://new.example/b.jpg".into()));
        assert_eq!(variant.image, "https://new.example/b.jpg");
    }

    #[test]
    fn test_product_serializes_for_storefront() {
        let json = serde_json::to_value(stored()).unwrap();
        assert!(json.get("_id").is_some());
        assert_eq!(json["offerPercentage"], 26);
        assert_eq!(json["isActive"], true);
        assert!(json.get("regularPrice").unwrap().is_number());
    }
}
