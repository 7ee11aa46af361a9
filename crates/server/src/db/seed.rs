//! Default data created on first start.
//!
//! Every step only writes when its table is empty, so seeding is safe to run
//! on each boot and from `rt-cli seed`.

use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::instrument;

use royal_trust_core::{BadgeColor, ProductCategory, offer_percentage};

use super::{
    AdminUserRepository, ProductRepository, RepositoryError, SettingsRepository, SliderRepository,
};
use crate::config::AdminCredentials;
use crate::models::{ColorVariant, NewProduct, NewSlider};
use crate::services::auth::{AuthError, hash_password};

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("failed to hash admin password: {0}")]
    Hash(#[from] AuthError),
}

/// What a seeding run created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub admin_created: bool,
    pub products_created: usize,
    pub sliders_created: usize,
}

const PLACEHOLDER_PANJABI: &str =
    "https://images.unsplash.com/photo-1596755094514-f87e34085b2c?w=800";
const PLACEHOLDER_TSHIRT: &str =
    "https://images.unsplash.com/photo-1503342394128-c104d54dba01?w=800";
const PLACEHOLDER_SLIDE: &str =
    "https://images.unsplash.com/photo-1596755094514-f87e34085b2c?w=1600";

fn sample_product(
    name: &str,
    category: ProductCategory,
    color: (&str, &str, &str),
    regular: i64,
    offer: i64,
) -> NewProduct {
    let regular_price = Decimal::from(regular);
    let offer_price = Decimal::from(offer);
    NewProduct {
        name: name.to_owned(),
        description: "উচ্চমানের কাপড়ে তৈরি, আরামদায়ক ও টেকসই।".to_owned(),
        colors: vec![ColorVariant {
            name: color.0.to_owned(),
            code: color.1.to_owned(),
            image: color.2.to_owned(),
        }],
        size: "M, L, XL, XXL".to_owned(),
        regular_price,
        offer_price,
        // Constant sample prices never overflow
        offer_percentage: offer_percentage(regular_price, offer_price).unwrap_or_default(),
        is_active: true,
        category: category.slug().to_owned(),
        features: vec!["প্রিমিয়াম কটন".to_owned(), "ক্যাশ অন ডেলিভারি".to_owned()],
        has_variants: true,
    }
}

fn sample_products() -> [NewProduct; 2] {
    [
        sample_product(
            "রয়েল ব্লু পাঞ্জাবি",
            ProductCategory::Panjabi,
            ("রয়েল ব্লু", "#4169E1", PLACEHOLDER_PANJABI),
            1890,
            1390,
        ),
        sample_product(
            "প্রিমিয়াম কটন টি-শার্ট",
            ProductCategory::Tshirt,
            ("কালো", "#000000", PLACEHOLDER_TSHIRT),
            990,
            690,
        ),
    ]
}

fn sample_slider() -> NewSlider {
    NewSlider {
        slide_number: 1,
        title: "রয়েল ট্রাস্ট BD".to_owned(),
        subtitle: "প্রিমিয়াম পাঞ্জাবি".to_owned(),
        description: "উচ্চমানের পাঞ্জাবি ও ফ্যাশনেবল পোশাক".to_owned(),
        image_url: PLACEHOLDER_SLIDE.to_owned(),
        badge_text: Some("সীমিত সময়ের অফার".to_owned()),
        badge_color: BadgeColor::Red,
        price: Some(Decimal::from(1390)),
        original_price: Some(Decimal::from(1890)),
        is_active: true,
    }
}

/// Create the admin account, settings row, sample products and sample
/// slider where they are missing.
///
/// # Errors
///
/// Returns `SeedError` if a query fails or the password cannot be hashed.
#[instrument(skip_all, fields(admin = %admin.username))]
pub async fn seed_defaults(
    pool: &PgPool,
    admin: &AdminCredentials,
) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    let admins = AdminUserRepository::new(pool);
    if admins.count().await? == 0 {
        let hash = hash_password(admin.password.expose_secret())?;
        report.admin_created = admins.ensure_default(&admin.username, &hash).await?;
    }

    SettingsRepository::new(pool).get_or_create().await?;

    let products = ProductRepository::new(pool);
    if products.count().await? == 0 {
        for product in &sample_products() {
            products.create(product).await?;
            report.products_created += 1;
        }
    }

    let sliders = SliderRepository::new(pool);
    if sliders.count().await? == 0 {
        sliders.create(&sample_slider()).await?;
        report.sliders_created += 1;
    }

    tracing::info!(
        admin_created = report.admin_created,
        products = report.products_created,
        sliders = report.sliders_created,
        "Seeding complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_products_are_consistent() {
        let [panjabi, tshirt] = sample_products();
        assert_eq!(panjabi.offer_percentage, 26);
        assert_eq!(panjabi.category, "panjabi");
        assert_eq!(tshirt.offer_percentage, 30);
        assert_eq!(tshirt.category, "tshirt");
        assert_eq!(
            ProductCategory::infer(&tshirt.name),
            ProductCategory::Tshirt
        );
    }

    #[test]
    fn test_sample_slider() {
        let slider = sample_slider();
        assert_eq!(slider.slide_number, 1);
        assert!(slider.price < slider.original_price);
    }
}
