//! Seed default data.
//!
//! Creates the admin account, the settings row, two sample products and a
//! sample slider, each only when its table is empty. The server does the
//! same at startup; this command is for fresh databases and CI.

use secrecy::SecretString;
use tracing::info;

use royal_trust_server::config::AdminCredentials;
use royal_trust_server::db::seed_defaults;

use super::{CommandError, connect, required_env};

/// # Errors
///
/// Returns an error if environment variables are missing or a database
/// operation fails.
pub async fn run() -> Result<(), CommandError> {
    let admin = AdminCredentials {
        username: required_env("ADMIN_USERNAME")?,
        password: SecretString::from(required_env("ADMIN_PASSWORD")?),
    };

    let pool = connect().await?;
    let report = seed_defaults(&pool, &admin).await?;

    info!("Seeding complete!");
    info!("  Admin created: {}", report.admin_created);
    info!("  Products created: {}", report.products_created);
    info!("  Sliders created: {}", report.sliders_created);

    Ok(())
}
