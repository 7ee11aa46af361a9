//! Admin authentication service.
//!
//! There is exactly one admin, configured through `ADMIN_USERNAME` and
//! `ADMIN_PASSWORD`. The submitted pair is checked against the configuration;
//! the database row only tracks the argon2 hash and the last login.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::ExposeSecret;
use sqlx::PgPool;

use crate::config::AdminCredentials;
use crate::db::AdminUserRepository;
use crate::models::AdminUser;

/// Admin authentication service.
pub struct AuthService<'a> {
    admins: AdminUserRepository<'a>,
    credentials: &'a AdminCredentials,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool, credentials: &'a AdminCredentials) -> Self {
        Self {
            admins: AdminUserRepository::new(pool),
            credentials,
        }
    }

    /// Log the admin in.
    ///
    /// The stored hash is refreshed when it no longer matches the configured
    /// password, and the account row is created if it is missing.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the pair does not match the
    /// configuration.
    /// Returns `AuthError::Repository` if the account cannot be updated.
    pub async fn login(&self, username: &str, password: &str) -> Result<AdminUser, AuthError> {
        if !self.matches_configured(username, password) {
            tracing::warn!(username = %username, "Admin login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let existing = self.admins.get_by_username(username).await?;
        let admin = match existing {
            Some(admin) if verify_password(password, &admin.password_hash).is_ok() => {
                self.admins.record_login(admin.id).await?
            }
            _ => {
                let hash = hash_password(password)?;
                self.admins.upsert_login(username, &hash).await?
            }
        };

        tracing::info!(admin_id = %admin.id, "Admin logged in");
        Ok(admin)
    }

    fn matches_configured(&self, username: &str, password: &str) -> bool {
        !username.is_empty()
            && username == self.credentials.username
            && password == self.credentials.password.expose_secret()
    }
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub(crate) fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;

    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("hunter2hunter2").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter2hunter2", &hash).is_ok());
        assert!(verify_password("wrong", &hash).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_matches_configured() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/royal_trust_test")
            .unwrap();
        let credentials = AdminCredentials {
            username: "admin".into(),
            password: SecretString::from("hunter2hunter2"),
        };
        let service = AuthService::new(&pool, &credentials);

        assert!(service.matches_configured("admin", "hunter2hunter2"));
        assert!(!service.matches_configured("admin", "hunter2"));
        assert!(!service.matches_configured("root", "hunter2hunter2"));
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_pair_without_database() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/royal_trust_test")
            .unwrap();
        let credentials = AdminCredentials {
            username: "admin".into(),
            password: SecretString::from("hunter2hunter2"),
        };
        let service = AuthService::new(&pool, &credentials);

        let result = service.login("admin", "guess").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }
}
