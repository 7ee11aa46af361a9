//! Admin authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during admin login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password did not match the configured pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Argon2 failed to produce a hash.
    #[error("password hashing failed")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
