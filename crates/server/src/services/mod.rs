//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Admin login against the configured credentials
//! - `media` - Image upload (media host, then local disk, then placeholder)
//! - `email` - New-order notifications over SMTP

pub mod auth;
pub mod email;
pub mod media;

pub use auth::{AuthError, AuthService};
pub use email::{EmailError, EmailService};
pub use media::{CloudinaryStatus, MediaError, MediaService};
