//! Types stored in the admin session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use royal_trust_core::AdminUserId;

/// The logged-in admin, as remembered by the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's database ID.
    pub id: AdminUserId,
    /// Login name.
    pub username: String,
    /// When this session was established.
    pub logged_in_at: DateTime<Utc>,
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
