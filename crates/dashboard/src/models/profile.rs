//! Profile domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use streamline_core::{Email, ProfileId, Role, UserId};

/// Per-user metadata carrying the role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub id: ProfileId,
    pub user_id: UserId,
    pub full_name: String,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Whether a (possibly missing) profile grants elevated access.
///
/// A user without a provisioned profile is treated like a customer.
#[must_use]
pub fn is_elevated(profile: Option<&Profile>) -> bool {
    profile.is_some_and(|p| p.role.is_elevated())
}

/// Login material for a user account.
///
/// Never serialized: the hash stays inside the auth service.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user_id: UserId,
    pub email: Email,
    pub password_hash: String,
}
