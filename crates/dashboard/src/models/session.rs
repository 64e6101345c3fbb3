//! Session-related types.

use serde::{Deserialize, Serialize};

use streamline_core::{Email, Role, UserId};

use super::profile::{Profile, is_elevated};

/// Session-stored user identity.
///
/// Minimal data stored in the session cookie's backing record; the profile
/// (and therefore the role) is re-read on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: Email,
}

/// Per-request caller context passed explicitly to every service operation.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user: CurrentUser,
    pub profile: Option<Profile>,
}

impl SessionContext {
    #[must_use]
    pub const fn new(user: CurrentUser, profile: Option<Profile>) -> Self {
        Self { user, profile }
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user.id
    }

    /// Effective role; customers and unprovisioned users both map to `Customer`.
    #[must_use]
    pub fn role(&self) -> Role {
        self.profile.as_ref().map_or(Role::Customer, |p| p.role)
    }

    #[must_use]
    pub fn is_elevated(&self) -> bool {
        is_elevated(self.profile.as_ref())
    }

    /// Name to greet the user with, falling back to the login email.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.profile
            .as_ref()
            .map(|p| p.full_name.as_str())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.user.email.as_str())
    }
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
