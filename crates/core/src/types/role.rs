//! Profile roles.

use serde::{Deserialize, Serialize};

use super::status::ParseStatusError;

/// Role carried on a user profile.
///
/// Staff and admins are *elevated*: they may create shipments, change their
/// status, and read the contact inbox. Customers may only view shipments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "profile_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Customer,
    Staff,
    Admin,
}

impl Role {
    /// Whether this role grants write access and inbox visibility.
    #[must_use]
    pub const fn is_elevated(self) -> bool {
        matches!(self, Self::Staff | Self::Admin)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Staff => "staff",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "staff" => Ok(Self::Staff),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseStatusError::new("role", s)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_elevated() {
        assert!(!Role::Customer.is_elevated());
        assert!(Role::Staff.is_elevated());
        assert!(Role::Admin.is_elevated());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("staff".parse::<Role>().unwrap(), Role::Staff);
        assert!("super_admin".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
    }
}
