//! Identity and role resolution.

use tracing::instrument;

use streamline_core::UserId;

use super::ServiceError;
use crate::backend::Backend;
use crate::models::{CurrentUser, Profile, SessionContext};

/// Turns an authenticated user into a [`SessionContext`].
pub struct IdentityService<'a> {
    backend: &'a dyn Backend,
}

impl<'a> IdentityService<'a> {
    #[must_use]
    pub const fn new(backend: &'a dyn Backend) -> Self {
        Self { backend }
    }

    /// Fetch the profile for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no profile is provisioned, or
    /// `ServiceError::Backend` if the lookup fails.
    pub async fn profile(&self, user_id: UserId) -> Result<Profile, ServiceError> {
        self.backend
            .find_profile(user_id)
            .await?
            .ok_or(ServiceError::NotFound("profile"))
    }

    /// Build the caller context for a request.
    ///
    /// Never fails: a missing profile or a backend error both yield a
    /// context without elevated capabilities.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn resolve(&self, user: CurrentUser) -> SessionContext {
        match self.profile(user.id).await {
            Ok(profile) => SessionContext::new(user, Some(profile)),
            Err(ServiceError::NotFound(_)) => {
                tracing::debug!("no profile provisioned, treating as customer");
                SessionContext::new(user, None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "profile lookup failed, continuing without elevated access");
                SessionContext::new(user, None)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use streamline_core::{Email, Role};

    use super::*;
    use crate::backend::MemoryBackend;

    fn user(id: UserId) -> CurrentUser {
        CurrentUser {
            id,
            email: Email::parse("someone@example.com").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_resolve_staff_is_elevated() {
        let backend = MemoryBackend::new();
        let profile = backend
            .provision_user(
                Email::parse("staff@example.com").unwrap(),
                String::new(),
                "Sam Staff",
                Role::Staff,
            )
            .await
            .unwrap();

        let ctx = IdentityService::new(&backend)
            .resolve(user(profile.user_id))
            .await;
        assert!(ctx.is_elevated());
        assert_eq!(ctx.role(), Role::Staff);
        assert_eq!(ctx.display_name(), "Sam Staff");
    }

    #[tokio::test]
    async fn test_resolve_customer_is_not_elevated() {
        let backend = MemoryBackend::new();
        let profile = backend
            .provision_user(
                Email::parse("buyer@example.com").unwrap(),
                String::new(),
                "Bea Buyer",
                Role::Customer,
            )
            .await
            .unwrap();

        let ctx = IdentityService::new(&backend)
            .resolve(user(profile.user_id))
            .await;
        assert!(!ctx.is_elevated());
    }

    #[tokio::test]
    async fn test_missing_profile_degrades_to_customer() {
        let backend = MemoryBackend::new();
        let identity = IdentityService::new(&backend);
        let id = UserId::generate();

        assert!(matches!(
            identity.profile(id).await,
            Err(ServiceError::NotFound("profile"))
        ));

        let ctx = identity.resolve(user(id)).await;
        assert!(ctx.profile.is_none());
        assert!(!ctx.is_elevated());
        assert_eq!(ctx.role(), Role::Customer);
        assert_eq!(ctx.display_name(), "someone@example.com");
    }
}
