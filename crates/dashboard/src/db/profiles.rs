//! Profile repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use streamline_core::{ProfileId, Role, UserId};

use crate::backend::BackendError;
use crate::models::Profile;

#[derive(sqlx::FromRow)]
pub(super) struct ProfileRow {
    id: Uuid,
    user_id: Uuid,
    full_name: String,
    company_name: Option<String>,
    phone: Option<String>,
    role: Role,
    created_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(r: ProfileRow) -> Self {
        Self {
            id: ProfileId::new(r.id),
            user_id: UserId::new(r.user_id),
            full_name: r.full_name,
            company_name: r.company_name,
            phone: r.phone,
            role: r.role,
            created_at: r.created_at,
        }
    }
}

/// Repository for profile lookups.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the profile for a user, if one was provisioned.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Database` if the query fails.
    pub async fn get_by_user(&self, user_id: UserId) -> Result<Option<Profile>, BackendError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r"
            SELECT id, user_id, full_name, company_name, phone, role, created_at
            FROM profiles
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Profile::from))
    }

    /// Change a user's role.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` if the user has no profile.
    pub async fn set_role(&self, user_id: UserId, role: Role) -> Result<Profile, BackendError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r"
            UPDATE profiles SET role = $2
            WHERE user_id = $1
            RETURNING id, user_id, full_name, company_name, phone, role, created_at
            ",
        )
        .bind(user_id)
        .bind(role)
        .fetch_optional(self.pool)
        .await?;

        row.map(Profile::from).ok_or(BackendError::NotFound)
    }
}
