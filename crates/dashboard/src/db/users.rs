//! User account repository.

use sqlx::PgPool;
use uuid::Uuid;

use streamline_core::{Email, Role, UserId};

use super::constraint_error;
use super::profiles::ProfileRow;
use crate::backend::BackendError;
use crate::models::{Profile, UserCredentials};

/// Fields for provisioning a new account.
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub email: &'a Email,
    pub password_hash: &'a str,
    pub full_name: &'a str,
    pub company_name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub role: Role,
}

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    id: Uuid,
    email: String,
    password_hash: String,
}

/// Repository for user accounts.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up login material by email.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Database` if the query fails.
    /// Returns `BackendError::DataCorruption` if the stored email is invalid.
    pub async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<UserCredentials>, BackendError> {
        let row: Option<CredentialsRow> =
            sqlx::query_as("SELECT id, email, password_hash FROM users WHERE email = $1")
                .bind(email.as_str())
                .fetch_optional(self.pool)
                .await?;

        row.map(|r| {
            let email = Email::parse(&r.email).map_err(|e| {
                BackendError::DataCorruption(format!("invalid email in database: {e}"))
            })?;
            Ok(UserCredentials {
                user_id: UserId::new(r.id),
                email,
                password_hash: r.password_hash,
            })
        })
        .transpose()
    }

    /// Look up a user ID by email.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Database` if the query fails.
    pub async fn find_id(&self, email: &Email) -> Result<Option<UserId>, BackendError> {
        let id: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
            .bind(email.as_str())
            .fetch_optional(self.pool)
            .await?;
        Ok(id.map(UserId::new))
    }

    /// Create a user and its profile in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Conflict` if the email already exists.
    /// Returns `BackendError::Database` for other database errors.
    pub async fn create_with_profile(&self, new: &NewUser<'_>) -> Result<Profile, BackendError> {
        let mut tx = self.pool.begin().await?;

        let user_id: Uuid = sqlx::query_scalar(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING id",
        )
        .bind(new.email.as_str())
        .bind(new.password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| constraint_error(e, "email", "user"))?;

        let row: ProfileRow = sqlx::query_as(
            r"
            INSERT INTO profiles (user_id, full_name, company_name, phone, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, full_name, company_name, phone, role, created_at
            ",
        )
        .bind(user_id)
        .bind(new.full_name)
        .bind(new.company_name)
        .bind(new.phone)
        .bind(new.role)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Profile::from(row))
    }
}
