//! User provisioning commands.
//!
//! The dashboard never creates accounts itself; every login and profile
//! comes from here.
//!
//! # Environment Variables
//!
//! - `STREAMLINE_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string

use streamline_core::{Email, Role};
use streamline_dashboard::db::{ProfileRepository, UserRepository, users::NewUser};
use streamline_dashboard::models::Profile;
use streamline_dashboard::services::auth::{hash_password, validate_password};

use super::{CommandError, connect};

/// Arguments for `user create`.
pub struct CreateUser<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub role: Role,
    pub password: &'a str,
    pub company: Option<&'a str>,
    pub phone: Option<&'a str>,
}

/// Create a user account together with its profile.
///
/// # Errors
///
/// Returns an error if the email or password is invalid, the email is
/// already registered, or the database is unreachable.
pub async fn create(args: &CreateUser<'_>) -> Result<Profile, CommandError> {
    let email = Email::parse(args.email)?;
    validate_password(args.password)?;
    let password_hash = hash_password(args.password)?;

    let pool = connect().await?;
    tracing::info!("Creating user: {} ({})", email, args.role);

    let profile = UserRepository::new(&pool)
        .create_with_profile(&NewUser {
            email: &email,
            password_hash: &password_hash,
            full_name: args.name.trim(),
            company_name: args.company,
            phone: args.phone,
            role: args.role,
        })
        .await?;

    tracing::info!(
        "User created successfully! ID: {}, Email: {}, Role: {}",
        profile.user_id,
        email,
        profile.role
    );
    Ok(profile)
}

/// Change the role on an existing user's profile.
///
/// # Errors
///
/// Returns `CommandError::UnknownUser` if no account has this email.
pub async fn set_role(email: &str, role: Role) -> Result<Profile, CommandError> {
    let email = Email::parse(email)?;
    let pool = connect().await?;

    let user_id = UserRepository::new(&pool)
        .find_id(&email)
        .await?
        .ok_or_else(|| CommandError::UnknownUser(email.to_string()))?;

    let profile = ProfileRepository::new(&pool).set_role(user_id, role).await?;
    tracing::info!("Role for {} is now {}", email, profile.role);
    Ok(profile)
}
