//! CLI command implementations.

pub mod migrate;
pub mod user;

use secrecy::SecretString;
use thiserror::Error;

/// Errors shared by commands that need the database.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] streamline_core::EmailError),

    #[error(transparent)]
    Auth(#[from] streamline_dashboard::services::AuthError),

    #[error(transparent)]
    Backend(#[from] streamline_dashboard::backend::BackendError),

    #[error("No user with email: {0}")]
    UnknownUser(String),
}

/// Read the dashboard database URL, falling back to `DATABASE_URL`.
fn database_url() -> Result<SecretString, CommandError> {
    dotenvy::dotenv().ok();

    std::env::var("STREAMLINE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("STREAMLINE_DATABASE_URL"))
}

async fn connect() -> Result<sqlx::PgPool, CommandError> {
    let url = database_url()?;
    tracing::info!("Connecting to dashboard database...");
    Ok(streamline_dashboard::db::create_pool(&url).await?)
}
