//! Authentication error types.

use thiserror::Error;

use crate::backend::BackendError;

/// Errors that can occur during login and account provisioning.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] streamline_core::EmailError),

    /// Wrong password or unknown account; the two are not distinguished.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("password validation failed: {0}")]
    WeakPassword(String),

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("password hashing error")]
    PasswordHash,
}
