//! `PostgreSQL` backend.
//!
//! # Tables
//!
//! - `users` - Login accounts (email + argon2 password hash)
//! - `profiles` - One per user, carries the role
//! - `shipments` - Shipment registry
//! - `contact_messages` - Contact form submissions
//! - `tower_sessions.session` - Session storage (created by the session store)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/dashboard/migrations/` and run via:
//! ```bash
//! cargo run -p streamline-cli -- migrate
//! ```
//!
//! Queries are checked at runtime (`query_as` + `FromRow`), so the crate
//! builds without a live database.

pub mod contact_messages;
pub mod profiles;
pub mod shipments;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use streamline_core::{ContactMessageId, Email, ShipmentId, TrackingCode, UserId};

use crate::backend::{Backend, BackendError};
use crate::models::{
    ContactMessage, NewContactMessage, NewShipment, Profile, Shipment, ShipmentQuery,
    StatusUpdate, UserCredentials,
};

pub use contact_messages::ContactMessageRepository;
pub use profiles::ProfileRepository;
pub use shipments::ShipmentRepository;
pub use users::UserRepository;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map constraint violations on a write.
///
/// A unique violation becomes `Conflict` naming `unique`, a foreign key
/// violation becomes `UnknownReference` naming `reference`, and anything else
/// stays a `Database` error.
pub(crate) fn constraint_error(e: sqlx::Error, unique: &str, reference: &str) -> BackendError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation() {
            return BackendError::Conflict(format!("{unique} already exists"));
        }
        if db_err.is_foreign_key_violation() {
            return BackendError::UnknownReference(reference.to_owned());
        }
    }
    BackendError::Database(e)
}

/// [`Backend`] over a `PostgreSQL` pool.
#[derive(Clone)]
pub struct PgBackend {
    pool: PgPool,
}

impl PgBackend {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Backend for PgBackend {
    async fn ping(&self) -> Result<(), BackendError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<UserCredentials>, BackendError> {
        UserRepository::new(&self.pool).find_credentials(email).await
    }

    async fn find_profile(&self, user_id: UserId) -> Result<Option<Profile>, BackendError> {
        ProfileRepository::new(&self.pool).get_by_user(user_id).await
    }

    async fn list_shipments(&self, query: ShipmentQuery) -> Result<Vec<Shipment>, BackendError> {
        ShipmentRepository::new(&self.pool).list(query).await
    }

    async fn find_shipment(&self, id: ShipmentId) -> Result<Option<Shipment>, BackendError> {
        ShipmentRepository::new(&self.pool).get_by_id(id).await
    }

    async fn find_shipment_by_code(
        &self,
        code: &TrackingCode,
    ) -> Result<Option<Shipment>, BackendError> {
        ShipmentRepository::new(&self.pool).get_by_code(code).await
    }

    async fn tracking_code_exists(&self, code: &TrackingCode) -> Result<bool, BackendError> {
        ShipmentRepository::new(&self.pool).code_exists(code).await
    }

    async fn insert_shipment(&self, shipment: NewShipment) -> Result<Shipment, BackendError> {
        ShipmentRepository::new(&self.pool).create(&shipment).await
    }

    async fn update_shipment_status(
        &self,
        update: StatusUpdate,
    ) -> Result<Shipment, BackendError> {
        ShipmentRepository::new(&self.pool).update_status(update).await
    }

    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, BackendError> {
        ContactMessageRepository::new(&self.pool).list().await
    }

    async fn insert_contact_message(
        &self,
        message: NewContactMessage,
    ) -> Result<ContactMessage, BackendError> {
        ContactMessageRepository::new(&self.pool)
            .create(&message)
            .await
    }

    async fn mark_message_read(
        &self,
        id: ContactMessageId,
    ) -> Result<ContactMessage, BackendError> {
        ContactMessageRepository::new(&self.pool).mark_read(id).await
    }
}
