//! Storage backend contract.
//!
//! Every read and write the dashboard performs goes through [`Backend`], so
//! services never see a connection pool. Two implementations exist:
//!
//! - [`crate::db::PgBackend`] - `PostgreSQL` via sqlx (production)
//! - [`MemoryBackend`] - in-process tables (local development and tests)
//!
//! Ordering is part of the contract: list operations return rows newest
//! first by `created_at`.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use streamline_core::{ContactMessageId, Email, ShipmentId, TrackingCode, UserId};

use crate::models::{
    ContactMessage, NewContactMessage, NewShipment, Profile, Shipment, ShipmentQuery,
    StatusUpdate, UserCredentials,
};

pub use memory::MemoryBackend;

/// Errors that can occur during backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the backend is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate tracking code).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A foreign key points at a row that does not exist.
    #[error("unknown {0}")]
    UnknownReference(String),
}

/// Authenticated CRUD over profiles, shipments and contact messages.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Cheap connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), BackendError>;

    async fn find_credentials(&self, email: &Email)
    -> Result<Option<UserCredentials>, BackendError>;

    /// Profile for a user; `None` if none was provisioned.
    async fn find_profile(&self, user_id: UserId) -> Result<Option<Profile>, BackendError>;

    /// Shipments matching `query`, newest first.
    async fn list_shipments(&self, query: ShipmentQuery) -> Result<Vec<Shipment>, BackendError>;

    async fn find_shipment(&self, id: ShipmentId) -> Result<Option<Shipment>, BackendError>;

    async fn find_shipment_by_code(
        &self,
        code: &TrackingCode,
    ) -> Result<Option<Shipment>, BackendError>;

    async fn tracking_code_exists(&self, code: &TrackingCode) -> Result<bool, BackendError>;

    /// Insert a shipment.
    ///
    /// Fails with [`BackendError::Conflict`] if the tracking code is taken.
    async fn insert_shipment(&self, shipment: NewShipment) -> Result<Shipment, BackendError>;

    /// Persist a status change.
    ///
    /// Fails with [`BackendError::NotFound`] if the shipment does not exist.
    async fn update_shipment_status(&self, update: StatusUpdate)
    -> Result<Shipment, BackendError>;

    /// All contact messages, newest first.
    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, BackendError>;

    async fn insert_contact_message(
        &self,
        message: NewContactMessage,
    ) -> Result<ContactMessage, BackendError>;

    /// Fails with [`BackendError::NotFound`] if the message does not exist.
    async fn mark_message_read(&self, id: ContactMessageId)
    -> Result<ContactMessage, BackendError>;
}
