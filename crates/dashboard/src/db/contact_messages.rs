//! Contact message repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use streamline_core::{ContactMessageId, Email, MessageStatus};

use crate::backend::BackendError;
use crate::models::{ContactMessage, NewContactMessage};

const MESSAGE_COLUMNS: &str =
    "id, name, email, phone, company, service, message, status, created_at";

#[derive(sqlx::FromRow)]
struct ContactMessageRow {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    company: Option<String>,
    service: Option<String>,
    message: String,
    status: MessageStatus,
    created_at: DateTime<Utc>,
}

impl TryFrom<ContactMessageRow> for ContactMessage {
    type Error = BackendError;

    fn try_from(r: ContactMessageRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&r.email).map_err(|e| {
            BackendError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: ContactMessageId::new(r.id),
            name: r.name,
            email,
            phone: r.phone,
            company: r.company,
            service: r.service,
            message: r.message,
            status: r.status,
            created_at: r.created_at,
        })
    }
}

/// Repository for the contact inbox.
pub struct ContactMessageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactMessageRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<ContactMessage>, BackendError> {
        let sql = format!(
            "SELECT {MESSAGE_COLUMNS} FROM contact_messages ORDER BY created_at DESC, id DESC"
        );
        let rows: Vec<ContactMessageRow> = sqlx::query_as(&sql).fetch_all(self.pool).await?;
        rows.into_iter().map(ContactMessage::try_from).collect()
    }

    /// # Errors
    ///
    /// Returns `BackendError::Database` if the insert fails.
    pub async fn create(&self, new: &NewContactMessage) -> Result<ContactMessage, BackendError> {
        let sql = format!(
            "INSERT INTO contact_messages (name, email, phone, company, service, message) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {MESSAGE_COLUMNS}"
        );
        let row: ContactMessageRow = sqlx::query_as(&sql)
            .bind(&new.name)
            .bind(new.email.as_str())
            .bind(new.phone.as_deref())
            .bind(new.company.as_deref())
            .bind(new.service.as_deref())
            .bind(&new.message)
            .fetch_one(self.pool)
            .await?;

        ContactMessage::try_from(row)
    }

    /// # Errors
    ///
    /// Returns `BackendError::NotFound` if no message has this ID.
    pub async fn mark_read(&self, id: ContactMessageId) -> Result<ContactMessage, BackendError> {
        let sql = format!(
            "UPDATE contact_messages SET status = 'read' WHERE id = $1 RETURNING {MESSAGE_COLUMNS}"
        );
        let row: Option<ContactMessageRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(ContactMessage::try_from)
            .transpose()?
            .ok_or(BackendError::NotFound)
    }
}
