//! Contact inbox.

use serde::Deserialize;
use tracing::instrument;

use streamline_core::{ContactMessageId, Email, MessageStatus};

use super::ServiceError;
use crate::backend::{Backend, BackendError};
use crate::models::{ContactMessage, NewContactMessage, SessionContext};

/// Raw contact / quote form input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    pub message: String,
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

impl ContactForm {
    fn validate(&self) -> Result<NewContactMessage, ServiceError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("name is required".to_owned()));
        }
        let message = self.message.trim();
        if message.is_empty() {
            return Err(ServiceError::Validation("message is required".to_owned()));
        }
        let email =
            Email::parse(&self.email).map_err(|e| ServiceError::Validation(e.to_string()))?;

        Ok(NewContactMessage {
            name: name.to_owned(),
            email,
            phone: trimmed(self.phone.as_deref()),
            company: trimmed(self.company.as_deref()),
            service: trimmed(self.service.as_deref()),
            message: message.to_owned(),
        })
    }
}

/// Message counts shown to staff on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct InboxSummary {
    pub total: usize,
    pub unread: usize,
}

/// Contact message operations over a borrowed backend.
pub struct Inbox<'a> {
    backend: &'a dyn Backend,
}

impl<'a> Inbox<'a> {
    #[must_use]
    pub const fn new(backend: &'a dyn Backend) -> Self {
        Self { backend }
    }

    /// All messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Forbidden` for customers, regardless of what the
    /// inbox holds, or `ServiceError::Backend` if the read fails.
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id()))]
    pub async fn list(&self, ctx: &SessionContext) -> Result<Vec<ContactMessage>, ServiceError> {
        if !ctx.is_elevated() {
            return Err(ServiceError::Forbidden("reading the inbox"));
        }
        Ok(self.backend.list_contact_messages().await?)
    }

    /// # Errors
    ///
    /// Same as [`Inbox::list`].
    pub async fn summary(&self, ctx: &SessionContext) -> Result<InboxSummary, ServiceError> {
        let messages = self.list(ctx).await?;
        Ok(InboxSummary {
            total: messages.len(),
            unread: messages
                .iter()
                .filter(|m| m.status == MessageStatus::New)
                .count(),
        })
    }

    /// Store a public contact form submission with status `new`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if name, email or message is
    /// missing or malformed, or `ServiceError::Backend` if the insert fails.
    #[instrument(skip_all)]
    pub async fn submit(&self, form: &ContactForm) -> Result<ContactMessage, ServiceError> {
        let new = form.validate()?;
        let message = self.backend.insert_contact_message(new).await?;
        tracing::info!(message_id = %message.id, "contact message received");
        Ok(message)
    }

    /// # Errors
    ///
    /// - `ServiceError::Forbidden` if the caller is not staff or admin
    /// - `ServiceError::NotFound` if the message does not exist
    /// - `ServiceError::Backend` if the update fails
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id()))]
    pub async fn mark_read(
        &self,
        ctx: &SessionContext,
        id: ContactMessageId,
    ) -> Result<ContactMessage, ServiceError> {
        if !ctx.is_elevated() {
            return Err(ServiceError::Forbidden("updating the inbox"));
        }
        self.backend.mark_message_read(id).await.map_err(|e| match e {
            BackendError::NotFound => ServiceError::NotFound("message"),
            other => other.into(),
        })
    }
}
