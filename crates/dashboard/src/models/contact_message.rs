//! Contact / quote-request message types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use streamline_core::{ContactMessageId, Email, MessageStatus};

/// A message submitted through the public contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub company: Option<String>,
    /// Service the sender is asking a quote for, if they picked one.
    pub service: Option<String>,
    pub message: String,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
}

/// Validated contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: Option<String>,
    pub message: String,
}
