//! Public contact / quote form.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::Serialize;

use streamline_core::{ContactMessageId, MessageStatus};

use crate::error::Result;
use crate::services::ContactForm;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ContactReceipt {
    pub id: ContactMessageId,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
}

/// POST /api/contact
///
/// # Errors
///
/// Returns 400 if name, email or message is missing or malformed.
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<(StatusCode, Json<ContactReceipt>)> {
    let message = state.inbox().submit(&form).await?;
    Ok((
        StatusCode::CREATED,
        Json(ContactReceipt {
            id: message.id,
            status: message.status,
            created_at: message.created_at,
        }),
    ))
}
