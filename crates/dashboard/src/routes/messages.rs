//! Staff inbox.

use axum::{
    Json,
    extract::{Path, State},
};

use streamline_core::ContactMessageId;

use crate::error::Result;
use crate::middleware::RequireSession;
use crate::models::ContactMessage;
use crate::state::AppState;

/// GET /api/messages
///
/// # Errors
///
/// Returns 403 for customers.
pub async fn list(
    State(state): State<AppState>,
    RequireSession(ctx): RequireSession,
) -> Result<Json<Vec<ContactMessage>>> {
    Ok(Json(state.inbox().list(&ctx).await?))
}

/// POST /api/messages/{id}/read
///
/// # Errors
///
/// Returns 403 for customers and 404 for a missing message.
pub async fn mark_read(
    State(state): State<AppState>,
    RequireSession(ctx): RequireSession,
    Path(id): Path<ContactMessageId>,
) -> Result<Json<ContactMessage>> {
    Ok(Json(state.inbox().mark_read(&ctx, id).await?))
}
