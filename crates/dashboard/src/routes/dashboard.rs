//! Session context and dashboard summary.

use axum::{Json, extract::State};
use serde::Serialize;

use streamline_core::{Role, UserId};

use crate::error::Result;
use crate::middleware::RequireSession;
use crate::models::{Profile, SessionContext};
use crate::services::inbox::InboxSummary;
use crate::services::registry::ShipmentSummary;
use crate::state::AppState;

/// The caller as the dashboard sees them.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub elevated: bool,
    pub profile: Option<Profile>,
}

impl From<&SessionContext> for MeResponse {
    fn from(ctx: &SessionContext) -> Self {
        Self {
            user_id: ctx.user_id(),
            email: ctx.user.email.to_string(),
            display_name: ctx.display_name().to_string(),
            role: ctx.role(),
            elevated: ctx.is_elevated(),
            profile: ctx.profile.clone(),
        }
    }
}

/// GET /api/me
pub async fn me(RequireSession(ctx): RequireSession) -> Json<MeResponse> {
    Json(MeResponse::from(&ctx))
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub title: &'static str,
    pub display_name: String,
    pub shipments: ShipmentSummary,
    /// Only present for staff and admins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<InboxSummary>,
}

/// GET /api/dashboard
///
/// # Errors
///
/// Returns 500 if the backend read fails.
pub async fn summary(
    State(state): State<AppState>,
    RequireSession(ctx): RequireSession,
) -> Result<Json<DashboardSummary>> {
    let shipments = state.registry().summary(&ctx).await?;
    let messages = if ctx.is_elevated() {
        Some(state.inbox().summary(&ctx).await?)
    } else {
        None
    };

    Ok(Json(DashboardSummary {
        title: if ctx.is_elevated() {
            "Admin Dashboard"
        } else {
            "My Dashboard"
        },
        display_name: ctx.display_name().to_string(),
        shipments,
        messages,
    }))
}
