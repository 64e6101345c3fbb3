//! Public tracking lookup.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDate;
use serde::Serialize;

use streamline_core::{ShipmentStatus, TrackingCode};

use crate::error::Result;
use crate::models::Shipment;
use crate::state::AppState;

/// What an anonymous visitor may see about a shipment.
#[derive(Debug, Serialize)]
pub struct TrackingView {
    pub tracking_id: TrackingCode,
    pub status: ShipmentStatus,
    pub status_label: &'static str,
    pub origin: String,
    pub destination: String,
    pub service_type: String,
    pub estimated_delivery: Option<NaiveDate>,
    pub actual_delivery: Option<NaiveDate>,
}

impl From<Shipment> for TrackingView {
    fn from(s: Shipment) -> Self {
        Self {
            tracking_id: s.tracking_code,
            status: s.status,
            status_label: s.status.label(),
            origin: s.origin,
            destination: s.destination,
            service_type: s.service_type,
            estimated_delivery: s.estimated_delivery,
            actual_delivery: s.actual_delivery,
        }
    }
}

/// GET /api/track/{tracking_code}
///
/// # Errors
///
/// Returns 400 for a malformed code and 404 for an unknown one.
pub async fn track(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<TrackingView>> {
    let shipment = state.registry().track(&code).await?;
    Ok(Json(TrackingView::from(shipment)))
}
