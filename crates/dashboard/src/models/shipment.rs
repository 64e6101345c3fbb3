//! Shipment domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use streamline_core::{ShipmentId, ShipmentStatus, TrackingCode, UserId, Weight};

/// A shipment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shipment {
    pub id: ShipmentId,
    /// Customer-facing code; immutable once assigned.
    #[serde(rename = "tracking_id")]
    pub tracking_code: TrackingCode,
    /// Owning customer, used when list visibility is scoped per owner.
    pub customer_id: Option<UserId>,
    pub origin: String,
    pub destination: String,
    pub status: ShipmentStatus,
    pub service_type: String,
    pub weight: Weight,
    pub estimated_delivery: Option<NaiveDate>,
    pub actual_delivery: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload handed to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShipment {
    pub tracking_code: TrackingCode,
    pub customer_id: Option<UserId>,
    pub origin: String,
    pub destination: String,
    pub status: ShipmentStatus,
    pub service_type: String,
    pub weight: Weight,
    pub estimated_delivery: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Update payload handed to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    pub id: ShipmentId,
    pub status: ShipmentStatus,
    pub actual_delivery: Option<NaiveDate>,
}

/// Filter for listing shipments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShipmentQuery {
    /// Only shipments owned by this customer; `None` lists everything.
    pub customer_id: Option<UserId>,
}

impl ShipmentQuery {
    #[must_use]
    pub const fn all() -> Self {
        Self { customer_id: None }
    }

    #[must_use]
    pub const fn owned_by(customer_id: UserId) -> Self {
        Self {
            customer_id: Some(customer_id),
        }
    }

    #[must_use]
    pub fn matches(&self, shipment: &Shipment) -> bool {
        self.customer_id
            .is_none_or(|owner| shipment.customer_id == Some(owner))
    }
}
