//! Shipment registry.
//!
//! Listing, creation and status changes for shipments, plus the public
//! tracking lookup. Every operation except [`ShipmentRegistry::track`] takes
//! the caller's [`SessionContext`]; writes require an elevated role.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use streamline_core::{
    ShipmentId, ShipmentStatus, TrackingCode, TransitionPolicy, UserId, Weight,
};

use super::ServiceError;
use crate::backend::{Backend, BackendError};
use crate::models::{NewShipment, SessionContext, Shipment, ShipmentQuery, StatusUpdate};

/// Service types offered on the quote form. The registry accepts any
/// non-empty value; these are the ones the UI suggests.
pub const SERVICE_TYPES: [&str; 4] = [
    "Express Freight",
    "Standard Shipping",
    "Warehousing",
    "Supply Chain",
];

/// Candidate tracking codes tried before giving up on a create.
pub const MAX_CODE_ATTEMPTS: usize = 8;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Who sees which shipments in the list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShipmentVisibility {
    /// Every signed-in user sees every shipment.
    #[default]
    Shared,
    /// Customers see only shipments whose `customer_id` is their own id.
    Owner,
}

#[derive(Debug, Error)]
#[error("invalid shipment visibility: {0:?}")]
pub struct ParseVisibilityError(String);

impl std::str::FromStr for ShipmentVisibility {
    type Err = ParseVisibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shared" => Ok(Self::Shared),
            "owner" => Ok(Self::Owner),
            _ => Err(ParseVisibilityError(s.to_owned())),
        }
    }
}

/// Raw shipment creation input, as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShipmentForm {
    pub origin: String,
    pub destination: String,
    pub service_type: String,
    pub weight: String,
    /// `YYYY-MM-DD`; blank means no estimate.
    #[serde(default)]
    pub estimated_delivery: Option<String>,
    #[serde(default)]
    pub customer_id: Option<UserId>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A validated form still waiting for its tracking code.
#[derive(Debug, Clone)]
struct ShipmentDraft {
    customer_id: Option<UserId>,
    origin: String,
    destination: String,
    service_type: String,
    weight: Weight,
    estimated_delivery: Option<NaiveDate>,
    notes: Option<String>,
}

impl ShipmentDraft {
    fn with_code(self, tracking_code: TrackingCode) -> NewShipment {
        NewShipment {
            tracking_code,
            customer_id: self.customer_id,
            origin: self.origin,
            destination: self.destination,
            status: ShipmentStatus::Pending,
            service_type: self.service_type,
            weight: self.weight,
            estimated_delivery: self.estimated_delivery,
            notes: self.notes,
        }
    }
}

fn required(field: &str, value: &str) -> Result<String, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_owned())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

impl ShipmentForm {
    fn validate(&self) -> Result<ShipmentDraft, ServiceError> {
        let origin = required("origin", &self.origin)?;
        let destination = required("destination", &self.destination)?;
        let service_type = required("service type", &self.service_type)?;
        let weight = Weight::parse(&self.weight)
            .map_err(|e| ServiceError::Validation(e.to_string()))?;
        let estimated_delivery = optional(self.estimated_delivery.as_deref())
            .map(|raw| {
                NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|_| {
                    ServiceError::Validation(format!(
                        "estimated delivery must be a YYYY-MM-DD date, got {raw:?}"
                    ))
                })
            })
            .transpose()?;

        Ok(ShipmentDraft {
            customer_id: self.customer_id,
            origin,
            destination,
            service_type,
            weight,
            estimated_delivery,
            notes: optional(self.notes.as_deref()),
        })
    }
}

/// Per-status shipment counts for the dashboard header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ShipmentSummary {
    pub total: usize,
    pub pending: usize,
    pub in_transit: usize,
    pub delivered: usize,
    pub delayed: usize,
}

impl ShipmentSummary {
    fn tally(shipments: &[Shipment]) -> Self {
        shipments.iter().fold(Self::default(), |mut acc, s| {
            acc.total += 1;
            match s.status {
                ShipmentStatus::Pending => acc.pending += 1,
                ShipmentStatus::InTransit => acc.in_transit += 1,
                ShipmentStatus::Delivered => acc.delivered += 1,
                ShipmentStatus::Delayed => acc.delayed += 1,
            }
            acc
        })
    }
}

type CodeSource<'a> = Box<dyn Fn() -> TrackingCode + Send + Sync + 'a>;

/// Shipment operations over a borrowed backend.
pub struct ShipmentRegistry<'a> {
    backend: &'a dyn Backend,
    policy: TransitionPolicy,
    visibility: ShipmentVisibility,
    codes: CodeSource<'a>,
}

impl<'a> ShipmentRegistry<'a> {
    /// Registry drawing tracking codes from the thread-local CSPRNG.
    #[must_use]
    pub fn new(
        backend: &'a dyn Backend,
        policy: TransitionPolicy,
        visibility: ShipmentVisibility,
    ) -> Self {
        Self::with_code_source(backend, policy, visibility, || {
            TrackingCode::generate(&mut rand::rng())
        })
    }

    /// Registry drawing tracking codes from `codes`.
    #[must_use]
    pub fn with_code_source(
        backend: &'a dyn Backend,
        policy: TransitionPolicy,
        visibility: ShipmentVisibility,
        codes: impl Fn() -> TrackingCode + Send + Sync + 'a,
    ) -> Self {
        Self {
            backend,
            policy,
            visibility,
            codes: Box::new(codes),
        }
    }

    fn query_for(&self, ctx: &SessionContext) -> ShipmentQuery {
        match self.visibility {
            ShipmentVisibility::Owner if !ctx.is_elevated() => {
                ShipmentQuery::owned_by(ctx.user_id())
            }
            _ => ShipmentQuery::all(),
        }
    }

    /// Shipments visible to the caller, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Backend` if the backend read fails.
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id()))]
    pub async fn list(&self, ctx: &SessionContext) -> Result<Vec<Shipment>, ServiceError> {
        Ok(self.backend.list_shipments(self.query_for(ctx)).await?)
    }

    /// Counts over the shipments visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Backend` if the backend read fails.
    pub async fn summary(&self, ctx: &SessionContext) -> Result<ShipmentSummary, ServiceError> {
        let shipments = self.list(ctx).await?;
        Ok(ShipmentSummary::tally(&shipments))
    }

    /// Create a shipment in `pending` with a fresh tracking code.
    ///
    /// # Errors
    ///
    /// - `ServiceError::Forbidden` if the caller is not staff or admin
    /// - `ServiceError::Validation` if a field is missing or malformed, or
    ///   `customer_id` names no provisioned user
    /// - `ServiceError::TrackingCodesExhausted` if every candidate code collided
    /// - `ServiceError::Backend` if the insert fails for another reason
    #[instrument(skip(self, ctx, form), fields(user_id = %ctx.user_id()))]
    pub async fn create(
        &self,
        ctx: &SessionContext,
        form: &ShipmentForm,
    ) -> Result<Shipment, ServiceError> {
        if !ctx.is_elevated() {
            return Err(ServiceError::Forbidden("creating shipments"));
        }
        let draft = form.validate()?;
        if let Some(customer_id) = draft.customer_id
            && self.backend.find_profile(customer_id).await?.is_none()
        {
            return Err(ServiceError::Validation("unknown customer".to_owned()));
        }

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = (self.codes)();
            if self.backend.tracking_code_exists(&code).await? {
                tracing::debug!(%code, attempt, "tracking code taken, drawing another");
                continue;
            }

            match self.backend.insert_shipment(draft.clone().with_code(code)).await {
                Ok(shipment) => {
                    tracing::info!(
                        shipment_id = %shipment.id,
                        tracking_code = %shipment.tracking_code,
                        "shipment created"
                    );
                    return Ok(shipment);
                }
                Err(BackendError::Conflict(reason)) => {
                    tracing::warn!(attempt, %reason, "tracking code collided on insert");
                }
                Err(BackendError::UnknownReference(what)) => {
                    return Err(ServiceError::Validation(format!("unknown {what}")));
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ServiceError::TrackingCodesExhausted(MAX_CODE_ATTEMPTS))
    }

    /// Parse a client-supplied status string.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for anything outside the status enum.
    pub fn parse_status(raw: &str) -> Result<ShipmentStatus, ServiceError> {
        raw.trim()
            .parse()
            .map_err(|e: streamline_core::ParseStatusError| ServiceError::Validation(e.to_string()))
    }

    /// Move a shipment to `status`.
    ///
    /// Entering `delivered` stamps today's date as the actual delivery date
    /// when none is recorded; leaving it clears the date.
    ///
    /// # Errors
    ///
    /// - `ServiceError::Forbidden` if the caller is not staff or admin
    /// - `ServiceError::NotFound` if the shipment does not exist
    /// - `ServiceError::TransitionNotAllowed` if the policy rejects the change
    /// - `ServiceError::Backend` if the update fails
    #[instrument(skip(self, ctx), fields(user_id = %ctx.user_id()))]
    pub async fn update_status(
        &self,
        ctx: &SessionContext,
        id: ShipmentId,
        status: ShipmentStatus,
    ) -> Result<Shipment, ServiceError> {
        if !ctx.is_elevated() {
            return Err(ServiceError::Forbidden("updating shipment status"));
        }

        let current = self
            .backend
            .find_shipment(id)
            .await?
            .ok_or(ServiceError::NotFound("shipment"))?;

        if !self.policy.allows(current.status, status) {
            return Err(ServiceError::TransitionNotAllowed {
                from: current.status,
                to: status,
            });
        }

        let actual_delivery = match status {
            ShipmentStatus::Delivered => current
                .actual_delivery
                .or_else(|| Some(Utc::now().date_naive())),
            _ => None,
        };

        let updated = self
            .backend
            .update_shipment_status(StatusUpdate {
                id,
                status,
                actual_delivery,
            })
            .await
            .map_err(|e| match e {
                BackendError::NotFound => ServiceError::NotFound("shipment"),
                other => other.into(),
            })?;

        tracing::info!(
            tracking_code = %updated.tracking_code,
            from = %current.status,
            to = %status,
            "shipment status updated"
        );
        Ok(updated)
    }

    /// Public lookup by tracking code; no session required.
    ///
    /// # Errors
    ///
    /// - `ServiceError::Validation` if `raw` is not a well-formed code
    /// - `ServiceError::NotFound` if no shipment carries the code
    /// - `ServiceError::Backend` if the lookup fails
    #[instrument(skip(self))]
    pub async fn track(&self, raw: &str) -> Result<Shipment, ServiceError> {
        let code =
            TrackingCode::parse(raw).map_err(|e| ServiceError::Validation(e.to_string()))?;
        self.backend
            .find_shipment_by_code(&code)
            .await?
            .ok_or(ServiceError::NotFound("shipment"))
    }
}
