//! Service error types.

use thiserror::Error;

use streamline_core::ShipmentStatus;

use crate::backend::BackendError;

/// Errors returned by the shipment registry and the inbox.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input was missing or malformed; nothing was sent to the backend.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The caller's role does not allow the operation.
    #[error("{0} requires a staff or admin role")]
    Forbidden(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    /// The configured transition policy rejects this status change.
    #[error("cannot move shipment from {from} to {to}")]
    TransitionNotAllowed {
        from: ShipmentStatus,
        to: ShipmentStatus,
    },

    /// Every candidate tracking code collided with an existing one.
    #[error("could not allocate a unique tracking code after {0} attempts")]
    TrackingCodesExhausted(usize),

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}
