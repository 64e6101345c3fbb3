//! Business logic services.
//!
//! # Services
//!
//! - `identity` - Resolve a session user into a [`SessionContext`](crate::models::SessionContext)
//! - `registry` - Shipment list/create/status workflow and public tracking
//! - `inbox` - Contact form submissions and the staff inbox
//! - `auth` - Password login
//!
//! Services borrow the backend for the duration of one request and take the
//! caller's session context explicitly; none of them hold global state.

pub mod auth;
mod error;
pub mod identity;
pub mod inbox;
pub mod registry;

pub use auth::{AuthError, AuthService};
pub use error::ServiceError;
pub use identity::IdentityService;
pub use inbox::{ContactForm, Inbox};
pub use registry::{ShipmentForm, ShipmentRegistry, ShipmentVisibility};
