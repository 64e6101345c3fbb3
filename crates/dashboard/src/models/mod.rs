//! Domain models for the dashboard.
//!
//! These types represent validated domain objects, separate from the row
//! types the Postgres backend decodes.

pub mod contact_message;
pub mod profile;
pub mod session;
pub mod shipment;

pub use contact_message::{ContactMessage, NewContactMessage};
pub use profile::{Profile, UserCredentials, is_elevated};
pub use session::{CurrentUser, SessionContext, session_keys};
pub use shipment::{NewShipment, Shipment, ShipmentQuery, StatusUpdate};
