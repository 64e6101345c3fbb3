//! Core types for Streamline.
//!
//! This module provides type-safe wrappers for the logistics domain.

pub mod email;
pub mod id;
pub mod role;
pub mod status;
pub mod tracking;
pub mod weight;

pub use email::{Email, EmailError};
pub use id::*;
pub use role::Role;
pub use status::*;
pub use tracking::{TrackingCode, TrackingCodeError};
pub use weight::{Weight, WeightError};
