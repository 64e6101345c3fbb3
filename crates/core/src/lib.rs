//! Streamline Core - Shared domain types.
//!
//! This crate provides the types used across all Streamline components:
//! - `dashboard` - Shipment dashboard, tracking lookup and contact inbox
//! - `cli` - Command-line tools for migrations and user provisioning
//!
//! # Architecture
//!
//! The core crate contains only types and pure rules - no I/O, no database
//! access, no HTTP. Everything here can be unit tested without a backend.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, emails, tracking codes, weights, statuses and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
