//! Streamline Dashboard library.
//!
//! Shipment registry, staff inbox and public tracking lookup behind a JSON
//! API. The binary in `main.rs` wires configuration, storage and telemetry;
//! everything else lives here so it can be exercised by tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
