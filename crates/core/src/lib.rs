//! Pure domain logic for the Stockroom warehouse platform.
//!
//! This crate contains no IO: error taxonomy, quantity arithmetic for stock
//! movements, and the alert-trigger policy. Everything here is deterministic
//! and unit-testable without a database.

pub mod alerts;
pub mod error;
pub mod roles;
pub mod stock;
pub mod types;
