//! HTTP handlers, one module per resource.

pub mod alerts;
pub mod auth;
pub mod inventory;
pub mod products;
pub mod warehouses;
