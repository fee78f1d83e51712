//! In-process domain-event plumbing for the warehouse backend.
//!
//! - [`EventBus`] -- publish/subscribe hub backed by `tokio::sync::broadcast`.
//! - [`DomainEvent`] -- the canonical event envelope.
//!
//! Handlers publish after their database work commits; delivery is
//! best-effort and never affects the request outcome.

pub mod bus;

pub use bus::{DomainEvent, EventBus};
