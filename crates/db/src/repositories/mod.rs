//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. Multi-statement flows (stock
//! adjustment, bulk resolve) open their own transaction internally and commit
//! atomically or not at all.

pub mod alert_repo;
pub mod inventory_repo;
pub mod product_repo;
pub mod stock_movement_repo;
pub mod user_repo;
pub mod warehouse_repo;

pub use alert_repo::AlertRepo;
pub use inventory_repo::{AdjustOutcome, InventoryRepo};
pub use product_repo::ProductRepo;
pub use stock_movement_repo::StockMovementRepo;
pub use user_repo::UserRepo;
pub use warehouse_repo::WarehouseRepo;
