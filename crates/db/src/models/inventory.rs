//! Inventory entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::stock::MovementType;
use stockroom_core::types::{DbId, Timestamp};

/// A row from the `inventory` table: the on-hand quantity of one product at
/// one warehouse. At most one row exists per (warehouse_id, product_id) pair.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Inventory {
    pub id: DbId,
    pub warehouse_id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
    pub location_in_warehouse: Option<String>,
    pub last_updated: Timestamp,
}

/// An inventory row joined with the product and warehouse it refers to,
/// as returned by listing and export endpoints.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InventoryDetail {
    pub id: DbId,
    pub warehouse_id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
    pub location_in_warehouse: Option<String>,
    pub last_updated: Timestamp,
    pub product_sku: String,
    pub product_name: String,
    pub reorder_point: i32,
    pub optimal_stock: i32,
    pub warehouse_name: String,
}

/// Request DTO for `POST /inventory/adjust`.
///
/// `quantity` is a non-negative magnitude for incoming/outgoing movements and
/// the absolute target value for adjustments.
#[derive(Debug, Clone, Deserialize)]
pub struct AdjustStock {
    pub product_id: DbId,
    pub warehouse_id: DbId,
    pub quantity: i32,
    pub movement_type: MovementType,
    pub reason: Option<String>,
    pub location: Option<String>,
}

/// Optional predicates for inventory listing. All fields are ANDed.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct InventoryFilter {
    pub warehouse_id: Option<DbId>,
    pub product_id: Option<DbId>,
}
