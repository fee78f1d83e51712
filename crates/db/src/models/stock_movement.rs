//! Stock movement entity models.

use serde::Serialize;
use sqlx::FromRow;
use stockroom_core::types::{DbId, Timestamp};

/// A row from the append-only `stock_movements` table.
///
/// Invariant: `new_quantity - previous_quantity` is consistent with
/// `movement_type` and `quantity_change`; rows are never mutated or deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StockMovement {
    pub id: DbId,
    pub inventory_id: DbId,
    pub movement_type: String,
    pub quantity_change: i32,
    pub previous_quantity: i32,
    pub new_quantity: i32,
    pub reason: Option<String>,
    pub user_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// A movement joined with its product and acting user, for the trends view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovementDetail {
    pub id: DbId,
    pub inventory_id: DbId,
    pub movement_type: String,
    pub quantity_change: i32,
    pub previous_quantity: i32,
    pub new_quantity: i32,
    pub reason: Option<String>,
    pub created_at: Timestamp,
    pub product_name: String,
    pub product_sku: String,
    pub warehouse_id: DbId,
    pub user_full_name: Option<String>,
}
