//! Warehouse entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::types::{DbId, Timestamp};

/// A row from the `warehouses` table.
///
/// Warehouses are soft-deleted: `is_active = false` hides them from listings
/// while keeping inventory history intact.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Warehouse {
    pub id: DbId,
    pub name: String,
    pub location: Option<String>,
    pub capacity: Option<i32>,
    pub manager_id: Option<DbId>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a warehouse.
#[derive(Debug, Deserialize)]
pub struct CreateWarehouse {
    pub name: String,
    pub location: Option<String>,
    pub capacity: Option<i32>,
    pub manager_id: Option<DbId>,
}

/// DTO for updating a warehouse. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateWarehouse {
    pub name: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<i32>,
    pub manager_id: Option<DbId>,
}

/// Aggregated figures for one warehouse, derived from its inventory rows.
#[derive(Debug, Clone, Serialize)]
pub struct WarehouseStats {
    /// Number of distinct products stocked in the warehouse.
    pub total_products: i64,
    /// Sum of on-hand quantities across all inventory rows.
    pub total_quantity: i64,
    /// Inventory rows at or below their product's reorder point.
    pub low_stock_items: i64,
    /// Percentage of capacity in use (0 when capacity is unset).
    pub utilization: i32,
}
