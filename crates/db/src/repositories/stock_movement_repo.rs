//! Read-side repository for the append-only `stock_movements` table.
//!
//! Movement rows are only ever written inside the adjustment transaction in
//! [`crate::repositories::InventoryRepo::adjust`]; this repository exposes
//! the audit views.

use sqlx::PgPool;
use stockroom_core::types::DbId;

use crate::models::stock_movement::{MovementDetail, StockMovement};

/// Provides audit-trail queries for stock movements.
pub struct StockMovementRepo;

impl StockMovementRepo {
    /// Recent movements across all inventory, newest first, joined with
    /// product and acting-user context for the trends view.
    pub async fn trends(
        pool: &PgPool,
        days: i32,
        limit: i64,
    ) -> Result<Vec<MovementDetail>, sqlx::Error> {
        sqlx::query_as::<_, MovementDetail>(
            "SELECT m.id, m.inventory_id, m.movement_type, m.quantity_change, \
                    m.previous_quantity, m.new_quantity, m.reason, m.created_at, \
                    p.name AS product_name, p.sku AS product_sku, \
                    i.warehouse_id, u.full_name AS user_full_name \
             FROM stock_movements m \
             JOIN inventory i ON i.id = m.inventory_id \
             JOIN products p ON p.id = i.product_id \
             LEFT JOIN users u ON u.id = m.user_id \
             WHERE m.created_at >= NOW() - make_interval(days => $1) \
             ORDER BY m.created_at DESC \
             LIMIT $2",
        )
        .bind(days)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// All movements for one inventory row, newest first.
    pub async fn list_for_inventory(
        pool: &PgPool,
        inventory_id: DbId,
    ) -> Result<Vec<StockMovement>, sqlx::Error> {
        sqlx::query_as::<_, StockMovement>(
            "SELECT id, inventory_id, movement_type, quantity_change, previous_quantity, \
                    new_quantity, reason, user_id, created_at \
             FROM stock_movements \
             WHERE inventory_id = $1 \
             ORDER BY created_at DESC",
        )
        .bind(inventory_id)
        .fetch_all(pool)
        .await
    }
}
