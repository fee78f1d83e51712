//! Repository for the `inventory` table, including the stock-adjustment flow.
//!
//! `adjust` is the only write path for inventory quantities. It runs as one
//! transaction: row-locked read, quantity computation, upsert, movement
//! append, and alert derivation all commit together or not at all.

use sqlx::{PgPool, Postgres, Transaction};
use stockroom_core::alerts::{evaluate_thresholds, ProductThresholds};
use stockroom_core::stock::apply_movement;
use stockroom_core::error::CoreError;
use stockroom_core::types::DbId;

use crate::models::alert::Alert;
use crate::models::inventory::{AdjustStock, Inventory, InventoryDetail, InventoryFilter};
use crate::models::stock_movement::StockMovement;
use crate::RepoError;

/// Column list for `inventory` queries.
const COLUMNS: &str = "id, warehouse_id, product_id, quantity, location_in_warehouse, last_updated";

/// Joined column list for detail queries (inventory + product + warehouse).
const DETAIL_COLUMNS: &str = "i.id, i.warehouse_id, i.product_id, i.quantity, \
    i.location_in_warehouse, i.last_updated, \
    p.sku AS product_sku, p.name AS product_name, p.reorder_point, p.optimal_stock, \
    w.name AS warehouse_name";

/// Column list for `alerts` inserts performed during adjustment.
const ALERT_COLUMNS: &str = "id, type, severity, message, inventory_id, warehouse_id, \
    is_resolved, resolved_at, resolved_by, created_at";

/// Everything one adjustment produced, returned so the caller can respond
/// with the inventory row and publish events for the side artifacts.
#[derive(Debug)]
pub struct AdjustOutcome {
    pub inventory: Inventory,
    pub movement: StockMovement,
    pub alerts: Vec<Alert>,
}

/// Provides read and adjustment operations for inventory.
pub struct InventoryRepo;

impl InventoryRepo {
    /// List inventory rows joined with product/warehouse, most recently
    /// updated first. Both filter fields are optional and ANDed.
    pub async fn list(
        pool: &PgPool,
        filter: &InventoryFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<InventoryDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} \
             FROM inventory i \
             JOIN products p ON p.id = i.product_id \
             JOIN warehouses w ON w.id = i.warehouse_id \
             WHERE ($1::uuid IS NULL OR i.warehouse_id = $1) \
               AND ($2::uuid IS NULL OR i.product_id = $2) \
             ORDER BY i.last_updated DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, InventoryDetail>(&query)
            .bind(filter.warehouse_id)
            .bind(filter.product_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total rows matching the same predicates as [`InventoryRepo::list`].
    pub async fn count(pool: &PgPool, filter: &InventoryFilter) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM inventory \
             WHERE ($1::uuid IS NULL OR warehouse_id = $1) \
               AND ($2::uuid IS NULL OR product_id = $2)",
        )
        .bind(filter.warehouse_id)
        .bind(filter.product_id)
        .fetch_one(pool)
        .await
    }

    /// Inventory rows at or below their product's reorder point.
    pub async fn low_stock(pool: &PgPool) -> Result<Vec<InventoryDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} \
             FROM inventory i \
             JOIN products p ON p.id = i.product_id \
             JOIN warehouses w ON w.id = i.warehouse_id \
             WHERE i.quantity <= p.reorder_point \
             ORDER BY i.quantity ASC"
        );
        sqlx::query_as::<_, InventoryDetail>(&query)
            .fetch_all(pool)
            .await
    }

    /// Inventory rows above their product's overstock threshold
    /// (optimal_stock * 1.5, exclusive).
    pub async fn overstock(pool: &PgPool) -> Result<Vec<InventoryDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} \
             FROM inventory i \
             JOIN products p ON p.id = i.product_id \
             JOIN warehouses w ON w.id = i.warehouse_id \
             WHERE 2 * i.quantity > 3 * p.optimal_stock \
             ORDER BY i.quantity DESC"
        );
        sqlx::query_as::<_, InventoryDetail>(&query)
            .fetch_all(pool)
            .await
    }

    /// All inventory rows joined with product/warehouse, for CSV export.
    pub async fn export(pool: &PgPool, limit: i64) -> Result<Vec<InventoryDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} \
             FROM inventory i \
             JOIN products p ON p.id = i.product_id \
             JOIN warehouses w ON w.id = i.warehouse_id \
             ORDER BY w.name ASC, p.name ASC \
             LIMIT $1"
        );
        sqlx::query_as::<_, InventoryDetail>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Find an inventory row by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Inventory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inventory WHERE id = $1");
        sqlx::query_as::<_, Inventory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply one stock movement to the (warehouse, product) pair.
    ///
    /// The whole flow commits atomically:
    ///
    /// 1. Ensure an inventory row exists (zero-quantity insert on first
    ///    contact) and lock it with `FOR UPDATE`, so concurrent adjustments
    ///    to the same key are linearized by the database.
    /// 2. Compute the new quantity ([`apply_movement`]); insufficient stock
    ///    rolls the transaction back with nothing written.
    /// 3. Update the row (quantity, `last_updated`, optional location).
    /// 4. Append the audit movement with `quantity_change = |quantity|`.
    /// 5. Derive alerts from the product's thresholds. A missing product is
    ///    non-fatal: alert evaluation is skipped silently.
    ///
    /// A nonexistent product or warehouse surfaces as a foreign-key database
    /// error; callers are expected to have validated the references.
    pub async fn adjust(
        pool: &PgPool,
        input: &AdjustStock,
        acting_user_id: DbId,
    ) -> Result<AdjustOutcome, RepoError> {
        // Reject malformed input before touching the database.
        if input.quantity < 0 {
            return Err(CoreError::Validation(
                "Quantity must be a non-negative integer".to_string(),
            )
            .into());
        }

        let mut tx = pool.begin().await?;

        // First contact with this (warehouse, product) pair creates the row
        // at quantity zero; the unique constraint serializes concurrent
        // first adjustments.
        sqlx::query(
            "INSERT INTO inventory (warehouse_id, product_id, quantity) \
             VALUES ($1, $2, 0) \
             ON CONFLICT (warehouse_id, product_id) DO NOTHING",
        )
        .bind(input.warehouse_id)
        .bind(input.product_id)
        .execute(&mut *tx)
        .await?;

        let locked_query = format!(
            "SELECT {COLUMNS} FROM inventory \
             WHERE warehouse_id = $1 AND product_id = $2 \
             FOR UPDATE"
        );
        let locked = sqlx::query_as::<_, Inventory>(&locked_query)
            .bind(input.warehouse_id)
            .bind(input.product_id)
            .fetch_one(&mut *tx)
            .await?;

        let previous_quantity = locked.quantity;
        let new_quantity = apply_movement(previous_quantity, input.movement_type, input.quantity)?;

        let update_query = format!(
            "UPDATE inventory SET \
                quantity = $2, \
                last_updated = NOW(), \
                location_in_warehouse = COALESCE($3, location_in_warehouse) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let inventory = sqlx::query_as::<_, Inventory>(&update_query)
            .bind(locked.id)
            .bind(new_quantity)
            .bind(&input.location)
            .fetch_one(&mut *tx)
            .await?;

        let movement = sqlx::query_as::<_, StockMovement>(
            "INSERT INTO stock_movements \
                (inventory_id, movement_type, quantity_change, previous_quantity, new_quantity, reason, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, inventory_id, movement_type, quantity_change, previous_quantity, \
                       new_quantity, reason, user_id, created_at",
        )
        .bind(inventory.id)
        .bind(input.movement_type.as_str())
        .bind(input.quantity)
        .bind(previous_quantity)
        .bind(new_quantity)
        .bind(&input.reason)
        .bind(acting_user_id)
        .fetch_one(&mut *tx)
        .await?;

        let alerts =
            derive_alerts(&mut tx, &inventory, previous_quantity, new_quantity).await?;

        tx.commit().await?;

        tracing::debug!(
            inventory_id = %inventory.id,
            previous_quantity,
            new_quantity,
            alerts = alerts.len(),
            "stock adjustment committed"
        );

        Ok(AdjustOutcome {
            inventory,
            movement,
            alerts,
        })
    }
}

/// Evaluate the alert-trigger policy and insert one row per firing.
///
/// A product that cannot be found skips evaluation silently; an alert is a
/// best-effort side artifact and its absence is tolerable.
async fn derive_alerts(
    tx: &mut Transaction<'_, Postgres>,
    inventory: &Inventory,
    previous_quantity: i32,
    new_quantity: i32,
) -> Result<Vec<Alert>, sqlx::Error> {
    let product: Option<(String, i32, i32)> = sqlx::query_as(
        "SELECT name, reorder_point, optimal_stock FROM products WHERE id = $1",
    )
    .bind(inventory.product_id)
    .fetch_optional(&mut **tx)
    .await?;

    let Some((name, reorder_point, optimal_stock)) = product else {
        return Ok(Vec::new());
    };

    let drafts = evaluate_thresholds(
        &name,
        previous_quantity,
        new_quantity,
        ProductThresholds {
            reorder_point,
            optimal_stock,
        },
    );

    let mut alerts = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let insert_query = format!(
            "INSERT INTO alerts (type, severity, message, inventory_id, warehouse_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {ALERT_COLUMNS}"
        );
        let alert = sqlx::query_as::<_, Alert>(&insert_query)
            .bind(draft.alert_type.as_str())
            .bind(draft.severity.as_str())
            .bind(&draft.message)
            .bind(inventory.id)
            .bind(inventory.warehouse_id)
            .fetch_one(&mut **tx)
            .await?;
        alerts.push(alert);
    }

    Ok(alerts)
}
