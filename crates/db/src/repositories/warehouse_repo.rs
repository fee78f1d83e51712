//! Repository for the `warehouses` table.

use sqlx::PgPool;
use stockroom_core::types::DbId;

use crate::models::warehouse::{CreateWarehouse, UpdateWarehouse, Warehouse, WarehouseStats};

/// Column list for `warehouses` queries.
const COLUMNS: &str = "id, name, location, capacity, manager_id, is_active, created_at";

/// Provides CRUD and stats operations for warehouses.
pub struct WarehouseRepo;

impl WarehouseRepo {
    /// Insert a new warehouse.
    pub async fn create(pool: &PgPool, input: &CreateWarehouse) -> Result<Warehouse, sqlx::Error> {
        let query = format!(
            "INSERT INTO warehouses (name, location, capacity, manager_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Warehouse>(&query)
            .bind(&input.name)
            .bind(&input.location)
            .bind(input.capacity)
            .bind(input.manager_id)
            .fetch_one(pool)
            .await
    }

    /// Find an active warehouse by ID. Soft-deleted warehouses are invisible.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Warehouse>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM warehouses WHERE id = $1 AND is_active = TRUE");
        sqlx::query_as::<_, Warehouse>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active warehouses, newest first, with optional name search.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Warehouse>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM warehouses \
             WHERE is_active = TRUE \
               AND ($1::text IS NULL OR name ILIKE '%' || $1 || '%') \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Warehouse>(&query)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total rows matching the same predicates as [`WarehouseRepo::list`].
    pub async fn count(pool: &PgPool, search: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM warehouses \
             WHERE is_active = TRUE \
               AND ($1::text IS NULL OR name ILIKE '%' || $1 || '%')",
        )
        .bind(search)
        .fetch_one(pool)
        .await
    }

    /// Update a warehouse. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no active row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWarehouse,
    ) -> Result<Option<Warehouse>, sqlx::Error> {
        let query = format!(
            "UPDATE warehouses SET \
                name = COALESCE($2, name), \
                location = COALESCE($3, location), \
                capacity = COALESCE($4, capacity), \
                manager_id = COALESCE($5, manager_id) \
             WHERE id = $1 AND is_active = TRUE \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Warehouse>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.location)
            .bind(input.capacity)
            .bind(input.manager_id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a warehouse. Returns `true` if a row was deactivated.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE warehouses SET is_active = FALSE WHERE id = $1 AND is_active = TRUE")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Aggregate inventory figures for one warehouse.
    ///
    /// `capacity` comes from the warehouse row; utilization is 0 when unset.
    pub async fn stats(
        pool: &PgPool,
        id: DbId,
        capacity: Option<i32>,
    ) -> Result<WarehouseStats, sqlx::Error> {
        let (total_products, total_quantity, low_stock_items): (i64, i64, i64) =
            sqlx::query_as(
                "SELECT COUNT(*), \
                        COALESCE(SUM(i.quantity), 0)::BIGINT, \
                        COUNT(*) FILTER (WHERE i.quantity <= p.reorder_point) \
                 FROM inventory i \
                 JOIN products p ON p.id = i.product_id \
                 WHERE i.warehouse_id = $1",
            )
            .bind(id)
            .fetch_one(pool)
            .await?;

        let utilization = match capacity {
            Some(cap) if cap > 0 => ((total_quantity * 100) as f64 / f64::from(cap)).round() as i32,
            _ => 0,
        };

        Ok(WarehouseStats {
            total_products,
            total_quantity,
            low_stock_items,
            utilization,
        })
    }
}
