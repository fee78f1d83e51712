//! Repository for the `products` table.

use sqlx::PgPool;
use stockroom_core::error::CoreError;
use stockroom_core::types::DbId;

use crate::models::product::{CategoryCount, CreateProduct, Product, UpdateProduct};
use crate::RepoError;

/// Column list for `products` queries.
const COLUMNS: &str = "id, sku, name, category, description, unit_price, image_url, \
    reorder_point, optimal_stock, created_at";

/// Default reorder point applied when a create request omits one.
const DEFAULT_REORDER_POINT: i32 = 10;

/// Default optimal stock applied when a create request omits one.
const DEFAULT_OPTIMAL_STOCK: i32 = 50;

/// Provides CRUD and search operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product. Fails with `uq_products_sku` on a duplicate SKU.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products \
                (sku, name, category, description, unit_price, image_url, reorder_point, optimal_stock) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.sku)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.description)
            .bind(input.unit_price)
            .bind(&input.image_url)
            .bind(input.reorder_point.unwrap_or(DEFAULT_REORDER_POINT))
            .bind(input.optimal_stock.unwrap_or(DEFAULT_OPTIMAL_STOCK))
            .fetch_one(pool)
            .await
    }

    /// Find a product by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a product by SKU (used for duplicate checks).
    pub async fn find_by_sku(pool: &PgPool, sku: &str) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE sku = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(sku)
            .fetch_optional(pool)
            .await
    }

    /// List products, newest first, with optional substring search over
    /// name/sku/description and an optional exact category filter.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        category: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products \
             WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' \
                    OR sku ILIKE '%' || $1 || '%' \
                    OR description ILIKE '%' || $1 || '%') \
               AND ($2::text IS NULL OR category = $2) \
             ORDER BY created_at DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(search)
            .bind(category)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total rows matching the same predicates as [`ProductRepo::list`].
    pub async fn count(
        pool: &PgPool,
        search: Option<&str>,
        category: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM products \
             WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' \
                    OR sku ILIKE '%' || $1 || '%' \
                    OR description ILIKE '%' || $1 || '%') \
               AND ($2::text IS NULL OR category = $2)",
        )
        .bind(search)
        .bind(category)
        .fetch_one(pool)
        .await
    }

    /// Update a product. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET \
                sku = COALESCE($2, sku), \
                name = COALESCE($3, name), \
                category = COALESCE($4, category), \
                description = COALESCE($5, description), \
                unit_price = COALESCE($6, unit_price), \
                image_url = COALESCE($7, image_url), \
                reorder_point = COALESCE($8, reorder_point), \
                optimal_stock = COALESCE($9, optimal_stock) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.sku)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.description)
            .bind(input.unit_price)
            .bind(&input.image_url)
            .bind(input.reorder_point)
            .bind(input.optimal_stock)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product. Rejected while inventory rows still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), RepoError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        if !exists {
            return Err(CoreError::NotFound {
                entity: "Product",
                id,
            }
            .into());
        }

        let has_inventory: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM inventory WHERE product_id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        if has_inventory {
            return Err(CoreError::Conflict(
                "Cannot delete product with existing inventory".to_string(),
            )
            .into());
        }

        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Quick substring search over name/sku/description, capped at `limit`.
    pub async fn search(
        pool: &PgPool,
        term: &str,
        limit: i64,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products \
             WHERE name ILIKE '%' || $1 || '%' \
                OR sku ILIKE '%' || $1 || '%' \
                OR description ILIKE '%' || $1 || '%' \
             ORDER BY name ASC \
             LIMIT $2"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(term)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Distinct non-null categories with product counts, alphabetical.
    pub async fn categories(pool: &PgPool) -> Result<Vec<CategoryCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryCount>(
            "SELECT category, COUNT(*) AS count FROM products \
             WHERE category IS NOT NULL \
             GROUP BY category \
             ORDER BY category ASC",
        )
        .fetch_all(pool)
        .await
    }
}
