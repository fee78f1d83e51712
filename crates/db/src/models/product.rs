//! Product entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::types::{DbId, Timestamp};

/// A row from the `products` table.
///
/// `reorder_point` and `optimal_stock` are the thresholds consulted by the
/// alert-trigger policy on every stock adjustment.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub sku: String,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub unit_price: f64,
    pub image_url: Option<String>,
    pub reorder_point: i32,
    pub optimal_stock: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a product.
#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    pub sku: String,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub unit_price: f64,
    pub image_url: Option<String>,
    /// Defaults to 10 when omitted.
    pub reorder_point: Option<i32>,
    /// Defaults to 50 when omitted.
    pub optimal_stock: Option<i32>,
}

/// DTO for updating a product. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProduct {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub unit_price: Option<f64>,
    pub image_url: Option<String>,
    pub reorder_point: Option<i32>,
    pub optimal_stock: Option<i32>,
}

/// One distinct product category and how many products carry it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}
