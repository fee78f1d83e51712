pub mod alerts;
pub mod auth;
pub mod health;
pub mod inventory;
pub mod products;
pub mod warehouses;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
/// /auth/me                       profile (requires auth)
/// /auth/logout                   logout (requires auth)
///
/// /products                      list, create
/// /products/search               quick search
/// /products/categories           category counts
/// /products/{id}                 get, update, delete
///
/// /warehouses                    list, create
/// /warehouses/{id}               get, update, delete (soft)
/// /warehouses/{id}/stats         aggregate stats
///
/// /inventory                     list
/// /inventory/low-stock           rows at/below reorder point
/// /inventory/overstock           rows above optimal * 1.5
/// /inventory/adjust              apply a stock movement (POST)
/// /inventory/trends              recent movements
/// /inventory/export              CSV export
/// /inventory/{id}/movements      audit trail for one row
///
/// /alerts                        list
/// /alerts/unresolved             unresolved, severity desc
/// /alerts/stats                  aggregate stats
/// /alerts/{id}/resolve           resolve one (POST)
/// /alerts/bulk-resolve           resolve a batch (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/products", products::router())
        .nest("/warehouses", warehouses::router())
        .nest("/inventory", inventory::router())
        .nest("/alerts", alerts::router())
}
