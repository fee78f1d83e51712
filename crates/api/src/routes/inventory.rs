//! Route definitions for the `/inventory` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::inventory;
use crate::state::AppState;

/// Routes mounted at `/inventory`.
///
/// ```text
/// GET  /                  -> list
/// GET  /low-stock         -> rows at/below reorder point
/// GET  /overstock         -> rows above optimal * 1.5
/// POST /adjust            -> apply a stock movement (manager+)
/// GET  /trends            -> recent movements
/// GET  /export            -> CSV export
/// GET  /{id}/movements    -> audit trail for one row
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(inventory::list))
        .route("/low-stock", get(inventory::low_stock))
        .route("/overstock", get(inventory::overstock))
        .route("/adjust", post(inventory::adjust))
        .route("/trends", get(inventory::trends))
        .route("/export", get(inventory::export))
        .route("/{id}/movements", get(inventory::movements))
}
