//! Route definitions for the `/warehouses` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::warehouses;
use crate::state::AppState;

/// Routes mounted at `/warehouses`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create (manager+)
/// GET    /{id}          -> get
/// PUT    /{id}          -> update (manager+)
/// DELETE /{id}          -> soft delete (manager+)
/// GET    /{id}/stats    -> aggregate stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(warehouses::list).post(warehouses::create))
        .route(
            "/{id}",
            get(warehouses::get)
                .put(warehouses::update)
                .delete(warehouses::delete),
        )
        .route("/{id}/stats", get(warehouses::stats))
}
