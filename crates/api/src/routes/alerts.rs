//! Route definitions for the `/alerts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::alerts;
use crate::state::AppState;

/// Routes mounted at `/alerts`.
///
/// ```text
/// GET  /               -> list
/// GET  /unresolved     -> unresolved, severity desc
/// GET  /stats          -> aggregate stats
/// POST /{id}/resolve   -> resolve one (manager+)
/// POST /bulk-resolve   -> resolve a batch (manager+)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(alerts::list))
        .route("/unresolved", get(alerts::unresolved))
        .route("/stats", get(alerts::stats))
        .route("/{id}/resolve", post(alerts::resolve))
        .route("/bulk-resolve", post(alerts::bulk_resolve))
}
