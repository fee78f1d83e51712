//! Handlers for the `/alerts` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use stockroom_core::alerts::{AlertSeverity, AlertType};
use stockroom_core::types::{DbId, Timestamp};
use stockroom_db::models::alert::{Alert, AlertFilter, AlertStats};
use stockroom_db::repositories::AlertRepo;
use stockroom_events::DomainEvent;

use crate::error::AppResult;
use crate::middleware::rbac::RequireManager;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

/// Row cap for the unresolved-alerts view.
const UNRESOLVED_LIMIT: i64 = 50;

/// Query parameters for `GET /alerts`.
#[derive(Debug, Default, Deserialize)]
pub struct AlertListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub warehouse_id: Option<DbId>,
    pub product_id: Option<DbId>,
    pub severity: Option<AlertSeverity>,
    #[serde(rename = "type")]
    pub alert_type: Option<AlertType>,
    pub resolved: Option<bool>,
    pub created_from: Option<Timestamp>,
    pub created_to: Option<Timestamp>,
}

/// Request body for `POST /alerts/bulk-resolve`.
#[derive(Debug, Deserialize)]
pub struct BulkResolveRequest {
    pub alert_ids: Vec<DbId>,
}

/// Response body for `POST /alerts/bulk-resolve`.
#[derive(Debug, Serialize)]
pub struct BulkResolveResponse {
    pub resolved: u64,
}

/// GET /api/v1/alerts
///
/// Paginated listing with the closed filter struct (warehouse, product,
/// severity, type, resolved flag, creation date range).
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<AlertListParams>,
) -> AppResult<Json<Paginated<Alert>>> {
    let (page, limit, offset) = PaginationParams {
        page: params.page,
        limit: params.limit,
    }
    .resolve();
    let filter = AlertFilter {
        warehouse_id: params.warehouse_id,
        product_id: params.product_id,
        severity: params.severity,
        alert_type: params.alert_type,
        resolved: params.resolved,
        created_from: params.created_from,
        created_to: params.created_to,
    };

    let alerts = AlertRepo::list(&state.pool, &filter, limit, offset).await?;
    let total = AlertRepo::count(&state.pool, &filter).await?;

    Ok(Json(Paginated::new(alerts, page, limit, total)))
}

/// GET /api/v1/alerts/unresolved
///
/// Unresolved alerts, most severe first, capped at 50.
pub async fn unresolved(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Alert>>>> {
    let alerts = AlertRepo::unresolved(&state.pool, UNRESOLVED_LIMIT).await?;
    Ok(Json(DataResponse { data: alerts }))
}

/// GET /api/v1/alerts/stats
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<DataResponse<AlertStats>>> {
    let stats = AlertRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// POST /api/v1/alerts/{id}/resolve (manager+)
pub async fn resolve(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Alert>>> {
    let alert = AlertRepo::resolve(&state.pool, id, user.user_id).await?;

    state.event_bus.publish(
        DomainEvent::new("alert.resolved")
            .with_source("alert", alert.id)
            .with_actor(user.user_id)
            .with_payload(json!({ "type": alert.alert_type })),
    );

    Ok(Json(DataResponse { data: alert }))
}

/// POST /api/v1/alerts/bulk-resolve (manager+)
///
/// All-or-nothing: if any id is unknown or already resolved, nothing changes.
pub async fn bulk_resolve(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Json(input): Json<BulkResolveRequest>,
) -> AppResult<Json<DataResponse<BulkResolveResponse>>> {
    let resolved = AlertRepo::bulk_resolve(&state.pool, &input.alert_ids, user.user_id).await?;

    for alert_id in &input.alert_ids {
        state.event_bus.publish(
            DomainEvent::new("alert.resolved")
                .with_source("alert", *alert_id)
                .with_actor(user.user_id),
        );
    }

    Ok(Json(DataResponse {
        data: BulkResolveResponse { resolved },
    }))
}
