//! Handlers for the `/inventory` resource, including the adjustment flow.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use stockroom_core::error::CoreError;
use stockroom_core::types::DbId;
use stockroom_db::models::alert::Alert;
use stockroom_db::models::inventory::{AdjustStock, Inventory, InventoryDetail, InventoryFilter};
use stockroom_db::models::stock_movement::{MovementDetail, StockMovement};
use stockroom_db::repositories::{InventoryRepo, ProductRepo, StockMovementRepo, WarehouseRepo};
use stockroom_events::DomainEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireManager;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

/// Default window for the trends view, in days.
const DEFAULT_TREND_DAYS: i32 = 30;

/// Row cap for the trends view.
const TREND_LIMIT: i64 = 50;

/// Row cap for CSV export.
const EXPORT_LIMIT: i64 = 10_000;

/// Query parameters for `GET /inventory`.
#[derive(Debug, Default, Deserialize)]
pub struct InventoryListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub warehouse_id: Option<DbId>,
    pub product_id: Option<DbId>,
}

/// Query parameters for `GET /inventory/trends`.
#[derive(Debug, Default, Deserialize)]
pub struct TrendsParams {
    pub days: Option<i32>,
}

/// Response body for `POST /inventory/adjust`: the updated row plus the
/// side artifacts the adjustment produced.
#[derive(Debug, Serialize)]
pub struct AdjustResponse {
    pub inventory: Inventory,
    pub movement: StockMovement,
    pub alerts: Vec<Alert>,
}

/// GET /api/v1/inventory
///
/// Paginated listing with optional warehouse/product filters.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<InventoryListParams>,
) -> AppResult<Json<Paginated<InventoryDetail>>> {
    let (page, limit, offset) = PaginationParams {
        page: params.page,
        limit: params.limit,
    }
    .resolve();
    let filter = InventoryFilter {
        warehouse_id: params.warehouse_id,
        product_id: params.product_id,
    };

    let rows = InventoryRepo::list(&state.pool, &filter, limit, offset).await?;
    let total = InventoryRepo::count(&state.pool, &filter).await?;

    Ok(Json(Paginated::new(rows, page, limit, total)))
}

/// GET /api/v1/inventory/low-stock
pub async fn low_stock(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<InventoryDetail>>>> {
    let rows = InventoryRepo::low_stock(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/inventory/overstock
pub async fn overstock(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<InventoryDetail>>>> {
    let rows = InventoryRepo::overstock(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/inventory/adjust (manager+)
///
/// Apply one stock movement. The repository runs the whole flow in a single
/// transaction; events are published only after it commits.
pub async fn adjust(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Json(input): Json<AdjustStock>,
) -> AppResult<Json<DataResponse<AdjustResponse>>> {
    // Resolve references up front so a bad id is a 404, not a raw FK error.
    if ProductRepo::find_by_id(&state.pool, input.product_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: input.product_id,
        }));
    }
    if WarehouseRepo::find_by_id(&state.pool, input.warehouse_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Warehouse",
            id: input.warehouse_id,
        }));
    }

    let outcome = InventoryRepo::adjust(&state.pool, &input, user.user_id).await?;

    state.event_bus.publish(
        DomainEvent::new("inventory.adjusted")
            .with_source("inventory", outcome.inventory.id)
            .with_actor(user.user_id)
            .with_payload(json!({
                "movement_type": outcome.movement.movement_type,
                "quantity_change": outcome.movement.quantity_change,
                "previous_quantity": outcome.movement.previous_quantity,
                "new_quantity": outcome.movement.new_quantity,
            })),
    );
    for alert in &outcome.alerts {
        state.event_bus.publish(
            DomainEvent::new("alert.created")
                .with_source("alert", alert.id)
                .with_actor(user.user_id)
                .with_payload(json!({
                    "type": alert.alert_type,
                    "severity": alert.severity,
                    "message": alert.message,
                })),
        );
    }

    Ok(Json(DataResponse {
        data: AdjustResponse {
            inventory: outcome.inventory,
            movement: outcome.movement,
            alerts: outcome.alerts,
        },
    }))
}

/// GET /api/v1/inventory/{id}/movements
///
/// Full audit trail for one inventory row, newest first.
pub async fn movements(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<StockMovement>>>> {
    if InventoryRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Inventory",
            id,
        }));
    }

    let rows = StockMovementRepo::list_for_inventory(&state.pool, id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/inventory/trends?days=
///
/// Recent movements joined with product and user context, capped at 50 rows.
pub async fn trends(
    State(state): State<AppState>,
    Query(params): Query<TrendsParams>,
) -> AppResult<Json<DataResponse<Vec<MovementDetail>>>> {
    let days = params.days.unwrap_or(DEFAULT_TREND_DAYS).clamp(1, 365);
    let rows = StockMovementRepo::trends(&state.pool, days, TREND_LIMIT).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/inventory/export
///
/// Full inventory as CSV.
pub async fn export(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = InventoryRepo::export(&state.pool, EXPORT_LIMIT).await?;

    let mut csv = String::from("sku,product,warehouse,quantity,location,last_updated\n");
    for row in &rows {
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            csv_field(&row.product_sku),
            csv_field(&row.product_name),
            csv_field(&row.warehouse_name),
            row.quantity,
            csv_field(row.location_in_warehouse.as_deref().unwrap_or("")),
            row.last_updated.to_rfc3339(),
        ));
    }

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"inventory.csv\"",
            ),
        ],
        csv,
    ))
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
