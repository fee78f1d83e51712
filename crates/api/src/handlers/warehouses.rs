//! Handlers for the `/warehouses` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use stockroom_core::error::CoreError;
use stockroom_core::types::DbId;
use stockroom_db::models::warehouse::{
    CreateWarehouse, UpdateWarehouse, Warehouse, WarehouseStats,
};
use stockroom_db::repositories::WarehouseRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireManager;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

/// Query parameters for `GET /warehouses`.
#[derive(Debug, Default, Deserialize)]
pub struct WarehouseListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

/// GET /api/v1/warehouses
///
/// Paginated listing of active warehouses with optional name search.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<WarehouseListParams>,
) -> AppResult<Json<Paginated<Warehouse>>> {
    let (page, limit, offset) = PaginationParams {
        page: params.page,
        limit: params.limit,
    }
    .resolve();
    let search = params.search.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let warehouses = WarehouseRepo::list(&state.pool, search, limit, offset).await?;
    let total = WarehouseRepo::count(&state.pool, search).await?;

    Ok(Json(Paginated::new(warehouses, page, limit, total)))
}

/// GET /api/v1/warehouses/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Warehouse>>> {
    let warehouse = find_active(&state, id).await?;
    Ok(Json(DataResponse { data: warehouse }))
}

/// GET /api/v1/warehouses/{id}/stats
pub async fn stats(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<WarehouseStats>>> {
    let warehouse = find_active(&state, id).await?;
    let stats = WarehouseRepo::stats(&state.pool, id, warehouse.capacity).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// POST /api/v1/warehouses (manager+)
pub async fn create(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Json(input): Json<CreateWarehouse>,
) -> AppResult<(StatusCode, Json<DataResponse<Warehouse>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name must not be empty".into(),
        )));
    }
    if input.capacity.is_some_and(|c| c < 0) {
        return Err(AppError::Core(CoreError::Validation(
            "Capacity must not be negative".into(),
        )));
    }

    let warehouse = WarehouseRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: warehouse })))
}

/// PUT /api/v1/warehouses/{id} (manager+)
pub async fn update(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWarehouse>,
) -> AppResult<Json<DataResponse<Warehouse>>> {
    if input.capacity.is_some_and(|c| c < 0) {
        return Err(AppError::Core(CoreError::Validation(
            "Capacity must not be negative".into(),
        )));
    }

    let warehouse = WarehouseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Warehouse",
            id,
        }))?;

    Ok(Json(DataResponse { data: warehouse }))
}

/// DELETE /api/v1/warehouses/{id} (manager+)
///
/// Soft delete: the warehouse disappears from listings but its inventory
/// history stays intact.
pub async fn delete(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = WarehouseRepo::soft_delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Warehouse",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Fetch an active warehouse or 404.
async fn find_active(state: &AppState, id: DbId) -> AppResult<Warehouse> {
    WarehouseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Warehouse",
            id,
        }))
}
