//! Handlers for the `/products` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use stockroom_core::error::CoreError;
use stockroom_core::types::DbId;
use stockroom_db::models::product::{CategoryCount, CreateProduct, Product, UpdateProduct};
use stockroom_db::repositories::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireManager};
use crate::query::PaginationParams;
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

/// Result cap for the quick-search endpoint.
const SEARCH_LIMIT: i64 = 10;

/// Query parameters for `GET /products`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub category: Option<String>,
}

/// Query parameters for `GET /products/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

/// GET /api/v1/products
///
/// Paginated listing with optional substring search and category filter.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> AppResult<Json<Paginated<Product>>> {
    let (page, limit, offset) = PaginationParams {
        page: params.page,
        limit: params.limit,
    }
    .resolve();
    let search = params.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let category = params.category.as_deref();

    let products = ProductRepo::list(&state.pool, search, category, limit, offset).await?;
    let total = ProductRepo::count(&state.pool, search, category).await?;

    Ok(Json(Paginated::new(products, page, limit, total)))
}

/// GET /api/v1/products/search?q=
///
/// Quick substring search, top 10 matches. Requires at least two characters.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Product>>>> {
    let term = params.q.trim();
    if term.chars().count() < 2 {
        return Err(AppError::Core(CoreError::Validation(
            "Search term must be at least 2 characters".into(),
        )));
    }

    let products = ProductRepo::search(&state.pool, term, SEARCH_LIMIT).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/products/categories
pub async fn categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CategoryCount>>>> {
    let categories = ProductRepo::categories(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/products/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Product>>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;

    Ok(Json(DataResponse { data: product }))
}

/// POST /api/v1/products (manager+)
pub async fn create(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<DataResponse<Product>>)> {
    validate_product_input(&input)?;

    if ProductRepo::find_by_sku(&state.pool, &input.sku)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Product with SKU {} already exists",
            input.sku
        ))));
    }

    let product = ProductRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// PUT /api/v1/products/{id} (manager+)
pub async fn update(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<DataResponse<Product>>> {
    // A changed SKU must not collide with another product.
    if let Some(sku) = &input.sku {
        if let Some(existing) = ProductRepo::find_by_sku(&state.pool, sku).await? {
            if existing.id != id {
                return Err(AppError::Core(CoreError::Conflict(format!(
                    "Product with SKU {sku} already exists"
                ))));
            }
        }
    }

    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;

    Ok(Json(DataResponse { data: product }))
}

/// DELETE /api/v1/products/{id} (admin)
///
/// Rejected with 409 while inventory rows still reference the product.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ProductRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reject obviously malformed product input before touching the database.
fn validate_product_input(input: &CreateProduct) -> AppResult<()> {
    if input.sku.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "SKU must not be empty".into(),
        )));
    }
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name must not be empty".into(),
        )));
    }
    if input.unit_price < 0.0 {
        return Err(AppError::Core(CoreError::Validation(
            "Unit price must not be negative".into(),
        )));
    }
    if input.reorder_point.is_some_and(|v| v < 0) || input.optimal_stock.is_some_and(|v| v < 0) {
        return Err(AppError::Core(CoreError::Validation(
            "Stock thresholds must not be negative".into(),
        )));
    }
    Ok(())
}
