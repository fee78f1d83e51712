//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope; list endpoints add a
//! `"pagination"` object. Use [`DataResponse`] / [`Paginated`] instead of
//! ad-hoc `serde_json::json!` to get compile-time type safety and consistent
//! serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [...], "pagination": {...} }` envelope for list endpoints.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl<T: Serialize> Paginated<T> {
    /// Build the envelope from a page of rows and the total row count.
    pub fn new(data: Vec<T>, page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Paginated {
            data,
            pagination: PaginationMeta {
                page,
                limit,
                total,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let p = Paginated::new(vec![1, 2, 3], 1, 20, 41);
        assert_eq!(p.pagination.total_pages, 3);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let p: Paginated<i32> = Paginated::new(Vec::new(), 1, 20, 0);
        assert_eq!(p.pagination.total_pages, 0);
    }
}
