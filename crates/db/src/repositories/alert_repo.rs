//! Repository for the `alerts` table: filtered listing, resolution, stats.

use std::collections::HashSet;

use sqlx::PgPool;
use stockroom_core::error::CoreError;
use stockroom_core::types::DbId;

use crate::models::alert::{Alert, AlertFilter, AlertGroupCount, AlertStats};
use crate::RepoError;

/// Column list for `alerts` queries.
const COLUMNS: &str = "id, type, severity, message, inventory_id, warehouse_id, \
    is_resolved, resolved_at, resolved_by, created_at";

/// Shared WHERE clause translating [`AlertFilter`] into bound predicates.
/// Binds $1..$7 in filter-field order.
const FILTER_WHERE: &str = "($1::uuid IS NULL OR warehouse_id = $1) \
    AND ($2::uuid IS NULL OR inventory_id IN (SELECT id FROM inventory WHERE product_id = $2)) \
    AND ($3::text IS NULL OR severity = $3) \
    AND ($4::text IS NULL OR type = $4) \
    AND ($5::boolean IS NULL OR is_resolved = $5) \
    AND ($6::timestamptz IS NULL OR created_at >= $6) \
    AND ($7::timestamptz IS NULL OR created_at <= $7)";

/// Provides listing, resolution, and aggregate operations for alerts.
pub struct AlertRepo;

impl AlertRepo {
    /// List alerts matching the closed filter, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &AlertFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alerts \
             WHERE {FILTER_WHERE} \
             ORDER BY created_at DESC \
             LIMIT $8 OFFSET $9"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(filter.warehouse_id)
            .bind(filter.product_id)
            .bind(filter.severity.map(|s| s.as_str()))
            .bind(filter.alert_type.map(|t| t.as_str()))
            .bind(filter.resolved)
            .bind(filter.created_from)
            .bind(filter.created_to)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total rows matching the same predicates as [`AlertRepo::list`].
    pub async fn count(pool: &PgPool, filter: &AlertFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM alerts WHERE {FILTER_WHERE}");
        sqlx::query_scalar(&query)
            .bind(filter.warehouse_id)
            .bind(filter.product_id)
            .bind(filter.severity.map(|s| s.as_str()))
            .bind(filter.alert_type.map(|t| t.as_str()))
            .bind(filter.resolved)
            .bind(filter.created_from)
            .bind(filter.created_to)
            .fetch_one(pool)
            .await
    }

    /// Find an alert by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alerts WHERE id = $1");
        sqlx::query_as::<_, Alert>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Unresolved alerts, most severe first, then newest, capped at `limit`.
    pub async fn unresolved(pool: &PgPool, limit: i64) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alerts \
             WHERE is_resolved = FALSE \
             ORDER BY CASE severity \
                 WHEN 'critical' THEN 4 \
                 WHEN 'high' THEN 3 \
                 WHEN 'medium' THEN 2 \
                 ELSE 1 END DESC, \
                 created_at DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Resolve one alert. This is the only mutation path for `is_resolved`.
    ///
    /// Fails with [`CoreError::NotFound`] for an unknown id and
    /// [`CoreError::AlreadyResolved`] if the alert was resolved before. The
    /// conditional UPDATE makes the transition atomic: two racing resolvers
    /// cannot both succeed.
    pub async fn resolve(pool: &PgPool, id: DbId, resolving_user_id: DbId) -> Result<Alert, RepoError> {
        let query = format!(
            "UPDATE alerts SET is_resolved = TRUE, resolved_at = NOW(), resolved_by = $2 \
             WHERE id = $1 AND is_resolved = FALSE \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Alert>(&query)
            .bind(id)
            .bind(resolving_user_id)
            .fetch_optional(pool)
            .await?;

        match updated {
            Some(alert) => Ok(alert),
            None => {
                let exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM alerts WHERE id = $1)")
                        .bind(id)
                        .fetch_one(pool)
                        .await?;
                if exists {
                    Err(CoreError::AlreadyResolved { id }.into())
                } else {
                    Err(CoreError::NotFound {
                        entity: "Alert",
                        id,
                    }
                    .into())
                }
            }
        }
    }

    /// Resolve a batch of alerts, all-or-nothing.
    ///
    /// Every id must reference an existing, currently-unresolved alert; the
    /// check runs under `FOR UPDATE` so a concurrent resolver cannot slip in
    /// between validation and update. Any failure rejects the entire batch
    /// with no mutation. Returns the number of alerts resolved.
    pub async fn bulk_resolve(
        pool: &PgPool,
        alert_ids: &[DbId],
        resolving_user_id: DbId,
    ) -> Result<u64, RepoError> {
        if alert_ids.is_empty() {
            return Err(CoreError::Validation(
                "alert_ids must be a non-empty array".to_string(),
            )
            .into());
        }
        let distinct: HashSet<DbId> = alert_ids.iter().copied().collect();

        let mut tx = pool.begin().await?;

        let resolvable: Vec<DbId> = sqlx::query_scalar(
            "SELECT id FROM alerts \
             WHERE id = ANY($1) AND is_resolved = FALSE \
             FOR UPDATE",
        )
        .bind(alert_ids)
        .fetch_all(&mut *tx)
        .await?;

        if resolvable.len() != distinct.len() {
            return Err(CoreError::Validation(
                "Some alerts are already resolved or do not exist".to_string(),
            )
            .into());
        }

        let result = sqlx::query(
            "UPDATE alerts SET is_resolved = TRUE, resolved_at = NOW(), resolved_by = $2 \
             WHERE id = ANY($1)",
        )
        .bind(alert_ids)
        .bind(resolving_user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    /// Aggregate alert figures for the dashboard.
    pub async fn stats(pool: &PgPool) -> Result<AlertStats, sqlx::Error> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM alerts")
            .fetch_one(pool)
            .await?;

        let unresolved: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM alerts WHERE is_resolved = FALSE")
                .fetch_one(pool)
                .await?;

        let by_severity = sqlx::query_as::<_, AlertGroupCount>(
            "SELECT severity AS key, COUNT(*) AS count FROM alerts \
             WHERE is_resolved = FALSE \
             GROUP BY severity \
             ORDER BY count DESC",
        )
        .fetch_all(pool)
        .await?;

        let by_type = sqlx::query_as::<_, AlertGroupCount>(
            "SELECT type AS key, COUNT(*) AS count FROM alerts \
             WHERE is_resolved = FALSE \
             GROUP BY type \
             ORDER BY count DESC",
        )
        .fetch_all(pool)
        .await?;

        let recent: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM alerts WHERE created_at >= NOW() - INTERVAL '7 days'",
        )
        .fetch_one(pool)
        .await?;

        Ok(AlertStats {
            total,
            unresolved,
            by_severity,
            by_type,
            recent,
        })
    }
}
