//! Alert entity models, filter struct, and stats projections.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::alerts::{AlertSeverity, AlertType};
use stockroom_core::types::{DbId, Timestamp};

/// A row from the `alerts` table.
///
/// Invariant: `is_resolved = false` implies `resolved_at` and `resolved_by`
/// are unset. The only path that flips `is_resolved` is the resolve /
/// bulk-resolve repository operations.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Alert {
    pub id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub alert_type: String,
    pub severity: String,
    pub message: String,
    pub inventory_id: DbId,
    pub warehouse_id: DbId,
    pub is_resolved: bool,
    pub resolved_at: Option<Timestamp>,
    pub resolved_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// Closed filter for alert listing. Every supported predicate is an explicit
/// optional field; there is no pass-through of arbitrary query input.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AlertFilter {
    pub warehouse_id: Option<DbId>,
    pub product_id: Option<DbId>,
    pub severity: Option<AlertSeverity>,
    #[serde(rename = "type")]
    pub alert_type: Option<AlertType>,
    pub resolved: Option<bool>,
    pub created_from: Option<Timestamp>,
    pub created_to: Option<Timestamp>,
}

/// Count of unresolved alerts sharing one severity (or one type).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AlertGroupCount {
    pub key: String,
    pub count: i64,
}

/// Aggregate alert figures for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct AlertStats {
    pub total: i64,
    pub unresolved: i64,
    pub by_severity: Vec<AlertGroupCount>,
    pub by_type: Vec<AlertGroupCount>,
    /// Alerts created within the last 7 days.
    pub recent: i64,
}
