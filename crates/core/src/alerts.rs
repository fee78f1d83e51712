//! Alert-trigger policy evaluated on every stock adjustment.
//!
//! Two independent conditions are checked against the product's thresholds;
//! either, both, or neither may fire:
//!
//! - **Low stock** is edge-triggered: it fires only when the quantity crosses
//!   the reorder point from above, not on every call while already below it.
//! - **Overstock** is level-triggered: it fires every time the quantity sits
//!   above `optimal_stock * 1.5`, with no deduplication against existing
//!   unresolved alerts.
//!
//! The asymmetry between the two triggers is intentional; see DESIGN.md.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The category of an alert row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    LowStock,
    Overstock,
    Expiry,
    Theft,
}

impl AlertType {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertType::LowStock => "low_stock",
            AlertType::Overstock => "overstock",
            AlertType::Expiry => "expiry",
            AlertType::Theft => "theft",
        }
    }
}

impl std::str::FromStr for AlertType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low_stock" => Ok(AlertType::LowStock),
            "overstock" => Ok(AlertType::Overstock),
            "expiry" => Ok(AlertType::Expiry),
            "theft" => Ok(AlertType::Theft),
            other => Err(CoreError::Validation(format!("Unknown alert type: {other}"))),
        }
    }
}

/// Severity ordering is low < medium < high < critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertSeverity::Low => "low",
            AlertSeverity::Medium => "medium",
            AlertSeverity::High => "high",
            AlertSeverity::Critical => "critical",
        }
    }
}

impl std::str::FromStr for AlertSeverity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(AlertSeverity::Low),
            "medium" => Ok(AlertSeverity::Medium),
            "high" => Ok(AlertSeverity::High),
            "critical" => Ok(AlertSeverity::Critical),
            other => Err(CoreError::Validation(format!(
                "Unknown alert severity: {other}"
            ))),
        }
    }
}

/// An alert the trigger policy decided to raise, before it has a row id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDraft {
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub message: String,
}

/// Product thresholds consulted by [`evaluate_thresholds`].
#[derive(Debug, Clone, Copy)]
pub struct ProductThresholds {
    pub reorder_point: i32,
    pub optimal_stock: i32,
}

/// Evaluate both alert conditions for one adjustment.
///
/// Returns zero, one, or two drafts. `previous` and `new` are the committed
/// quantities before and after the adjustment.
pub fn evaluate_thresholds(
    product_name: &str,
    previous: i32,
    new: i32,
    thresholds: ProductThresholds,
) -> Vec<AlertDraft> {
    let mut drafts = Vec::new();

    // Low stock: only on the downward crossing of the reorder point.
    if new <= thresholds.reorder_point && previous > thresholds.reorder_point {
        let severity = if new <= thresholds.reorder_point / 2 {
            AlertSeverity::High
        } else {
            AlertSeverity::Medium
        };
        drafts.push(AlertDraft {
            alert_type: AlertType::LowStock,
            severity,
            message: format!(
                "Low stock alert for {product_name}. Current: {new}, Reorder point: {}",
                thresholds.reorder_point
            ),
        });
    }

    // Overstock: every time the level holds. 2*new > 3*optimal is the exact
    // integer form of new > optimal * 1.5.
    if 2 * i64::from(new) > 3 * i64::from(thresholds.optimal_stock) {
        drafts.push(AlertDraft {
            alert_type: AlertType::Overstock,
            severity: AlertSeverity::Medium,
            message: format!(
                "Overstock alert for {product_name}. Current: {new}, Optimal: {}",
                thresholds.optimal_stock
            ),
        });
    }

    drafts
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLDS: ProductThresholds = ProductThresholds {
        reorder_point: 10,
        optimal_stock: 50,
    };

    fn types(drafts: &[AlertDraft]) -> Vec<AlertType> {
        drafts.iter().map(|d| d.alert_type).collect()
    }

    #[test]
    fn low_stock_fires_on_the_crossing_only() {
        // 20 -> 8 crosses the reorder point of 10.
        let fired = evaluate_thresholds("Widget", 20, 8, THRESHOLDS);
        assert_eq!(types(&fired), vec![AlertType::LowStock]);

        // 8 -> 5 stays below; edge-triggered means no second alert.
        let fired = evaluate_thresholds("Widget", 8, 5, THRESHOLDS);
        assert!(fired.is_empty());
    }

    #[test]
    fn low_stock_fires_at_exact_reorder_point() {
        let fired = evaluate_thresholds("Widget", 11, 10, THRESHOLDS);
        assert_eq!(types(&fired), vec![AlertType::LowStock]);
    }

    #[test]
    fn low_stock_severity_escalates_at_half_reorder_point() {
        // 8 > 10/2, so medium.
        let fired = evaluate_thresholds("Widget", 20, 8, THRESHOLDS);
        assert_eq!(fired[0].severity, AlertSeverity::Medium);

        // 5 <= 10/2, so high.
        let fired = evaluate_thresholds("Widget", 20, 5, THRESHOLDS);
        assert_eq!(fired[0].severity, AlertSeverity::High);
    }

    #[test]
    fn overstock_fires_every_time_the_level_holds() {
        // optimal 50 => threshold 75 (exclusive).
        let first = evaluate_thresholds("Widget", 60, 80, THRESHOLDS);
        assert_eq!(types(&first), vec![AlertType::Overstock]);

        // Level-triggered: a second adjustment that also lands above the
        // threshold fires again, even though we were already overstocked.
        let second = evaluate_thresholds("Widget", 80, 90, THRESHOLDS);
        assert_eq!(types(&second), vec![AlertType::Overstock]);
    }

    #[test]
    fn overstock_threshold_is_exclusive() {
        // Exactly optimal * 1.5 does not fire (75 is not > 75).
        let fired = evaluate_thresholds("Widget", 70, 75, THRESHOLDS);
        assert!(fired.is_empty());

        let fired = evaluate_thresholds("Widget", 70, 76, THRESHOLDS);
        assert_eq!(types(&fired), vec![AlertType::Overstock]);
    }

    #[test]
    fn odd_optimal_stock_uses_exact_half_threshold() {
        // optimal 5 => threshold 7.5; 8 fires, 7 does not.
        let t = ProductThresholds {
            reorder_point: 0,
            optimal_stock: 5,
        };
        assert!(evaluate_thresholds("Widget", 0, 7, t).is_empty());
        assert_eq!(
            types(&evaluate_thresholds("Widget", 0, 8, t)),
            vec![AlertType::Overstock]
        );
    }

    #[test]
    fn both_conditions_can_fire_together() {
        // A product whose reorder point exceeds the overstock threshold:
        // crossing down to a quantity that is still overstocked fires both.
        let t = ProductThresholds {
            reorder_point: 100,
            optimal_stock: 10,
        };
        let fired = evaluate_thresholds("Widget", 150, 90, t);
        assert_eq!(types(&fired), vec![AlertType::LowStock, AlertType::Overstock]);
    }

    #[test]
    fn messages_name_the_product_and_thresholds() {
        let fired = evaluate_thresholds("Blue Widget", 20, 8, THRESHOLDS);
        assert_eq!(
            fired[0].message,
            "Low stock alert for Blue Widget. Current: 8, Reorder point: 10"
        );

        let fired = evaluate_thresholds("Blue Widget", 60, 80, THRESHOLDS);
        assert_eq!(
            fired[0].message,
            "Overstock alert for Blue Widget. Current: 80, Optimal: 50"
        );
    }

    #[test]
    fn no_alerts_in_the_normal_band() {
        let fired = evaluate_thresholds("Widget", 30, 40, THRESHOLDS);
        assert!(fired.is_empty());
    }
}
