//! Quantity arithmetic for stock movements.
//!
//! A movement either adds to, subtracts from, or absolutely sets the on-hand
//! quantity of one (warehouse, product) pair. The functions here are the only
//! place that arithmetic lives; the repository layer calls them inside its
//! transaction so the same rules apply to every adjustment path.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    /// Stock arriving; quantity is added to the current on-hand amount.
    Incoming,
    /// Stock leaving; quantity is subtracted. Rejected if it would go negative.
    Outgoing,
    /// A stocktake correction; quantity is the absolute new value, not a delta.
    Adjustment,
}

impl MovementType {
    /// The string stored in the `stock_movements.movement_type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            MovementType::Incoming => "incoming",
            MovementType::Outgoing => "outgoing",
            MovementType::Adjustment => "adjustment",
        }
    }
}

impl std::str::FromStr for MovementType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incoming" => Ok(MovementType::Incoming),
            "outgoing" => Ok(MovementType::Outgoing),
            "adjustment" => Ok(MovementType::Adjustment),
            other => Err(CoreError::Validation(format!(
                "Unknown movement type: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute the new on-hand quantity after applying a movement.
///
/// `quantity` is always a non-negative magnitude; for `Adjustment` it is the
/// absolute target value. Fails with [`CoreError::Validation`] on a negative
/// quantity and [`CoreError::InsufficientStock`] when an outgoing movement
/// would drive the quantity below zero. No partial fulfillment: the caller
/// must reject the whole operation on error.
pub fn apply_movement(
    previous: i32,
    movement_type: MovementType,
    quantity: i32,
) -> Result<i32, CoreError> {
    if quantity < 0 {
        return Err(CoreError::Validation(
            "Quantity must be a non-negative integer".to_string(),
        ));
    }

    match movement_type {
        MovementType::Incoming => previous.checked_add(quantity).ok_or_else(|| {
            CoreError::Validation("Quantity overflows the stock counter".to_string())
        }),
        MovementType::Outgoing => {
            let new = previous - quantity;
            if new < 0 {
                return Err(CoreError::InsufficientStock {
                    requested: quantity,
                    available: previous,
                });
            }
            Ok(new)
        }
        MovementType::Adjustment => Ok(quantity),
    }
}
