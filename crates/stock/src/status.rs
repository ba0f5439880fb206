//! Stock status derivation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use atelier_core::Quantity;

/// System-wide fallback when an item has no reorder threshold configured.
pub const DEFAULT_REORDER_THRESHOLD: Quantity = Decimal::from_parts(5, 0, 0, false, 0);

/// Derived classification of an item's current quantity. Never stored
/// authoritatively; always recomputed from (quantity, threshold).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in_stock",
            StockStatus::LowStock => "low_stock",
            StockStatus::OutOfStock => "out_of_stock",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pure mapping from (quantity, configured threshold) to status.
///
/// Re-run after every adjustment **and** whenever the threshold changes: a
/// threshold edit can flip the status without any quantity change, so the
/// status must be re-derived rather than left stale.
pub fn derive_status(quantity: Quantity, reorder_threshold: Option<Quantity>) -> StockStatus {
    let threshold = reorder_threshold.unwrap_or(DEFAULT_REORDER_THRESHOLD);
    if quantity <= Decimal::ZERO {
        StockStatus::OutOfStock
    } else if quantity <= threshold {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}
