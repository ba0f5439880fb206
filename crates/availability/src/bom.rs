//! Bill-of-materials and shortfall types.

use serde::{Deserialize, Serialize};

use atelier_core::{ItemKey, Quantity};

/// One line of a recipe/project bill of materials: the item and how much of
/// it one unit of output consumes. Owned by the recipe/project catalog; this
/// crate only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BomLine {
    pub item: ItemKey,
    pub quantity_per_unit: Quantity,
}

impl BomLine {
    pub fn new(item: ItemKey, quantity_per_unit: Quantity) -> Self {
        Self {
            item,
            quantity_per_unit,
        }
    }
}

/// A bill-of-materials line whose required quantity exceeds available stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortfall {
    pub item: ItemKey,
    /// Display name resolved from the catalog, for actionable messages.
    pub name: String,
    pub required: Quantity,
    pub available: Quantity,
}

impl Shortfall {
    /// How much is missing.
    pub fn deficit(&self) -> Quantity {
        self.required - self.available
    }
}

/// Result of an availability check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityReport {
    pub is_satisfiable: bool,
    pub shortfalls: Vec<Shortfall>,
}

impl AvailabilityReport {
    pub(crate) fn from_shortfalls(shortfalls: Vec<Shortfall>) -> Self {
        Self {
            is_satisfiable: shortfalls.is_empty(),
            shortfalls,
        }
    }
}
