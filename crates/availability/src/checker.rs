//! The availability checker.

use std::sync::Arc;

use rust_decimal::Decimal;

use atelier_core::{ItemKey, Quantity, StockError, StockResult};
use atelier_stock::ItemStore;

use crate::bom::{AvailabilityReport, BomLine, Shortfall};

/// Catalog seam: resolves an item to its display name for shortfall and
/// report messages. The catalog itself (suppliers, products, recipes) is an
/// external collaborator.
pub trait NameLookup: Send + Sync {
    fn lookup_name(&self, item: &ItemKey) -> StockResult<String>;
}

impl<N> NameLookup for Arc<N>
where
    N: NameLookup + ?Sized,
{
    fn lookup_name(&self, item: &ItemKey) -> StockResult<String> {
        (**self).lookup_name(item)
    }
}

/// Read-only projection answering "can this bill of materials be built
/// `multiplier` times right now".
///
/// Each line's read is individually consistent with the ledger, but the check
/// as a whole is not one atomic snapshot across items: stock can change
/// between line reads under concurrent adjustments. Known limitation, not a
/// bug; callers re-check at consumption time anyway (consumption enforces
/// non-negativity itself).
pub struct AvailabilityChecker<S, N> {
    store: S,
    names: N,
}

impl<S, N> AvailabilityChecker<S, N>
where
    S: ItemStore,
    N: NameLookup,
{
    pub fn new(store: S, names: N) -> Self {
        Self { store, names }
    }

    /// Check every line, collecting the full shortfall list (never fails
    /// fast). A missing item record reads as zero stock, not an error.
    pub fn check(&self, lines: &[BomLine], multiplier: u32) -> StockResult<AvailabilityReport> {
        if multiplier == 0 {
            return Err(StockError::validation("multiplier must be positive"));
        }

        let factor = Quantity::from(multiplier);
        let mut shortfalls = Vec::new();

        for line in lines {
            if line.quantity_per_unit < Decimal::ZERO {
                return Err(StockError::validation(format!(
                    "negative quantity per unit for {}",
                    line.item
                )));
            }

            let required = line.quantity_per_unit * factor;
            let available = self
                .store
                .get(&line.item)?
                .map(|record| record.quantity)
                .unwrap_or(Decimal::ZERO);

            if available < required {
                shortfalls.push(Shortfall {
                    item: line.item,
                    name: self.display_name(&line.item),
                    required,
                    available,
                });
            }
        }

        let report = AvailabilityReport::from_shortfalls(shortfalls);
        tracing::debug!(
            lines = lines.len(),
            multiplier,
            satisfiable = report.is_satisfiable,
            shortfalls = report.shortfalls.len(),
            "availability check"
        );
        Ok(report)
    }

    /// The report must always be complete, so a catalog miss degrades to the
    /// item key instead of aborting the check.
    fn display_name(&self, item: &ItemKey) -> String {
        self.names
            .lookup_name(item)
            .unwrap_or_else(|_| item.to_string())
    }
}
