//! Error taxonomy for the inventory core.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::item::ItemKey;

/// Result type used across the inventory core.
pub type StockResult<T> = Result<T, StockError>;

/// Inventory core error.
///
/// Every variant carries enough context (item identity, requested/available
/// quantities) for a caller to render an actionable message; nothing here is
/// ever swallowed or retried by the core itself.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StockError {
    /// Malformed input (zero delta, non-positive receipt, double return of a
    /// tool). Always the caller's fault; never retried.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Referenced item or checkout does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An adjustment would drive stock below zero. An expected business
    /// outcome, not a system fault; callers decide retry/partial-fulfillment
    /// policy.
    #[error("insufficient stock for {item}: requested {requested}, available {available}")]
    InsufficientStock {
        item: ItemKey,
        requested: Decimal,
        available: Decimal,
    },

    /// Concurrent-state violation (e.g. checking out a tool that already has
    /// an active checkout). Callers may retry after re-reading state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Persistence failure. The adjustment engine guarantees no partial
    /// mutation when this surfaces.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl StockError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn insufficient_stock(item: ItemKey, requested: Decimal, available: Decimal) -> Self {
        Self::InsufficientStock {
            item,
            requested,
            available,
        }
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ItemId;
    use rust_decimal_macros::dec;

    #[test]
    fn insufficient_stock_message_names_item_and_quantities() {
        let item = ItemKey::material(ItemId::new());
        let err = StockError::insufficient_stock(item, dec!(5), dec!(3));
        let msg = err.to_string();
        assert!(msg.contains(&item.to_string()));
        assert!(msg.contains("requested 5"));
        assert!(msg.contains("available 3"));
    }
}
