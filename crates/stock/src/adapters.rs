//! Receiving / consumption adapters.
//!
//! Thin translations from purchase receipts, order fulfillment, and returns
//! into [`AdjustmentEngine::adjust`] calls. The policy checks here (a receipt
//! must be positive, a consumption must be positive) are caller-input
//! validation, not ledger concerns.

use rust_decimal::Decimal;

use atelier_core::{ItemKey, Quantity, StockError, StockResult};
use atelier_ledger::TransactionReason;

use crate::engine::{AdjustmentEngine, UnitOfWork};
use crate::record::ItemRecord;
use crate::store::ItemStore;

impl<S, U> AdjustmentEngine<S, U>
where
    S: ItemStore,
    U: UnitOfWork,
{
    /// Record a received purchase line: `adjust(+received_quantity, Restock)`.
    pub fn receive_purchase_item(
        &self,
        item: ItemKey,
        received_quantity: Quantity,
    ) -> StockResult<ItemRecord> {
        if received_quantity <= Decimal::ZERO {
            return Err(StockError::validation(
                "received quantity must be positive",
            ));
        }

        tracing::info!(item = %item, quantity = %received_quantity, "receiving purchase item");
        self.adjust(item, received_quantity, TransactionReason::Restock, None)
    }

    /// Consume stock for an order: `adjust(-quantity, Usage)`.
    ///
    /// Propagates `InsufficientStock` unchanged; whether to partially fulfill
    /// or reject the whole order is the caller's decision.
    pub fn consume_for_order(&self, item: ItemKey, quantity: Quantity) -> StockResult<ItemRecord> {
        if quantity <= Decimal::ZERO {
            return Err(StockError::validation(
                "consumed quantity must be positive",
            ));
        }

        tracing::info!(item = %item, quantity = %quantity, "consuming stock for order");
        self.adjust(item, -quantity, TransactionReason::Usage, None)
    }

    /// Put stock back: `adjust(+quantity, Return)`. Used by order
    /// cancellations and unused-cut returns.
    pub fn return_to_stock(&self, item: ItemKey, quantity: Quantity) -> StockResult<ItemRecord> {
        if quantity <= Decimal::ZERO {
            return Err(StockError::validation(
                "returned quantity must be positive",
            ));
        }

        tracing::info!(item = %item, quantity = %quantity, "returning stock");
        self.adjust(item, quantity, TransactionReason::Return, None)
    }
}
