//! Ledger transaction types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use atelier_core::{ItemKey, Quantity, StockError, StockResult, TransactionId};

/// Why a quantity changed. Closed set, validated once at the serde boundary.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionReason {
    /// Consumed by an order or project build.
    Usage,
    /// Received from a purchase.
    Restock,
    /// Manual correction (cycle count, shrinkage, damage).
    Adjustment,
    /// Returned to stock (cancelled order, unused cut).
    Return,
}

impl TransactionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionReason::Usage => "usage",
            TransactionReason::Restock => "restock",
            TransactionReason::Adjustment => "adjustment",
            TransactionReason::Return => "return",
        }
    }
}

impl core::fmt::Display for TransactionReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entry ready to be appended but not yet assigned an id or timestamp.
/// The ledger assigns both during append.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub item: ItemKey,
    /// Signed delta: negative = consumption/usage, positive = restock/receipt.
    pub delta: Quantity,
    pub reason: TransactionReason,
    pub note: Option<String>,
}

impl LedgerEntry {
    pub fn new(item: ItemKey, delta: Quantity, reason: TransactionReason) -> Self {
        Self {
            item,
            delta,
            reason,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// A zero delta records nothing and is rejected. The ledger never rejects
    /// based on the resulting quantity; that check belongs to the adjustment
    /// engine, before the append is issued.
    pub fn validate(&self) -> StockResult<()> {
        if self.delta.is_zero() {
            return Err(StockError::validation("ledger delta cannot be zero"));
        }
        Ok(())
    }

    /// Seal the entry into an immutable transaction.
    pub fn into_transaction(self, occurred_at: DateTime<Utc>) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            item: self.item,
            delta: self.delta,
            reason: self.reason,
            note: self.note,
            occurred_at,
        }
    }
}

/// Immutable ledger record of one quantity change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub item: ItemKey,
    pub delta: Quantity,
    pub reason: TransactionReason,
    pub note: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::ItemId;
    use rust_decimal_macros::dec;

    #[test]
    fn zero_delta_entry_fails_validation() {
        let entry = LedgerEntry::new(
            ItemKey::material(ItemId::new()),
            dec!(0),
            TransactionReason::Adjustment,
        );
        assert!(matches!(entry.validate(), Err(StockError::Validation(_))));
    }

    #[test]
    fn negative_delta_is_valid() {
        let entry = LedgerEntry::new(
            ItemKey::supply(ItemId::new()),
            dec!(-2.5),
            TransactionReason::Usage,
        );
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn unknown_reason_is_rejected_at_the_serde_boundary() {
        let err = serde_json::from_str::<TransactionReason>("\"theft\"").unwrap_err();
        assert!(err.to_string().contains("theft"));
    }

    #[test]
    fn into_transaction_preserves_entry_fields() {
        let item = ItemKey::hardware(ItemId::new());
        let ts = Utc::now();
        let tx = LedgerEntry::new(item, dec!(4), TransactionReason::Restock)
            .with_note("PO-1042")
            .into_transaction(ts);
        assert_eq!(tx.item, item);
        assert_eq!(tx.delta, dec!(4));
        assert_eq!(tx.reason, TransactionReason::Restock);
        assert_eq!(tx.note.as_deref(), Some("PO-1042"));
        assert_eq!(tx.occurred_at, ts);
    }
}
