//! The ledger trait seam.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use atelier_core::{ItemKey, StockResult};

use crate::transaction::{LedgerEntry, Transaction};

/// Optional time bounds for a history query. Bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl HistoryRange {
    /// Unbounded: the full history of an item.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn since(from: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    pub fn until(to: DateTime<Utc>) -> Self {
        Self {
            from: None,
            to: Some(to),
        }
    }

    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        if let Some(from) = self.from {
            if ts < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if ts > to {
                return false;
            }
        }
        true
    }
}

/// Append-only ledger of quantity changes, keyed by stocked item.
///
/// Implementations must:
/// - assign transaction ids and timestamps during append
/// - reject zero deltas with a validation error
/// - never inspect the resulting quantity (the adjustment engine does that
///   before issuing the append)
/// - return history in ascending timestamp order, re-queryable (not a
///   single-pass stream)
pub trait TransactionLedger: Send + Sync {
    /// Append one entry to an item's ledger.
    fn append(&self, entry: LedgerEntry) -> StockResult<Transaction>;

    /// Query an item's history, ascending by timestamp, optionally bounded.
    fn history(&self, item: &ItemKey, range: HistoryRange) -> StockResult<Vec<Transaction>>;
}

impl<L> TransactionLedger for Arc<L>
where
    L: TransactionLedger + ?Sized,
{
    fn append(&self, entry: LedgerEntry) -> StockResult<Transaction> {
        (**self).append(entry)
    }

    fn history(&self, item: &ItemKey, range: HistoryRange) -> StockResult<Vec<Transaction>> {
        (**self).history(item, range)
    }
}
