//! In-memory ledger.
//!
//! Intended for tests/dev and for the single-process desktop deployment.
//! Not optimized for long histories.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use atelier_core::{ItemKey, StockError, StockResult};

use crate::ledger::{HistoryRange, TransactionLedger};
use crate::transaction::{LedgerEntry, Transaction};

/// Append-only in-memory ledger, one vector per item.
///
/// Entries are appended with the current wall-clock timestamp, so each item's
/// vector is already in ascending timestamp order.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    entries: RwLock<HashMap<ItemKey, Vec<Transaction>>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionLedger for InMemoryLedger {
    fn append(&self, entry: LedgerEntry) -> StockResult<Transaction> {
        entry.validate()?;

        let mut entries = self
            .entries
            .write()
            .map_err(|_| StockError::storage("ledger lock poisoned"))?;

        let tx = entry.into_transaction(Utc::now());
        entries.entry(tx.item).or_default().push(tx.clone());
        Ok(tx)
    }

    fn history(&self, item: &ItemKey, range: HistoryRange) -> StockResult<Vec<Transaction>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StockError::storage("ledger lock poisoned"))?;

        Ok(entries
            .get(item)
            .map(|txs| {
                txs.iter()
                    .filter(|tx| range.contains(tx.occurred_at))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
