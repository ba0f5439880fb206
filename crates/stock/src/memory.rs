//! Combined in-memory inventory backend.
//!
//! One lock over both the records and the ledger, so a [`UnitOfWork`] commit
//! is genuinely atomic: a reader never observes a ledger entry without the
//! corresponding quantity update, or vice versa.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use rust_decimal::Decimal;

use atelier_core::{ItemKey, ItemKind, StockError, StockResult};
use atelier_ledger::{HistoryRange, LedgerEntry, Transaction, TransactionLedger};

use crate::engine::UnitOfWork;
use crate::record::{ItemRecord, MetadataPatch};
use crate::store::ItemStore;

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<ItemKey, ItemRecord>,
    ledger: HashMap<ItemKey, Vec<Transaction>>,
}

/// In-memory item store + ledger + unit of work behind a single `RwLock`.
///
/// Intended for tests/dev and the single-process desktop deployment. Wire the
/// same instance into the engine as both the store and the unit of work:
///
/// ```
/// use std::sync::Arc;
/// use atelier_stock::{AdjustmentEngine, InMemoryInventory};
///
/// let inventory = Arc::new(InMemoryInventory::new());
/// let engine = AdjustmentEngine::new(Arc::clone(&inventory), Arc::clone(&inventory));
/// # let _ = engine;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    inner: RwLock<Inner>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StockResult<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| StockError::storage("inventory lock poisoned"))
    }

    fn write(&self) -> StockResult<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| StockError::storage("inventory lock poisoned"))
    }
}

impl ItemStore for InMemoryInventory {
    fn get(&self, item: &ItemKey) -> StockResult<Option<ItemRecord>> {
        Ok(self.read()?.records.get(item).cloned())
    }

    fn save(&self, record: ItemRecord) -> StockResult<()> {
        self.write()?.records.insert(record.item, record);
        Ok(())
    }

    fn upsert_metadata(&self, item: &ItemKey, patch: MetadataPatch) -> StockResult<ItemRecord> {
        let mut inner = self.write()?;
        let record = inner
            .records
            .entry(*item)
            .or_insert_with(|| ItemRecord::empty(*item, Utc::now()));
        patch.apply_to(record);
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    fn list_below_threshold(
        &self,
        kind: Option<ItemKind>,
        include_zero_stock: bool,
    ) -> StockResult<Vec<ItemRecord>> {
        let inner = self.read()?;
        let mut records: Vec<ItemRecord> = inner
            .records
            .values()
            .filter(|r| kind.is_none_or(|k| r.item.kind == k))
            .filter(|r| r.is_below_threshold())
            .filter(|r| include_zero_stock || r.quantity > Decimal::ZERO)
            .cloned()
            .collect();

        // Deterministic order for reports.
        records.sort_by_key(|r| (r.item.kind.as_str(), *r.item.id.as_uuid()));
        Ok(records)
    }
}

impl TransactionLedger for InMemoryInventory {
    fn append(&self, entry: LedgerEntry) -> StockResult<Transaction> {
        entry.validate()?;

        let mut inner = self.write()?;
        let tx = entry.into_transaction(Utc::now());
        inner.ledger.entry(tx.item).or_default().push(tx.clone());
        Ok(tx)
    }

    fn history(&self, item: &ItemKey, range: HistoryRange) -> StockResult<Vec<Transaction>> {
        let inner = self.read()?;
        Ok(inner
            .ledger
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

impl UnitOfWork for InMemoryInventory {
    fn commit(&self, record: &ItemRecord, entry: LedgerEntry) -> StockResult<Transaction> {
        entry.validate()?;

        // One write lock covers both mutations: both or neither.
        let mut inner = self.write()?;
        let tx = entry.into_transaction(record.updated_at);
        inner.ledger.entry(tx.item).or_default().push(tx.clone());
        inner.records.insert(record.item, record.clone());
        Ok(tx)
    }
}
