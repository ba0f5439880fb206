//! The adjustment engine: the single mutation entry point for stock.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;

use atelier_core::{ItemKey, Quantity, StockError, StockResult};
use atelier_ledger::{LedgerEntry, Transaction, TransactionReason};

use crate::record::{ItemRecord, MetadataPatch};
use crate::status::derive_status;
use crate::store::ItemStore;

/// Transactional boundary for one adjustment: the ledger append and the
/// record update must land together or not at all.
///
/// The in-memory backend ([`InMemoryInventory`]) commits both writes under a
/// single lock; a durable backend would commit both in one database
/// transaction. On a storage failure nothing is partially applied.
///
/// [`InMemoryInventory`]: crate::memory::InMemoryInventory
pub trait UnitOfWork: Send + Sync {
    fn commit(&self, record: &ItemRecord, entry: LedgerEntry) -> StockResult<Transaction>;
}

impl<U> UnitOfWork for Arc<U>
where
    U: UnitOfWork + ?Sized,
{
    fn commit(&self, record: &ItemRecord, entry: LedgerEntry) -> StockResult<Transaction> {
        (**self).commit(record, entry)
    }
}

/// Serializes read-modify-write cycles per item and keeps the cached record
/// consistent with the ledger.
///
/// Locking is striped by [`ItemKey`]: adjustments for the same item never
/// interleave, adjustments for different items proceed concurrently. There is
/// deliberately no global lock.
pub struct AdjustmentEngine<S, U> {
    store: S,
    uow: U,
    locks: DashMap<ItemKey, Arc<Mutex<()>>>,
}

impl<S, U> AdjustmentEngine<S, U>
where
    S: ItemStore,
    U: UnitOfWork,
{
    pub fn new(store: S, uow: U) -> Self {
        Self {
            store,
            uow,
            locks: DashMap::new(),
        }
    }

    fn item_lock(&self, item: &ItemKey) -> Arc<Mutex<()>> {
        self.locks
            .entry(*item)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Apply one signed quantity change to an item.
    ///
    /// A record is created lazily (quantity zero) when the item is absent and
    /// the delta is positive, i.e. a first-ever receipt; an absent item with a
    /// non-positive delta is `NotFound`. A delta that would drive the quantity
    /// negative fails with `InsufficientStock` and leaves no trace: no ledger
    /// append, no record write.
    pub fn adjust(
        &self,
        item: ItemKey,
        delta: Quantity,
        reason: TransactionReason,
        note: Option<String>,
    ) -> StockResult<ItemRecord> {
        if delta.is_zero() {
            return Err(StockError::validation("adjustment delta cannot be zero"));
        }

        let lock = self.item_lock(&item);
        let _held = lock
            .lock()
            .map_err(|_| StockError::storage("item lock poisoned"))?;

        let mut record = match self.store.get(&item)? {
            Some(record) => record,
            None if delta > Decimal::ZERO => ItemRecord::empty(item, Utc::now()),
            None => return Err(StockError::not_found(format!("no stock record for {item}"))),
        };

        let new_quantity = record.quantity + delta;
        if new_quantity < Decimal::ZERO {
            return Err(StockError::insufficient_stock(item, -delta, record.quantity));
        }

        record.quantity = new_quantity;
        record.status = derive_status(new_quantity, record.reorder_threshold);
        record.updated_at = Utc::now();

        let mut entry = LedgerEntry::new(item, delta, reason);
        entry.note = note;
        let tx = self.uow.commit(&record, entry)?;

        tracing::debug!(
            item = %item,
            delta = %delta,
            reason = %reason,
            quantity = %record.quantity,
            status = %record.status,
            transaction = %tx.id,
            "stock adjusted"
        );

        Ok(record)
    }

    /// Update location/threshold and re-derive the status.
    ///
    /// A threshold edit can change the status without any quantity change, so
    /// the re-derivation lives here, next to the engine's other status
    /// writes, rather than in the store.
    pub fn update_metadata(&self, item: ItemKey, patch: MetadataPatch) -> StockResult<ItemRecord> {
        let lock = self.item_lock(&item);
        let _held = lock
            .lock()
            .map_err(|_| StockError::storage("item lock poisoned"))?;

        let mut record = self.store.upsert_metadata(&item, patch)?;
        let status = derive_status(record.quantity, record.reorder_threshold);
        if status != record.status {
            record.status = status;
            record.updated_at = Utc::now();
            self.store.save(record.clone())?;
        }

        Ok(record)
    }

    /// Read access for callers wired only to the engine.
    pub fn get(&self, item: &ItemKey) -> StockResult<Option<ItemRecord>> {
        self.store.get(item)
    }
}
