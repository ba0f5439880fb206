//! The item record store seam.

use std::sync::Arc;

use atelier_core::{ItemKey, ItemKind, StockResult};

use crate::record::{ItemRecord, MetadataPatch};

/// Read/write boundary for cached item records.
///
/// `save` is the engine's write path for quantity/status and must not be
/// called by anything else; `upsert_metadata` never touches quantity or
/// status. A durable implementation backs this and [`UnitOfWork`] with the
/// same transactional store so one adjustment's writes land together.
///
/// [`UnitOfWork`]: crate::engine::UnitOfWork
pub trait ItemStore: Send + Sync {
    fn get(&self, item: &ItemKey) -> StockResult<Option<ItemRecord>>;

    /// Persist a full record. Engine-only write path.
    fn save(&self, record: ItemRecord) -> StockResult<()>;

    /// Update non-quantity fields, creating a zero-quantity record if the
    /// item is not registered yet. Returns the patched record; status is
    /// re-derived by the engine, not here.
    fn upsert_metadata(&self, item: &ItemKey, patch: MetadataPatch) -> StockResult<ItemRecord>;

    /// Records at or below their effective reorder threshold, optionally
    /// filtered by kind. Zero-stock records are included only when
    /// `include_zero_stock` is set (reorder reports usually want them,
    /// "running low" warnings usually do not).
    fn list_below_threshold(
        &self,
        kind: Option<ItemKind>,
        include_zero_stock: bool,
    ) -> StockResult<Vec<ItemRecord>>;
}

impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    fn get(&self, item: &ItemKey) -> StockResult<Option<ItemRecord>> {
        (**self).get(item)
    }

    fn save(&self, record: ItemRecord) -> StockResult<()> {
        (**self).save(record)
    }

    fn upsert_metadata(&self, item: &ItemKey, patch: MetadataPatch) -> StockResult<ItemRecord> {
        (**self).upsert_metadata(item, patch)
    }

    fn list_below_threshold(
        &self,
        kind: Option<ItemKind>,
        include_zero_stock: bool,
    ) -> StockResult<Vec<ItemRecord>> {
        (**self).list_below_threshold(kind, include_zero_stock)
    }
}
