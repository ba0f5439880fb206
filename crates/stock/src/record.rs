//! Cached per-item stock state.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use atelier_core::{ItemKey, Quantity};

use crate::status::{derive_status, StockStatus, DEFAULT_REORDER_THRESHOLD};

/// Current state of one stocked item.
///
/// `quantity` is a cache of the running sum of the item's ledger deltas; the
/// ledger is the ground truth. `quantity >= 0` always, and `status` is always
/// consistent with `(quantity, reorder_threshold)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub item: ItemKey,
    pub quantity: Quantity,
    pub status: StockStatus,
    pub storage_location: Option<String>,
    pub reorder_threshold: Option<Quantity>,
    pub updated_at: DateTime<Utc>,
}

impl ItemRecord {
    /// Fresh zero-quantity record. Created lazily on an item's first receipt,
    /// or explicitly when a stocked item is registered.
    pub fn empty(item: ItemKey, now: DateTime<Utc>) -> Self {
        Self {
            item,
            quantity: Decimal::ZERO,
            status: derive_status(Decimal::ZERO, None),
            storage_location: None,
            reorder_threshold: None,
            updated_at: now,
        }
    }

    /// The threshold used for status derivation and reorder listings.
    pub fn effective_threshold(&self) -> Quantity {
        self.reorder_threshold.unwrap_or(DEFAULT_REORDER_THRESHOLD)
    }

    pub fn is_below_threshold(&self) -> bool {
        self.quantity <= self.effective_threshold()
    }
}

/// Partial update of the non-quantity fields. Fields left `None` are
/// unchanged. Quantity and status are exclusively owned by the adjustment
/// engine and cannot be patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataPatch {
    pub storage_location: Option<String>,
    pub reorder_threshold: Option<Quantity>,
}

impl MetadataPatch {
    pub fn location(location: impl Into<String>) -> Self {
        Self {
            storage_location: Some(location.into()),
            ..Self::default()
        }
    }

    pub fn threshold(threshold: Quantity) -> Self {
        Self {
            reorder_threshold: Some(threshold),
            ..Self::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.storage_location = Some(location.into());
        self
    }

    pub fn with_threshold(mut self, threshold: Quantity) -> Self {
        self.reorder_threshold = Some(threshold);
        self
    }

    /// Apply to a record without touching quantity/status.
    pub fn apply_to(&self, record: &mut ItemRecord) {
        if let Some(location) = &self.storage_location {
            record.storage_location = Some(location.clone());
        }
        if let Some(threshold) = self.reorder_threshold {
            record.reorder_threshold = Some(threshold);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::ItemId;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_record_is_out_of_stock() {
        let record = ItemRecord::empty(ItemKey::material(ItemId::new()), Utc::now());
        assert_eq!(record.quantity, dec!(0));
        assert_eq!(record.status, StockStatus::OutOfStock);
    }

    #[test]
    fn effective_threshold_falls_back_to_default() {
        let mut record = ItemRecord::empty(ItemKey::supply(ItemId::new()), Utc::now());
        assert_eq!(record.effective_threshold(), DEFAULT_REORDER_THRESHOLD);

        record.reorder_threshold = Some(dec!(12));
        assert_eq!(record.effective_threshold(), dec!(12));
    }

    #[test]
    fn patch_leaves_unset_fields_untouched() {
        let mut record = ItemRecord::empty(ItemKey::hardware(ItemId::new()), Utc::now());
        record.storage_location = Some("bin 3".to_string());

        MetadataPatch::threshold(dec!(9)).apply_to(&mut record);
        assert_eq!(record.storage_location.as_deref(), Some("bin 3"));
        assert_eq!(record.reorder_threshold, Some(dec!(9)));
    }
}
