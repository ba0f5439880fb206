//! End-to-end receive/consume flows against the in-memory backend.

use std::sync::Arc;

use rust_decimal_macros::dec;

use atelier_core::{ItemId, ItemKey, StockError};
use atelier_ledger::{HistoryRange, TransactionLedger, TransactionReason};
use atelier_stock::{AdjustmentEngine, InMemoryInventory, ItemStore, StockStatus};

fn setup() -> (
    Arc<InMemoryInventory>,
    AdjustmentEngine<Arc<InMemoryInventory>, Arc<InMemoryInventory>>,
) {
    atelier_observability::init_with_default("debug");
    let inventory = Arc::new(InMemoryInventory::new());
    let engine = AdjustmentEngine::new(Arc::clone(&inventory), Arc::clone(&inventory));
    (inventory, engine)
}

#[test]
fn receive_then_consume_then_over_consume() {
    let (inventory, engine) = setup();
    let item = ItemKey::material(ItemId::new());

    // Item starts absent; first receipt creates it.
    assert!(inventory.get(&item).unwrap().is_none());
    let record = engine.receive_purchase_item(item, dec!(10)).unwrap();
    assert_eq!(record.quantity, dec!(10));
    assert_eq!(record.status, StockStatus::InStock);

    let record = engine.consume_for_order(item, dec!(7)).unwrap();
    assert_eq!(record.quantity, dec!(3));
    assert_eq!(record.status, StockStatus::LowStock);

    let err = engine.consume_for_order(item, dec!(5)).unwrap_err();
    assert_eq!(err, StockError::insufficient_stock(item, dec!(5), dec!(3)));

    // The failed consumption left no trace.
    let record = inventory.get(&item).unwrap().unwrap();
    assert_eq!(record.quantity, dec!(3));
    assert_eq!(record.status, StockStatus::LowStock);

    let history = inventory.history(&item, HistoryRange::all()).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].reason, TransactionReason::Restock);
    assert_eq!(history[0].delta, dec!(10));
    assert_eq!(history[1].reason, TransactionReason::Usage);
    assert_eq!(history[1].delta, dec!(-7));

    // Ledger is the ground truth for the cached quantity.
    let sum: rust_decimal::Decimal = history.iter().map(|tx| tx.delta).sum();
    assert_eq!(sum, record.quantity);
}

#[test]
fn reorder_listing_reflects_consumption() {
    let (inventory, engine) = setup();
    let thread = ItemKey::supply(ItemId::new());
    let buckles = ItemKey::hardware(ItemId::new());

    engine.receive_purchase_item(thread, dec!(20)).unwrap();
    engine.receive_purchase_item(buckles, dec!(6)).unwrap();
    assert!(inventory.list_below_threshold(None, true).unwrap().is_empty());

    engine.consume_for_order(thread, dec!(16)).unwrap();
    let low = inventory.list_below_threshold(None, false).unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].item, thread);
    assert_eq!(low[0].status, StockStatus::LowStock);

    // Drained items only show up when zero-stock rows are requested.
    engine.consume_for_order(thread, dec!(4)).unwrap();
    assert!(inventory.list_below_threshold(None, false).unwrap().is_empty());
    let with_zero = inventory.list_below_threshold(None, true).unwrap();
    assert_eq!(with_zero.len(), 1);
    assert_eq!(with_zero[0].status, StockStatus::OutOfStock);
}

#[test]
fn fractional_quantities_are_exact() {
    let (_, engine) = setup();
    let leather = ItemKey::material(ItemId::new());

    engine.receive_purchase_item(leather, dec!(12.5)).unwrap();
    engine.consume_for_order(leather, dec!(4.25)).unwrap();
    let record = engine.consume_for_order(leather, dec!(4.25)).unwrap();
    assert_eq!(record.quantity, dec!(4.00));
    assert_eq!(record.status, StockStatus::LowStock);
}
