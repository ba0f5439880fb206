//! `atelier-stock` — item records and the adjustment engine.
//!
//! The adjustment engine is the single legal way to mutate an item's
//! quantity: it holds a per-item critical section, validates the delta,
//! appends the ledger transaction and updates the cached [`ItemRecord`]
//! atomically, and re-derives the stock status. Receiving and consumption
//! flows are thin adapters over it, which is what gives the ledger its
//! audit-completeness guarantee.

pub mod adapters;
pub mod engine;
pub mod memory;
pub mod record;
pub mod status;
pub mod store;

pub use engine::{AdjustmentEngine, UnitOfWork};
pub use memory::InMemoryInventory;
pub use record::{ItemRecord, MetadataPatch};
pub use status::{derive_status, StockStatus, DEFAULT_REORDER_THRESHOLD};
pub use store::ItemStore;
