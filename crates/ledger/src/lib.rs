//! `atelier-ledger` — append-only stock transaction ledger.
//!
//! Every quantity change for a stocked item is recorded as an immutable
//! [`Transaction`]. The ledger is the ground truth: the sum of all deltas for
//! an item, in append order, equals that item's current cached quantity.
//! Transactions are never updated or deleted; corrections are new
//! compensating transactions.

pub mod in_memory;
pub mod ledger;
pub mod transaction;

pub use in_memory::InMemoryLedger;
pub use ledger::{HistoryRange, TransactionLedger};
pub use transaction::{LedgerEntry, Transaction, TransactionReason};
