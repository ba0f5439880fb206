//! `atelier-core` — shared primitives for the inventory core.
//!
//! Strongly-typed identifiers, the stocked-item identity, quantities, and the
//! error taxonomy. This crate contains **pure domain** types (no persistence
//! or I/O concerns).

pub mod error;
pub mod id;
pub mod item;

pub use error::{StockError, StockResult};
pub use id::{CheckoutId, ItemId, TransactionId, UserId};
pub use item::{ItemKey, ItemKind};

/// Stocked quantities are non-negative rationals (fractional units such as
/// square feet of leather or meters of thread are common). Signed values are
/// only used for ledger deltas.
pub type Quantity = rust_decimal::Decimal;
