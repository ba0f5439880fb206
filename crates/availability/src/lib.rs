//! `atelier-availability` — "can this be built right now" checks.
//!
//! Given a bill of materials and a production multiplier, computes whether
//! every referenced item has sufficient stock, returning the full shortfall
//! list rather than failing fast. Strictly read-only over the item store.

pub mod bom;
pub mod checker;

pub use bom::{AvailabilityReport, BomLine, Shortfall};
pub use checker::{AvailabilityChecker, NameLookup};
