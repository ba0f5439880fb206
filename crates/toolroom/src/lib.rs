//! `atelier-toolroom` — tool checkout tracking.
//!
//! A small state machine (checked out → overdue → returned) driven by due
//! dates rather than quantity. Checkout records are historical and never
//! deleted.

pub mod checkout;
pub mod store;
pub mod tracker;

pub use checkout::{CheckoutStatus, ToolCheckout};
pub use store::{CheckoutStore, InMemoryCheckoutStore};
pub use tracker::ToolCheckoutTracker;
