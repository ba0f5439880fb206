//! Checkout state transitions.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use atelier_core::{CheckoutId, ItemId, StockError, StockResult, UserId};

use crate::checkout::{CheckoutStatus, ToolCheckout};
use crate::store::CheckoutStore;

/// Drives the checkout state machine over a [`CheckoutStore`].
///
/// Transitions are serialized per tool (same striped-lock shape as the
/// adjustment engine), so a double checkout always loses regardless of call
/// order.
pub struct ToolCheckoutTracker<S> {
    store: S,
    locks: DashMap<ItemId, Arc<Mutex<()>>>,
}

impl<S> ToolCheckoutTracker<S>
where
    S: CheckoutStore,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: DashMap::new(),
        }
    }

    fn tool_lock(&self, tool_id: &ItemId) -> Arc<Mutex<()>> {
        self.locks
            .entry(*tool_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Check a tool out. A tool has at most one active checkout at a time;
    /// a second checkout while one is active (checked out or overdue) is a
    /// conflict.
    pub fn checkout(
        &self,
        tool_id: ItemId,
        by: UserId,
        due_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> StockResult<ToolCheckout> {
        if due_date <= now {
            return Err(StockError::validation(
                "due date must be after the checkout date",
            ));
        }

        let lock = self.tool_lock(&tool_id);
        let _held = lock
            .lock()
            .map_err(|_| StockError::storage("tool lock poisoned"))?;

        if let Some(active) = self.store.active_for_tool(&tool_id)? {
            return Err(StockError::conflict(format!(
                "tool {tool_id} already checked out by {} (due {})",
                active.checked_out_by, active.due_date
            )));
        }

        let checkout = ToolCheckout::new(tool_id, by, now, due_date);
        self.store.save(checkout.clone())?;
        tracing::info!(tool = %tool_id, by = %by, due = %due_date, "tool checked out");
        Ok(checkout)
    }

    /// Return a checked-out (possibly overdue) tool. Returning an
    /// already-returned record is a validation error, not a no-op.
    pub fn return_tool(&self, id: &CheckoutId, now: DateTime<Utc>) -> StockResult<ToolCheckout> {
        let mut checkout = self
            .store
            .get(id)?
            .ok_or_else(|| StockError::not_found(format!("no checkout {id}")))?;

        let lock = self.tool_lock(&checkout.tool_id);
        let _held = lock
            .lock()
            .map_err(|_| StockError::storage("tool lock poisoned"))?;

        // Re-read under the lock; a concurrent return may have won.
        checkout = self
            .store
            .get(id)?
            .ok_or_else(|| StockError::not_found(format!("no checkout {id}")))?;

        if checkout.status == CheckoutStatus::Returned {
            return Err(StockError::validation(format!(
                "checkout {id} already returned"
            )));
        }

        checkout.returned_date = Some(now);
        checkout.status = CheckoutStatus::Returned;
        self.store.save(checkout.clone())?;
        tracing::info!(tool = %checkout.tool_id, checkout = %id, "tool returned");
        Ok(checkout)
    }

    /// Transition every checked-out record past its due date to overdue.
    /// Externally triggered (the desktop app runs it on a timer); returns the
    /// number of records transitioned.
    pub fn sweep_overdue(&self, now: DateTime<Utc>) -> StockResult<usize> {
        let due = self.store.unreturned_due_before(now)?;
        let mut swept = 0;

        for candidate in due {
            let lock = self.tool_lock(&candidate.tool_id);
            let _held = lock
                .lock()
                .map_err(|_| StockError::storage("tool lock poisoned"))?;

            // Re-read: the tool may have been returned since the listing.
            let Some(mut checkout) = self.store.get(&candidate.id)? else {
                continue;
            };
            if checkout.status != CheckoutStatus::CheckedOut {
                continue;
            }

            checkout.status = CheckoutStatus::Overdue;
            self.store.save(checkout)?;
            swept += 1;
        }

        if swept > 0 {
            tracing::info!(count = swept, "checkouts marked overdue");
        }
        Ok(swept)
    }

    /// The active checkout for a tool, if any.
    pub fn active_checkout(&self, tool_id: &ItemId) -> StockResult<Option<ToolCheckout>> {
        self.store.active_for_tool(tool_id)
    }

    /// Every unreturned checkout past its due date at `now`, whether or not a
    /// sweep has transitioned it yet.
    pub fn overdue(&self, now: DateTime<Utc>) -> StockResult<Vec<ToolCheckout>> {
        self.store.unreturned_due_before(now)
    }

    /// Full history for a tool.
    pub fn history(&self, tool_id: &ItemId) -> StockResult<Vec<ToolCheckout>> {
        self.store.history_for_tool(tool_id)
    }
}
