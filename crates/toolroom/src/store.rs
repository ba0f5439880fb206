//! Checkout persistence seam.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use atelier_core::{CheckoutId, ItemId, StockError, StockResult};

use crate::checkout::ToolCheckout;

/// Storage boundary for checkout records. Records are historical: saved and
/// updated, never deleted.
pub trait CheckoutStore: Send + Sync {
    fn get(&self, id: &CheckoutId) -> StockResult<Option<ToolCheckout>>;

    fn save(&self, checkout: ToolCheckout) -> StockResult<()>;

    /// The at-most-one active (checked out or overdue) checkout for a tool.
    fn active_for_tool(&self, tool_id: &ItemId) -> StockResult<Option<ToolCheckout>>;

    /// Unreturned records whose due date has passed: sweep input and the
    /// overdue listing. Includes records a previous sweep already marked
    /// overdue.
    fn unreturned_due_before(&self, now: DateTime<Utc>) -> StockResult<Vec<ToolCheckout>>;

    /// Full checkout history for a tool, ascending by checkout date.
    fn history_for_tool(&self, tool_id: &ItemId) -> StockResult<Vec<ToolCheckout>>;
}

impl<S> CheckoutStore for Arc<S>
where
    S: CheckoutStore + ?Sized,
{
    fn get(&self, id: &CheckoutId) -> StockResult<Option<ToolCheckout>> {
        (**self).get(id)
    }

    fn save(&self, checkout: ToolCheckout) -> StockResult<()> {
        (**self).save(checkout)
    }

    fn active_for_tool(&self, tool_id: &ItemId) -> StockResult<Option<ToolCheckout>> {
        (**self).active_for_tool(tool_id)
    }

    fn unreturned_due_before(&self, now: DateTime<Utc>) -> StockResult<Vec<ToolCheckout>> {
        (**self).unreturned_due_before(now)
    }

    fn history_for_tool(&self, tool_id: &ItemId) -> StockResult<Vec<ToolCheckout>> {
        (**self).history_for_tool(tool_id)
    }
}

/// In-memory checkout store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCheckoutStore {
    checkouts: RwLock<HashMap<CheckoutId, ToolCheckout>>,
}

impl InMemoryCheckoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
    ) -> StockResult<std::sync::RwLockReadGuard<'_, HashMap<CheckoutId, ToolCheckout>>> {
        self.checkouts
            .read()
            .map_err(|_| StockError::storage("checkout lock poisoned"))
    }
}

impl CheckoutStore for InMemoryCheckoutStore {
    fn get(&self, id: &CheckoutId) -> StockResult<Option<ToolCheckout>> {
        Ok(self.read()?.get(id).cloned())
    }

    fn save(&self, checkout: ToolCheckout) -> StockResult<()> {
        let mut checkouts = self
            .checkouts
            .write()
            .map_err(|_| StockError::storage("checkout lock poisoned"))?;
        checkouts.insert(checkout.id, checkout);
        Ok(())
    }

    fn active_for_tool(&self, tool_id: &ItemId) -> StockResult<Option<ToolCheckout>> {
        Ok(self
            .read()?
            .values()
            .find(|co| co.tool_id == *tool_id && co.is_active())
            .cloned())
    }

    fn unreturned_due_before(&self, now: DateTime<Utc>) -> StockResult<Vec<ToolCheckout>> {
        Ok(self
            .read()?
            .values()
            .filter(|co| co.returned_date.is_none() && co.due_date < now)
            .cloned()
            .collect())
    }

    fn history_for_tool(&self, tool_id: &ItemId) -> StockResult<Vec<ToolCheckout>> {
        let mut history: Vec<ToolCheckout> = self
            .read()?
            .values()
            .filter(|co| co.tool_id == *tool_id)
            .cloned()
            .collect();
        history.sort_by_key(|co| co.checked_out_date);
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::CheckoutStatus;
    use atelier_core::UserId;
    use chrono::Duration;

    fn checkout(tool_id: ItemId, due_in: Duration) -> ToolCheckout {
        let now = Utc::now();
        ToolCheckout::new(tool_id, UserId::new(), now, now + due_in)
    }

    #[test]
    fn active_lookup_ignores_returned_checkouts() {
        let store = InMemoryCheckoutStore::new();
        let tool = ItemId::new();

        let mut returned = checkout(tool, Duration::days(1));
        returned.status = CheckoutStatus::Returned;
        returned.returned_date = Some(Utc::now());
        store.save(returned).unwrap();

        assert!(store.active_for_tool(&tool).unwrap().is_none());

        let active = checkout(tool, Duration::days(1));
        store.save(active.clone()).unwrap();
        assert_eq!(store.active_for_tool(&tool).unwrap(), Some(active));
    }

    #[test]
    fn due_before_returns_unreturned_past_due_records() {
        let store = InMemoryCheckoutStore::new();
        let now = Utc::now();

        let past_due = checkout(ItemId::new(), Duration::days(-1));
        store.save(past_due.clone()).unwrap();

        let mut already_overdue = checkout(ItemId::new(), Duration::days(-2));
        already_overdue.status = CheckoutStatus::Overdue;
        store.save(already_overdue.clone()).unwrap();

        let mut returned = checkout(ItemId::new(), Duration::days(-3));
        returned.status = CheckoutStatus::Returned;
        returned.returned_date = Some(now);
        store.save(returned).unwrap();

        let not_due = checkout(ItemId::new(), Duration::days(3));
        store.save(not_due).unwrap();

        let mut due: Vec<_> = store
            .unreturned_due_before(now)
            .unwrap()
            .into_iter()
            .map(|co| co.id)
            .collect();
        due.sort_by_key(|id| *id.as_uuid());
        let mut expected = vec![past_due.id, already_overdue.id];
        expected.sort_by_key(|id| *id.as_uuid());
        assert_eq!(due, expected);
    }

    #[test]
    fn history_is_per_tool_and_ascending() {
        let store = InMemoryCheckoutStore::new();
        let tool = ItemId::new();
        let now = Utc::now();

        let mut second = checkout(tool, Duration::days(1));
        second.checked_out_date = now;
        let mut first = checkout(tool, Duration::days(1));
        first.checked_out_date = now - Duration::days(10);
        first.status = CheckoutStatus::Returned;
        first.returned_date = Some(now - Duration::days(9));

        store.save(second.clone()).unwrap();
        store.save(first.clone()).unwrap();
        store.save(checkout(ItemId::new(), Duration::days(1))).unwrap();

        let history = store.history_for_tool(&tool).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, first.id);
        assert_eq!(history[1].id, second.id);
    }
}
