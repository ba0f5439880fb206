//! Checkout record and status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use atelier_core::{CheckoutId, ItemId, UserId};

/// Checkout lifecycle. Initial `CheckedOut`, terminal `Returned`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStatus {
    CheckedOut,
    Overdue,
    Returned,
}

impl CheckoutStatus {
    /// Active checkouts block further checkouts of the same tool.
    pub fn is_active(&self) -> bool {
        matches!(self, CheckoutStatus::CheckedOut | CheckoutStatus::Overdue)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutStatus::Returned)
    }
}

impl core::fmt::Display for CheckoutStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            CheckoutStatus::CheckedOut => "checked_out",
            CheckoutStatus::Overdue => "overdue",
            CheckoutStatus::Returned => "returned",
        };
        f.write_str(s)
    }
}

/// One checkout of one tool.
///
/// Invariants: `status == Returned` iff `returned_date` is set; `Overdue` iff
/// unreturned and the due date has passed (as of the last sweep).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCheckout {
    pub id: CheckoutId,
    pub tool_id: ItemId,
    pub checked_out_by: UserId,
    pub checked_out_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub returned_date: Option<DateTime<Utc>>,
    pub status: CheckoutStatus,
}

impl ToolCheckout {
    pub fn new(
        tool_id: ItemId,
        checked_out_by: UserId,
        checked_out_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CheckoutId::new(),
            tool_id,
            checked_out_by,
            checked_out_date,
            due_date,
            returned_date: None,
            status: CheckoutStatus::CheckedOut,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Whether the record should read as overdue at `now`, independent of
    /// whether a sweep has already transitioned it.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.returned_date.is_none() && self.due_date < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn checkout(due_in: Duration) -> ToolCheckout {
        let now = Utc::now();
        ToolCheckout::new(ItemId::new(), UserId::new(), now, now + due_in)
    }

    #[test]
    fn new_checkout_is_active_and_not_returned() {
        let co = checkout(Duration::days(7));
        assert_eq!(co.status, CheckoutStatus::CheckedOut);
        assert!(co.is_active());
        assert!(co.returned_date.is_none());
    }

    #[test]
    fn overdue_is_driven_by_the_due_date() {
        let co = checkout(Duration::days(7));
        assert!(!co.is_overdue(Utc::now()));
        assert!(co.is_overdue(co.due_date + Duration::seconds(1)));
    }

    #[test]
    fn overdue_status_is_still_active() {
        assert!(CheckoutStatus::Overdue.is_active());
        assert!(!CheckoutStatus::Returned.is_active());
        assert!(CheckoutStatus::Returned.is_terminal());
    }
}
