//! Per-user balance counters and the append-only balance history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::request::LeaveCategory;

/// Leave balance for one user and accounting year.
///
/// Exactly one row exists per `(user_id, year)`; the ledger creates it
/// lazily with the policy's default entitlements on first access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The user the balance belongs to.
    pub user_id: u64,
    /// The accounting year the counters apply to.
    pub year: i32,
    /// Remaining casual days.
    pub casual: Decimal,
    /// Remaining sick days.
    pub sick: Decimal,
    /// Remaining special days.
    pub special: Decimal,
}

impl LeaveBalance {
    /// Creates a balance row with the given starting counters.
    pub fn new(user_id: u64, year: i32, casual: Decimal, sick: Decimal, special: Decimal) -> Self {
        Self {
            user_id,
            year,
            casual,
            sick,
            special,
        }
    }

    /// Returns the counter for the given category.
    pub fn amount(&self, category: LeaveCategory) -> Decimal {
        match category {
            LeaveCategory::Casual => self.casual,
            LeaveCategory::Sick => self.sick,
            LeaveCategory::Special => self.special,
        }
    }

    /// Returns a mutable handle to the counter for the given category.
    pub fn amount_mut(&mut self, category: LeaveCategory) -> &mut Decimal {
        match category {
            LeaveCategory::Casual => &mut self.casual,
            LeaveCategory::Sick => &mut self.sick,
            LeaveCategory::Special => &mut self.special,
        }
    }
}

/// An append-only record of one balance change.
///
/// Written on every debit, refund, and carry-forward; never updated or
/// deleted afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceHistoryEntry {
    /// The user whose balance changed.
    pub user_id: u64,
    /// The category that changed.
    pub category: LeaveCategory,
    /// Signed day delta: positive for credit, negative for debit.
    pub delta: Decimal,
    /// The counter value after the change was applied.
    pub balance_after: Decimal,
    /// Human-readable reason, e.g. "Leave approved #<id>".
    pub reason: String,
    /// The leave request that caused the change, if any.
    pub request_id: Option<Uuid>,
    /// When the change was recorded.
    pub recorded_at: DateTime<Utc>,
}
