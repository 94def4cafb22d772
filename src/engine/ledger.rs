//! Balance ledger: debits, credits, and the annual carry-forward.
//!
//! Every mutation appends a [`BalanceHistoryEntry`] in the same store
//! transaction, so a committed balance change always has its history row.
//! The functions here run inside a transaction handed down by the caller;
//! they never lock the store themselves.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::config::LeavePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{BalanceHistoryEntry, LeaveBalance, LeaveCategory};
use crate::store::StoreInner;

/// Returns the balance row for `(user_id, year)`, creating it with the
/// policy's default entitlements if absent.
///
/// Not a pure read: the lazy creation is part of the ledger's contract.
pub fn balance_for(
    tx: &mut StoreInner,
    user_id: u64,
    year: i32,
    policy: &LeavePolicy,
) -> LeaveBalance {
    tx.balance_mut_or_insert(user_id, year, &policy.entitlements)
        .clone()
}

/// Debits `days` from the user's counter for `category`.
///
/// Fails with `InsufficientBalance` without touching the counter when the
/// available amount is smaller than `days`; otherwise decrements and
/// appends a history row. Returns the balance after the debit.
#[allow(clippy::too_many_arguments)]
pub fn debit(
    tx: &mut StoreInner,
    user_id: u64,
    year: i32,
    category: LeaveCategory,
    days: Decimal,
    reason: String,
    request_id: Option<Uuid>,
    policy: &LeavePolicy,
    now: DateTime<Utc>,
) -> EngineResult<Decimal> {
    let row = tx.balance_mut_or_insert(user_id, year, &policy.entitlements);
    let available = row.amount(category);
    if available < days {
        return Err(EngineError::InsufficientBalance {
            category,
            available,
            required: days,
        });
    }
    let after = available - days;
    *row.amount_mut(category) = after;
    tx.push_history(BalanceHistoryEntry {
        user_id,
        category,
        delta: -days,
        balance_after: after,
        reason,
        request_id,
        recorded_at: now,
    });
    Ok(after)
}

/// Credits `days` to the user's counter for `category` and appends a
/// history row. Used for refunds and carry-forward. Returns the balance
/// after the credit.
#[allow(clippy::too_many_arguments)]
pub fn credit(
    tx: &mut StoreInner,
    user_id: u64,
    year: i32,
    category: LeaveCategory,
    days: Decimal,
    reason: String,
    request_id: Option<Uuid>,
    policy: &LeavePolicy,
    now: DateTime<Utc>,
) -> Decimal {
    let row = tx.balance_mut_or_insert(user_id, year, &policy.entitlements);
    let after = row.amount(category) + days;
    *row.amount_mut(category) = after;
    tx.push_history(BalanceHistoryEntry {
        user_id,
        category,
        delta: days,
        balance_after: after,
        reason,
        request_id,
        recorded_at: now,
    });
    after
}

/// Result of one carry-forward run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarryForwardOutcome {
    /// The year the batch read balances from.
    pub from_year: i32,
    /// The year the batch created balances for.
    pub to_year: i32,
    /// How many users were rolled into the new year by this run.
    pub carried_users: u32,
}

/// Rolls every `from_year` balance into `from_year + 1`.
///
/// Per user: up to `carry_forward.casual_cap` unused casual days are added
/// on top of the next year's default casual entitlement; sick and special
/// reset to their defaults. Users who already have a row for the next
/// year are skipped, which makes the batch idempotent: running it twice
/// never double-credits.
pub fn carry_forward(
    tx: &mut StoreInner,
    from_year: i32,
    policy: &LeavePolicy,
    now: DateTime<Utc>,
) -> CarryForwardOutcome {
    let to_year = from_year + 1;
    let mut carried_users = 0u32;

    for balance in tx.balances_for_year(from_year) {
        if tx.balance(balance.user_id, to_year).is_some() {
            continue;
        }
        let carried = balance
            .casual
            .min(policy.carry_forward.casual_cap)
            .max(Decimal::ZERO);
        let casual = policy.entitlements.casual + carried;
        tx.insert_balance(LeaveBalance::new(
            balance.user_id,
            to_year,
            casual,
            policy.entitlements.sick,
            policy.entitlements.special,
        ));
        if carried > Decimal::ZERO {
            tx.push_history(BalanceHistoryEntry {
                user_id: balance.user_id,
                category: LeaveCategory::Casual,
                delta: carried,
                balance_after: casual,
                reason: format!("Carried forward from {from_year}"),
                request_id: None,
                recorded_at: now,
            });
        }
        carried_users += 1;
    }

    CarryForwardOutcome {
        from_year,
        to_year,
        carried_users,
    }
}
