//! Leave request validation.
//!
//! Checks run in a fixed order and the first failure wins, so a request
//! that is both in the past and overlapping reports the past-date error.
//! Warnings never block; they ride along with a passing outcome.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::LeavePolicy;
use crate::engine::calendar;
use crate::engine::ledger;
use crate::engine::overlap;
use crate::error::{EngineError, EngineResult};
use crate::models::LeaveCategory;
use crate::store::StoreInner;

/// A passing validation: the chargeable day count plus any advisory
/// warnings, joined with `"; "` when there is more than one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Days the request will charge against the balance.
    pub days: Decimal,
    /// Advisory text to surface to the requester, if any.
    pub warning: Option<String>,
}

/// Validates a candidate request against the store state.
///
/// Order of checks: date ordering, past date, working-day count, overlap
/// with the user's active requests, then balance. Pending-request and
/// holiday notices are collected as warnings after the hard checks pass.
#[allow(clippy::too_many_arguments)]
pub fn validate(
    tx: &mut StoreInner,
    policy: &LeavePolicy,
    today: NaiveDate,
    user_id: u64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    category: LeaveCategory,
    is_half_day: bool,
) -> EngineResult<ValidationOutcome> {
    if end_date < start_date {
        return Err(EngineError::InvalidDateRange {
            start: start_date,
            end: end_date,
        });
    }
    if start_date < today {
        return Err(EngineError::PastDate { start: start_date });
    }

    let holiday_dates = tx.holiday_dates_in(start_date, end_date);
    let days = calendar::chargeable_days(start_date, end_date, &holiday_dates, is_half_day);
    if days <= Decimal::ZERO {
        return Err(EngineError::NoWorkingDays);
    }

    if overlap::has_overlap(tx.active_requests(user_id), start_date, end_date) {
        return Err(EngineError::OverlappingLeave);
    }

    let mut warnings = Vec::new();
    if tx.has_pending(user_id) {
        warnings.push("You have other pending leave requests".to_string());
    }

    let balance = ledger::balance_for(tx, user_id, start_date.year(), policy);
    let available = balance.amount(category);
    if available < days {
        return Err(EngineError::InsufficientBalance {
            category,
            available,
            required: days,
        });
    }

    let holidays = tx.holidays_in(start_date, end_date);
    if !holidays.is_empty() {
        let names: Vec<&str> = holidays.iter().map(|h| h.name.as_str()).collect();
        warnings.push(format!("Your leave includes holidays: {}", names.join(", ")));
    }

    let warning = if warnings.is_empty() {
        None
    } else {
        Some(warnings.join("; "))
    };
    Ok(ValidationOutcome { days, warning })
}
