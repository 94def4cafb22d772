//! Calendar rules: working-day counts between dates.
//!
//! A working day is a calendar day that is neither a Saturday/Sunday nor a
//! registered holiday. The functions here are pure; holiday lookup happens
//! at the store.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

/// The flat charge for a half-day request.
pub fn half_day() -> Decimal {
    Decimal::new(5, 1)
}

/// Whether the date falls on a Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts the working days in `[start, end]` inclusive.
///
/// Weekends and dates in `holidays` are skipped. The count can be zero
/// when the whole range is weekends/holidays; callers must decide whether
/// zero is acceptable (the validator treats it as an error).
///
/// # Examples
///
/// ```
/// use leave_engine::engine::working_days;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::collections::BTreeSet;
///
/// // Monday through Friday, no holidays.
/// let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 3, 6).unwrap();
/// assert_eq!(working_days(start, end, &BTreeSet::new()), Decimal::from(5));
/// ```
pub fn working_days(start: NaiveDate, end: NaiveDate, holidays: &BTreeSet<NaiveDate>) -> Decimal {
    let mut count = 0i64;
    let mut current = start;
    while current <= end {
        if !is_weekend(current) && !holidays.contains(&current) {
            count += 1;
        }
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    Decimal::from(count)
}

/// Chargeable days for a candidate request.
///
/// Half-day requests are charged a flat 0.5 regardless of the range; the
/// single day is not re-checked against weekends or holidays. This mirrors
/// the submission flow's contract and is pinned by a test as a known
/// limitation.
pub fn chargeable_days(
    start: NaiveDate,
    end: NaiveDate,
    holidays: &BTreeSet<NaiveDate>,
    is_half_day: bool,
) -> Decimal {
    if is_half_day {
        half_day()
    } else {
        working_days(start, end, holidays)
    }
}
