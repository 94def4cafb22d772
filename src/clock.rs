//! Injectable time source.
//!
//! The validator's past-date rule and the ledger's accounting year both
//! depend on "today", so the engine takes an explicit clock instead of
//! reading the system time directly.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

/// A source of the current instant.
pub trait Clock: Send + Sync {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current calendar date in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a fixed instant, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock frozen at the given instant.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Creates a clock frozen at 08:00 UTC on the given date.
    pub fn on_date(date: NaiveDate) -> Self {
        let time = NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default();
        Self {
            now: Utc.from_utc_datetime(&date.and_time(time)),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_reports_its_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let clock = FixedClock::on_date(date);
        assert_eq!(clock.today(), date);
    }

    #[test]
    fn test_system_clock_today_matches_now() {
        let clock = SystemClock;
        assert_eq!(clock.today(), clock.now().date_naive());
    }
}
