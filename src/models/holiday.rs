//! Organizational holiday calendar entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named holiday. Unique per date; maintained by holiday administration
/// outside the engine and consumed read-only by the calendar rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The calendar date of the holiday.
    pub date: NaiveDate,
    /// The display name of the holiday.
    pub name: String,
}
