//! Overlap detection between a candidate range and existing requests.

use chrono::NaiveDate;

use crate::models::LeaveRequest;

/// Whether two inclusive date ranges intersect.
pub fn ranges_intersect(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && b_start <= a_end
}

/// Whether any of the user's active (pending or approved) requests
/// intersects the candidate range. Rejected and cancelled requests never
/// count as conflicts.
pub fn has_overlap<'a>(
    existing: impl IntoIterator<Item = &'a LeaveRequest>,
    start: NaiveDate,
    end: NaiveDate,
) -> bool {
    existing
        .into_iter()
        .filter(|r| r.status.is_active())
        .any(|r| ranges_intersect(r.start_date, r.end_date, start, end))
}
