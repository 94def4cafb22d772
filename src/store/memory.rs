//! In-memory store with serializing transactions.
//!
//! All tables sit behind one mutex, so every [`MemoryStore::transaction`]
//! is a serialized atomic unit: the check-then-debit and check-then-credit
//! sequences the lifecycle runs cannot interleave. A transaction that
//! returns an error is rolled back to the pre-transaction snapshot.
//!
//! This store is the seam a SQL-backed implementation would replace; the
//! engine only ever touches tables through it.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::config::EntitlementPolicy;
use crate::error::EngineResult;
use crate::models::{
    AuditEntry, BalanceHistoryEntry, Holiday, LeaveBalance, LeaveCategory, LeaveRequest,
    LeaveStatus,
};

/// Optional filters for a request search. An empty filter matches every
/// request; the date bounds apply to the request's start date.
#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    /// Restrict to one user.
    pub user_id: Option<u64>,
    /// Restrict to one lifecycle status.
    pub status: Option<LeaveStatus>,
    /// Restrict to one leave category.
    pub category: Option<LeaveCategory>,
    /// Keep requests starting on or after this date.
    pub start_from: Option<NaiveDate>,
    /// Keep requests starting on or before this date.
    pub start_to: Option<NaiveDate>,
}

/// The tables owned by the store. Only visible inside a transaction or
/// read closure.
#[derive(Debug, Clone, Default)]
pub struct StoreInner {
    requests: HashMap<Uuid, LeaveRequest>,
    balances: HashMap<(u64, i32), LeaveBalance>,
    history: Vec<BalanceHistoryEntry>,
    audit: Vec<AuditEntry>,
    holidays: BTreeMap<NaiveDate, String>,
}

impl StoreInner {
    /// Inserts a new leave request.
    pub fn insert_request(&mut self, request: LeaveRequest) {
        self.requests.insert(request.id, request);
    }

    /// Looks up a request by id.
    pub fn request(&self, id: Uuid) -> Option<&LeaveRequest> {
        self.requests.get(&id)
    }

    /// Looks up a request by id for mutation.
    pub fn request_mut(&mut self, id: Uuid) -> Option<&mut LeaveRequest> {
        self.requests.get_mut(&id)
    }

    /// Returns the user's pending and approved requests.
    pub fn active_requests(&self, user_id: u64) -> Vec<&LeaveRequest> {
        self.requests
            .values()
            .filter(|r| r.user_id == user_id && r.status.is_active())
            .collect()
    }

    /// Returns all of the user's requests regardless of status, newest
    /// first. Terminal requests are retained, so this is the user's full
    /// submission history.
    pub fn requests_for(&self, user_id: u64) -> Vec<LeaveRequest> {
        let mut requests: Vec<LeaveRequest> = self
            .requests
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        requests
    }

    /// Returns the requests matching every set filter, newest first.
    pub fn search_requests(&self, filter: &RequestFilter) -> Vec<LeaveRequest> {
        let mut matched: Vec<LeaveRequest> = self
            .requests
            .values()
            .filter(|r| {
                filter.user_id.map_or(true, |id| r.user_id == id)
                    && filter.status.map_or(true, |s| r.status == s)
                    && filter.category.map_or(true, |c| r.category == c)
                    && filter.start_from.map_or(true, |d| r.start_date >= d)
                    && filter.start_to.map_or(true, |d| r.start_date <= d)
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched
    }

    /// Whether the user has any pending request.
    pub fn has_pending(&self, user_id: u64) -> bool {
        self.requests
            .values()
            .any(|r| r.user_id == user_id && r.status == LeaveStatus::Pending)
    }

    /// Returns all pending requests, newest first.
    pub fn pending_requests(&self) -> Vec<LeaveRequest> {
        let mut pending: Vec<LeaveRequest> = self
            .requests
            .values()
            .filter(|r| r.status == LeaveStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        pending
    }

    /// Returns pending requests created before the cutoff, newest first.
    pub fn pending_created_before(&self, cutoff: DateTime<Utc>) -> Vec<LeaveRequest> {
        let mut stale = self.pending_requests();
        stale.retain(|r| r.created_at < cutoff);
        stale
    }

    /// Returns approved requests whose range covers the given date.
    pub fn approved_on(&self, date: NaiveDate) -> Vec<LeaveRequest> {
        let mut approved: Vec<LeaveRequest> = self
            .requests
            .values()
            .filter(|r| r.status == LeaveStatus::Approved && r.covers(date))
            .cloned()
            .collect();
        approved.sort_by_key(|r| r.user_id);
        approved
    }

    /// Looks up a balance row.
    pub fn balance(&self, user_id: u64, year: i32) -> Option<&LeaveBalance> {
        self.balances.get(&(user_id, year))
    }

    /// Returns the balance row for `(user_id, year)`, creating it with the
    /// given default entitlements if it does not exist yet.
    pub fn balance_mut_or_insert(
        &mut self,
        user_id: u64,
        year: i32,
        defaults: &EntitlementPolicy,
    ) -> &mut LeaveBalance {
        self.balances.entry((user_id, year)).or_insert_with(|| {
            LeaveBalance::new(user_id, year, defaults.casual, defaults.sick, defaults.special)
        })
    }

    /// Inserts a balance row, replacing any existing row for the key.
    pub fn insert_balance(&mut self, balance: LeaveBalance) {
        self.balances
            .insert((balance.user_id, balance.year), balance);
    }

    /// Returns all balance rows for the given year, ordered by user id.
    pub fn balances_for_year(&self, year: i32) -> Vec<LeaveBalance> {
        let mut rows: Vec<LeaveBalance> = self
            .balances
            .values()
            .filter(|b| b.year == year)
            .cloned()
            .collect();
        rows.sort_by_key(|b| b.user_id);
        rows
    }

    /// Appends a balance history entry. History rows are write-once.
    pub fn push_history(&mut self, entry: BalanceHistoryEntry) {
        self.history.push(entry);
    }

    /// Returns the user's balance history, newest first.
    pub fn history_for(&self, user_id: u64) -> Vec<BalanceHistoryEntry> {
        let mut entries: Vec<BalanceHistoryEntry> = self
            .history
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        entries.reverse();
        entries
    }

    /// Appends an audit entry.
    pub fn push_audit(&mut self, entry: AuditEntry) {
        self.audit.push(entry);
    }

    /// Returns all audit entries in insertion order.
    pub fn audit_entries(&self) -> &[AuditEntry] {
        &self.audit
    }

    /// Registers or renames a holiday.
    pub fn set_holiday(&mut self, date: NaiveDate, name: String) {
        self.holidays.insert(date, name);
    }

    /// Returns the holidays falling inside `[start, end]`, in date order.
    pub fn holidays_in(&self, start: NaiveDate, end: NaiveDate) -> Vec<Holiday> {
        self.holidays
            .range(start..=end)
            .map(|(date, name)| Holiday {
                date: *date,
                name: name.clone(),
            })
            .collect()
    }

    /// Returns just the holiday dates inside `[start, end]`.
    pub fn holiday_dates_in(&self, start: NaiveDate, end: NaiveDate) -> BTreeSet<NaiveDate> {
        self.holidays.range(start..=end).map(|(date, _)| *date).collect()
    }
}

/// Serializing in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<StoreInner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` as one atomic unit under the store lock.
    ///
    /// If `f` returns an error, every mutation it made is discarded and
    /// the store is left exactly as it was before the call.
    pub fn transaction<T>(
        &self,
        f: impl FnOnce(&mut StoreInner) -> EngineResult<T>,
    ) -> EngineResult<T> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let snapshot = inner.clone();
        match f(&mut inner) {
            Ok(value) => Ok(value),
            Err(err) => {
                *inner = snapshot;
                Err(err)
            }
        }
    }

    /// Runs a read-only closure under the store lock.
    pub fn read<T>(&self, f: impl FnOnce(&StoreInner) -> T) -> T {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&inner)
    }

    /// Registers a holiday. Convenience wrapper for holiday administration.
    pub fn add_holiday(&self, date: NaiveDate, name: impl Into<String>) {
        let name = name.into();
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.set_holiday(date, name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{DurationKind, LeaveCategory, LeaveStatus};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn make_request(user_id: u64, start: &str, end: &str, status: LeaveStatus) -> LeaveRequest {
        LeaveRequest {
            id: Uuid::new_v4(),
            user_id,
            start_date: make_date(start),
            end_date: make_date(end),
            days: Decimal::ONE,
            category: LeaveCategory::Casual,
            duration: DurationKind::Full,
            reason: None,
            status,
            rejection_reason: None,
            approved_by: None,
            approved_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_failed_transaction_rolls_back() {
        let store = MemoryStore::new();
        let request = make_request(1, "2026-03-02", "2026-03-03", LeaveStatus::Pending);
        let id = request.id;

        let result: EngineResult<()> = store.transaction(|tx| {
            tx.insert_request(request.clone());
            Err(EngineError::Forbidden)
        });

        assert!(result.is_err());
        assert!(store.read(|s| s.request(id).is_none()));
    }

    #[test]
    fn test_successful_transaction_commits() {
        let store = MemoryStore::new();
        let request = make_request(1, "2026-03-02", "2026-03-03", LeaveStatus::Pending);
        let id = request.id;

        store
            .transaction(|tx| {
                tx.insert_request(request.clone());
                Ok(())
            })
            .unwrap();

        assert!(store.read(|s| s.request(id).is_some()));
    }

    #[test]
    fn test_balance_mut_or_insert_creates_with_defaults() {
        let store = MemoryStore::new();
        let defaults = EntitlementPolicy::default();

        let created = store
            .transaction(|tx| Ok(tx.balance_mut_or_insert(9, 2026, &defaults).clone()))
            .unwrap();
        assert_eq!(created.casual, Decimal::new(12, 0));
        assert_eq!(created.special, Decimal::new(5, 0));

        // Second access returns the same row rather than resetting it.
        store
            .transaction(|tx| {
                *tx.balance_mut_or_insert(9, 2026, &defaults)
                    .amount_mut(LeaveCategory::Casual) = Decimal::ONE;
                Ok(())
            })
            .unwrap();
        let reread = store
            .transaction(|tx| Ok(tx.balance_mut_or_insert(9, 2026, &defaults).clone()))
            .unwrap();
        assert_eq!(reread.casual, Decimal::ONE);
    }

    #[test]
    fn test_active_requests_exclude_terminal_statuses() {
        let store = MemoryStore::new();
        store
            .transaction(|tx| {
                tx.insert_request(make_request(1, "2026-03-02", "2026-03-03", LeaveStatus::Pending));
                tx.insert_request(make_request(
                    1,
                    "2026-03-09",
                    "2026-03-10",
                    LeaveStatus::Rejected,
                ));
                tx.insert_request(make_request(
                    1,
                    "2026-03-16",
                    "2026-03-17",
                    LeaveStatus::Cancelled,
                ));
                tx.insert_request(make_request(2, "2026-03-02", "2026-03-03", LeaveStatus::Pending));
                Ok(())
            })
            .unwrap();

        assert_eq!(store.read(|s| s.active_requests(1).len()), 1);
    }

    #[test]
    fn test_holidays_in_returns_range_in_order() {
        let store = MemoryStore::new();
        store.add_holiday(make_date("2026-03-04"), "Founders Day");
        store.add_holiday(make_date("2026-03-20"), "Spring Festival");
        store.add_holiday(make_date("2026-01-01"), "New Year");

        let inside = store.read(|s| s.holidays_in(make_date("2026-03-01"), make_date("2026-03-31")));
        assert_eq!(inside.len(), 2);
        assert_eq!(inside[0].name, "Founders Day");
        assert_eq!(inside[1].name, "Spring Festival");
    }

    #[test]
    fn test_requests_for_keeps_terminal_statuses_newest_first() {
        let store = MemoryStore::new();
        let mut older = make_request(1, "2026-03-02", "2026-03-03", LeaveStatus::Rejected);
        older.created_at = Utc::now() - chrono::Duration::hours(2);
        let newer = make_request(1, "2026-03-09", "2026-03-10", LeaveStatus::Pending);
        let newer_id = newer.id;
        store
            .transaction(|tx| {
                tx.insert_request(older);
                tx.insert_request(newer);
                tx.insert_request(make_request(2, "2026-03-02", "2026-03-03", LeaveStatus::Pending));
                Ok(())
            })
            .unwrap();

        let history = store.read(|s| s.requests_for(1));
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, newer_id);
        assert_eq!(history[1].status, LeaveStatus::Rejected);
    }

    #[test]
    fn test_search_requests_applies_every_set_filter() {
        let store = MemoryStore::new();
        store
            .transaction(|tx| {
                tx.insert_request(make_request(1, "2026-03-02", "2026-03-03", LeaveStatus::Pending));
                tx.insert_request(make_request(
                    1,
                    "2026-04-06",
                    "2026-04-07",
                    LeaveStatus::Approved,
                ));
                tx.insert_request(make_request(2, "2026-03-02", "2026-03-03", LeaveStatus::Pending));
                Ok(())
            })
            .unwrap();

        // Empty filter matches everything.
        assert_eq!(
            store.read(|s| s.search_requests(&RequestFilter::default()).len()),
            3
        );

        let filter = RequestFilter {
            user_id: Some(1),
            status: Some(LeaveStatus::Pending),
            ..RequestFilter::default()
        };
        assert_eq!(store.read(|s| s.search_requests(&filter).len()), 1);

        // Date window on the start date.
        let filter = RequestFilter {
            start_from: Some(make_date("2026-04-01")),
            start_to: Some(make_date("2026-04-30")),
            ..RequestFilter::default()
        };
        let matched = store.read(|s| s.search_requests(&filter));
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].status, LeaveStatus::Approved);
    }

    #[test]
    fn test_pending_requests_newest_first() {
        let store = MemoryStore::new();
        let mut older = make_request(1, "2026-03-02", "2026-03-03", LeaveStatus::Pending);
        older.created_at = Utc::now() - chrono::Duration::hours(2);
        let newer = make_request(1, "2026-03-09", "2026-03-10", LeaveStatus::Pending);
        let newer_id = newer.id;
        store
            .transaction(|tx| {
                tx.insert_request(older);
                tx.insert_request(newer);
                Ok(())
            })
            .unwrap();

        let pending = store.read(|s| s.pending_requests());
        assert_eq!(pending[0].id, newer_id);
    }
}
