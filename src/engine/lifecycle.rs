//! The leave request lifecycle: submission, approval, rejection and
//! cancellation, plus the read paths the API serves.
//!
//! Every state transition runs its guard, its ledger effect and its status
//! write inside a single store transaction. If the debit inside an
//! approval fails, the whole approval is rolled back and the request stays
//! pending. Audit rows and notifications happen after the transaction
//! commits and are best-effort: a failed delivery is logged, never
//! propagated.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::{info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::config::LeavePolicy;
use crate::directory::UserDirectory;
use crate::engine::ledger::{self, CarryForwardOutcome};
use crate::engine::validator;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditAction, AuditEntry, BalanceHistoryEntry, DurationKind, HalfDayPeriod, LeaveBalance,
    LeaveCategory, LeaveRequest, LeaveStatus, OnLeaveToday,
};
use crate::notify::{Notification, NotificationSink};
use crate::store::{MemoryStore, RequestFilter};

/// Input for a new leave request.
#[derive(Debug, Clone)]
pub struct CreateLeaveParams {
    /// Requesting user.
    pub user_id: u64,
    /// First day of leave, inclusive.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Balance category to charge.
    pub category: LeaveCategory,
    /// Free-form reason, optional.
    pub reason: Option<String>,
    /// Whether this is a half-day request.
    pub is_half_day: bool,
    /// Which half, when `is_half_day` is set. Defaults to the morning.
    pub half_day_period: Option<HalfDayPeriod>,
}

/// A stored request together with any validation warnings raised at
/// submission time.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    /// The persisted request, in `Pending` state.
    pub request: LeaveRequest,
    /// Advisory warnings from validation, if any.
    pub warning: Option<String>,
}

/// The engine: owns the store and policy, and drives every operation.
pub struct LeaveEngine {
    pub(super) store: Arc<MemoryStore>,
    pub(super) directory: Arc<dyn UserDirectory>,
    pub(super) notifier: Arc<dyn NotificationSink>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) policy: LeavePolicy,
}

impl LeaveEngine {
    /// Builds an engine over the given collaborators.
    pub fn new(
        store: Arc<MemoryStore>,
        directory: Arc<dyn UserDirectory>,
        notifier: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
        policy: LeavePolicy,
    ) -> Self {
        Self {
            store,
            directory,
            notifier,
            clock,
            policy,
        }
    }

    /// The store backing this engine.
    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    /// The policy this engine enforces.
    pub fn policy(&self) -> &LeavePolicy {
        &self.policy
    }

    /// Validates and stores a new leave request in `Pending` state.
    ///
    /// On success the requester's manager is asked to approve and the
    /// requester gets a submission receipt carrying any warnings.
    pub fn create_request(&self, params: CreateLeaveParams) -> EngineResult<SubmissionOutcome> {
        let now = self.clock.now();
        let today = self.clock.today();

        let duration = if params.is_half_day {
            match params.half_day_period {
                Some(HalfDayPeriod::Afternoon) => DurationKind::HalfAfternoon,
                _ => DurationKind::HalfMorning,
            }
        } else {
            DurationKind::Full
        };

        let (request, warning) = self.store.transaction(|tx| {
            let outcome = validator::validate(
                tx,
                &self.policy,
                today,
                params.user_id,
                params.start_date,
                params.end_date,
                params.category,
                params.is_half_day,
            )?;
            let request = LeaveRequest {
                id: Uuid::new_v4(),
                user_id: params.user_id,
                start_date: params.start_date,
                end_date: params.end_date,
                days: outcome.days,
                category: params.category,
                duration,
                reason: params.reason.clone(),
                status: LeaveStatus::Pending,
                rejection_reason: None,
                approved_by: None,
                approved_at: None,
                created_at: now,
            };
            tx.insert_request(request.clone());
            Ok((request, outcome.warning))
        })?;

        info!(
            request_id = %request.id,
            user_id = request.user_id,
            days = %request.days,
            category = %request.category,
            "leave request created"
        );
        self.record_audit(Some(request.id), AuditAction::Created, params.user_id, None);

        let requester = self.directory.user(params.user_id);
        if let Some(manager_id) = requester.as_ref().and_then(|u| u.manager_id) {
            let requester_name = requester
                .as_ref()
                .map(|u| u.name.clone())
                .unwrap_or_else(|| "Unknown".to_string());
            self.notify(
                manager_id,
                &Notification::ApprovalRequested {
                    request: request.clone(),
                    requester_name,
                },
            );
        }
        self.notify(
            params.user_id,
            &Notification::RequestSubmitted {
                request: request.clone(),
                warning: warning.clone(),
            },
        );

        Ok(SubmissionOutcome { request, warning })
    }

    /// Approves a pending request, debiting the balance atomically.
    ///
    /// If the debit fails the request is left pending, because the debit
    /// and the status flip share one transaction.
    pub fn approve(&self, request_id: Uuid, approver_id: u64) -> EngineResult<LeaveRequest> {
        let now = self.clock.now();

        let request = self.store.transaction(|tx| {
            let current = tx
                .request(request_id)
                .ok_or(EngineError::NotFound { request_id })?;
            if current.status != LeaveStatus::Pending {
                return Err(EngineError::AlreadyProcessed {
                    status: current.status,
                });
            }
            let (user_id, year, category, days) = (
                current.user_id,
                current.start_date.year(),
                current.category,
                current.days,
            );
            ledger::debit(
                tx,
                user_id,
                year,
                category,
                days,
                format!("Leave approved #{request_id}"),
                Some(request_id),
                &self.policy,
                now,
            )?;
            let request = tx
                .request_mut(request_id)
                .ok_or(EngineError::NotFound { request_id })?;
            request.status = LeaveStatus::Approved;
            request.approved_by = Some(approver_id);
            request.approved_at = Some(now);
            Ok(request.clone())
        })?;

        info!(request_id = %request_id, approver_id, "leave request approved");
        self.record_audit(Some(request_id), AuditAction::Approved, approver_id, None);

        let approver_name = self
            .directory
            .user(approver_id)
            .map(|u| u.name)
            .unwrap_or_else(|| "Manager".to_string());
        self.notify(
            request.user_id,
            &Notification::RequestApproved {
                request_id,
                approver_name,
            },
        );
        Ok(request)
    }

    /// Rejects a pending request with a reason. No ledger effect.
    pub fn reject(
        &self,
        request_id: Uuid,
        approver_id: u64,
        reason: String,
    ) -> EngineResult<LeaveRequest> {
        let now = self.clock.now();

        let request = self.store.transaction(|tx| {
            let request = tx
                .request_mut(request_id)
                .ok_or(EngineError::NotFound { request_id })?;
            if request.status != LeaveStatus::Pending {
                return Err(EngineError::AlreadyProcessed {
                    status: request.status,
                });
            }
            request.status = LeaveStatus::Rejected;
            request.rejection_reason = Some(reason.clone());
            request.approved_by = Some(approver_id);
            request.approved_at = Some(now);
            Ok(request.clone())
        })?;

        info!(request_id = %request_id, approver_id, "leave request rejected");
        self.record_audit(
            Some(request_id),
            AuditAction::Rejected,
            approver_id,
            Some(reason.clone()),
        );

        let approver_name = self
            .directory
            .user(approver_id)
            .map(|u| u.name)
            .unwrap_or_else(|| "Manager".to_string());
        self.notify(
            request.user_id,
            &Notification::RequestRejected {
                request_id,
                approver_name,
                reason: Some(reason),
            },
        );
        Ok(request)
    }

    /// Cancels the caller's own pending or approved request.
    ///
    /// Cancelling an approved request refunds the debited days in the same
    /// transaction as the status flip.
    pub fn cancel(&self, request_id: Uuid, user_id: u64) -> EngineResult<LeaveRequest> {
        let now = self.clock.now();

        let request = self.store.transaction(|tx| {
            let current = tx
                .request(request_id)
                .ok_or(EngineError::NotFound { request_id })?;
            if current.user_id != user_id {
                return Err(EngineError::Forbidden);
            }
            match current.status {
                LeaveStatus::Pending | LeaveStatus::Approved => {}
                status => return Err(EngineError::InvalidStatus { status }),
            }
            let was_approved = current.status == LeaveStatus::Approved;
            let (year, category, days) =
                (current.start_date.year(), current.category, current.days);
            if was_approved {
                ledger::credit(
                    tx,
                    user_id,
                    year,
                    category,
                    days,
                    format!("Refund for cancelled leave #{request_id}"),
                    Some(request_id),
                    &self.policy,
                    now,
                );
            }
            let request = tx
                .request_mut(request_id)
                .ok_or(EngineError::NotFound { request_id })?;
            request.status = LeaveStatus::Cancelled;
            Ok(request.clone())
        })?;

        info!(request_id = %request_id, user_id, "leave request cancelled");
        self.record_audit(Some(request_id), AuditAction::Cancelled, user_id, None);
        self.notify(user_id, &Notification::RequestCancelled { request_id });
        Ok(request)
    }

    /// Looks up a request by id.
    pub fn request(&self, request_id: Uuid) -> EngineResult<LeaveRequest> {
        self.store
            .read(|s| s.request(request_id).cloned())
            .ok_or(EngineError::NotFound { request_id })
    }

    /// The user's balance for the current year, created lazily at the
    /// policy defaults if this is the first touch.
    pub fn balance(&self, user_id: u64) -> EngineResult<LeaveBalance> {
        let year = self.clock.today().year();
        self.store
            .transaction(|tx| Ok(ledger::balance_for(tx, user_id, year, &self.policy)))
    }

    /// The user's balance history, newest first.
    pub fn balance_history(&self, user_id: u64) -> Vec<BalanceHistoryEntry> {
        self.store.read(|s| s.history_for(user_id))
    }

    /// The user's own leave requests, newest first, including rejected
    /// and cancelled ones.
    pub fn request_history(&self, user_id: u64) -> Vec<LeaveRequest> {
        self.store.read(|s| s.requests_for(user_id))
    }

    /// Requests matching the given filters, newest first.
    pub fn search_requests(&self, filter: &RequestFilter) -> Vec<LeaveRequest> {
        self.store.read(|s| s.search_requests(filter))
    }

    /// Pending requests, newest first. With a manager id, only requests
    /// from that manager's direct reports are returned.
    pub fn pending_requests(&self, manager_id: Option<u64>) -> Vec<LeaveRequest> {
        let mut pending = self.store.read(|s| s.pending_requests());
        if let Some(manager_id) = manager_id {
            pending.retain(|r| {
                self.directory
                    .user(r.user_id)
                    .and_then(|u| u.manager_id)
                    .is_some_and(|m| m == manager_id)
            });
        }
        pending
    }

    /// Who is on approved leave today, ordered by user id.
    pub fn today_on_leave(&self) -> Vec<OnLeaveToday> {
        let today = self.clock.today();
        self.store
            .read(|s| s.approved_on(today))
            .into_iter()
            .map(|r| OnLeaveToday {
                user_id: r.user_id,
                name: self
                    .directory
                    .user(r.user_id)
                    .map(|u| u.name)
                    .unwrap_or_else(|| "Unknown".to_string()),
                category: r.category,
                start_date: r.start_date,
                end_date: r.end_date,
            })
            .collect()
    }

    /// Rolls the current year's balances into the next year.
    pub fn carry_forward(&self, admin_id: u64) -> EngineResult<CarryForwardOutcome> {
        let now = self.clock.now();
        let from_year = self.clock.today().year();

        let outcome = self
            .store
            .transaction(|tx| Ok(ledger::carry_forward(tx, from_year, &self.policy, now)))?;

        info!(
            from_year = outcome.from_year,
            carried_users = outcome.carried_users,
            "carry-forward completed"
        );
        self.record_audit(
            None,
            AuditAction::CarriedForward,
            admin_id,
            Some(format!(
                "{} users rolled into {}",
                outcome.carried_users, outcome.to_year
            )),
        );
        Ok(outcome)
    }

    /// Appends an audit row. Audit failures are logged and swallowed so
    /// they never undo a committed transition.
    pub(super) fn record_audit(
        &self,
        request_id: Option<Uuid>,
        action: AuditAction,
        actor_id: u64,
        details: Option<String>,
    ) {
        let entry = AuditEntry {
            request_id,
            action,
            actor_id,
            details,
            recorded_at: self.clock.now(),
        };
        let result = self.store.transaction(|tx| {
            tx.push_audit(entry.clone());
            Ok(())
        });
        if let Err(err) = result {
            warn!(action = action.as_str(), %err, "failed to record audit entry");
        }
    }

    /// Fire-and-forget delivery.
    pub(super) fn notify(&self, recipient: u64, notification: &Notification) {
        if let Err(err) = self.notifier.deliver(recipient, notification) {
            warn!(recipient, %err, "notification delivery failed");
        }
    }
}
