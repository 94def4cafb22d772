//! Scheduled duties: the daily on-leave summary and stale-request
//! escalation. A host would call these from a cron-style loop; the engine
//! only exposes the single-run operations so tests can drive them with a
//! fixed clock.

use chrono::{Duration, NaiveDate};
use tracing::info;

use crate::engine::lifecycle::LeaveEngine;
use crate::models::{LeaveRequest, OnLeaveToday, UserRole};
use crate::notify::Notification;

/// One day's on-leave roster.
#[derive(Debug, Clone)]
pub struct DailySummary {
    /// The day the summary describes.
    pub date: NaiveDate,
    /// Everyone on approved leave that day, ordered by user id.
    pub on_leave: Vec<OnLeaveToday>,
}

impl LeaveEngine {
    /// Builds today's on-leave summary without sending anything.
    pub fn daily_summary(&self) -> DailySummary {
        DailySummary {
            date: self.clock.today(),
            on_leave: self.today_on_leave(),
        }
    }

    /// Sends today's summary to every manager and HR user.
    ///
    /// Returns the number of recipients attempted; failed deliveries are
    /// logged by the sink path and do not reduce the count.
    pub fn notify_daily_summary(&self) -> usize {
        let summary = self.daily_summary();
        let notification = Notification::DailySummary {
            date: summary.date,
            on_leave: summary.on_leave.clone(),
        };

        let mut recipients = self.directory.users_with_role(UserRole::Manager);
        recipients.extend(self.directory.users_with_role(UserRole::Hr));
        for recipient in &recipients {
            self.notify(recipient.id, &notification);
        }
        info!(
            date = %summary.date,
            on_leave = summary.on_leave.len(),
            recipients = recipients.len(),
            "daily summary sent"
        );
        recipients.len()
    }

    /// Pending requests older than the escalation window, newest first.
    pub fn escalation_candidates(&self) -> Vec<LeaveRequest> {
        let cutoff = self.clock.now() - Duration::hours(self.policy.escalation.pending_hours);
        self.store.read(|s| s.pending_created_before(cutoff))
    }

    /// Alerts HR about every stale pending request. Returns how many
    /// requests were escalated.
    pub fn escalate_stale_requests(&self) -> usize {
        let now = self.clock.now();
        let stale = self.escalation_candidates();
        let hr = self.directory.users_with_role(UserRole::Hr);

        for request in &stale {
            let pending_hours = (now - request.created_at).num_hours();
            let notification = Notification::EscalationAlert {
                request: request.clone(),
                pending_hours,
            };
            for recipient in &hr {
                self.notify(recipient.id, &notification);
            }
        }
        if !stale.is_empty() {
            info!(escalated = stale.len(), "stale pending requests escalated");
        }
        stale.len()
    }
}
