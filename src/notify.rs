//! Notification seam.
//!
//! The engine emits events to a [`NotificationSink`]; the actual delivery
//! channel (chat, email, webhooks) is an external collaborator. Delivery
//! is fire-and-forget: failures are logged by the caller and never roll
//! back the operation that produced them.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{LeaveRequest, OnLeaveToday};

/// An event the engine wants delivered to a user.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// Confirmation to the requester that their submission was accepted,
    /// with any non-blocking validation warning attached.
    RequestSubmitted {
        /// The created request.
        request: LeaveRequest,
        /// Combined warning string from validation, if any.
        warning: Option<String>,
    },
    /// Asks a manager to decide on a new request.
    ApprovalRequested {
        /// The created request.
        request: LeaveRequest,
        /// Display name of the requester.
        requester_name: String,
    },
    /// Tells the requester their request was approved.
    RequestApproved {
        /// The approved request's id.
        request_id: Uuid,
        /// Display name of the approver.
        approver_name: String,
    },
    /// Tells the requester their request was rejected.
    RequestRejected {
        /// The rejected request's id.
        request_id: Uuid,
        /// Display name of the approver.
        approver_name: String,
        /// Rejection reason, if one was given.
        reason: Option<String>,
    },
    /// Confirms a cancellation to the owner.
    RequestCancelled {
        /// The cancelled request's id.
        request_id: Uuid,
    },
    /// Daily who-is-out summary for managers and HR.
    DailySummary {
        /// The date the summary covers.
        date: NaiveDate,
        /// Everyone on approved leave that day.
        on_leave: Vec<OnLeaveToday>,
    },
    /// A pending request has sat unprocessed past the escalation window.
    EscalationAlert {
        /// The stale request.
        request: LeaveRequest,
        /// How many hours the request has been waiting.
        pending_hours: i64,
    },
}

/// Delivery failure reported by a sink.
#[derive(Debug, Error)]
#[error("notification delivery failed: {0}")]
pub struct DeliveryError(pub String);

/// Destination for engine notifications.
pub trait NotificationSink: Send + Sync {
    /// Delivers one notification to one recipient.
    fn deliver(&self, recipient: u64, notification: &Notification) -> Result<(), DeliveryError>;
}

/// A sink that silently drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn deliver(&self, _recipient: u64, _notification: &Notification) -> Result<(), DeliveryError> {
        Ok(())
    }
}

/// A sink that writes each notification to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn deliver(&self, recipient: u64, notification: &Notification) -> Result<(), DeliveryError> {
        tracing::info!(recipient, ?notification, "notification");
        Ok(())
    }
}

/// A sink that records deliveries for later inspection. Used in tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    delivered: std::sync::Mutex<Vec<(u64, Notification)>>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything delivered so far.
    pub fn delivered(&self) -> Vec<(u64, Notification)> {
        self.delivered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl NotificationSink for RecordingSink {
    fn deliver(&self, recipient: u64, notification: &Notification) -> Result<(), DeliveryError> {
        self.delivered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((recipient, notification.clone()));
        Ok(())
    }
}
