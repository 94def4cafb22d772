//! Leave request model and its closed vocabularies.
//!
//! A [`LeaveRequest`] is created in the `pending` state and moves through
//! the lifecycle owned by the engine's state machine. Requests are never
//! deleted; terminal statuses are retained for audit.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One of the fixed leave categories, each with its own balance counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveCategory {
    /// General-purpose annual leave.
    Casual,
    /// Sick leave.
    Sick,
    /// Special leave (smaller entitlement).
    Special,
}

impl LeaveCategory {
    /// Returns the lowercase wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveCategory::Casual => "casual",
            LeaveCategory::Sick => "sick",
            LeaveCategory::Special => "special",
        }
    }
}

impl fmt::Display for LeaveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a leave request.
///
/// `pending` is the initial state. `rejected` and `cancelled` are terminal.
/// `approved` permits exactly one further transition, to `cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    /// Awaiting a manager decision.
    Pending,
    /// Approved; the balance has been debited.
    Approved,
    /// Rejected by a manager. Terminal.
    Rejected,
    /// Cancelled by the owner. Terminal.
    Cancelled,
}

impl LeaveStatus {
    /// Returns the lowercase wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
            LeaveStatus::Cancelled => "cancelled",
        }
    }

    /// Whether requests in this status block other requests on the same
    /// dates. Only pending and approved requests count as conflicts.
    pub fn is_active(&self) -> bool {
        matches!(self, LeaveStatus::Pending | LeaveStatus::Approved)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a request covers full days or one half of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationKind {
    /// Full working days across the whole range.
    Full,
    /// The morning half of a single day.
    HalfMorning,
    /// The afternoon half of a single day.
    HalfAfternoon,
}

/// Which half of the day a half-day request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HalfDayPeriod {
    /// Morning half.
    Morning,
    /// Afternoon half.
    Afternoon,
}

/// A leave request as submitted by an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Opaque request id.
    pub id: Uuid,
    /// Id of the requesting user.
    pub user_id: u64,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive). Always >= `start_date`.
    pub end_date: NaiveDate,
    /// Chargeable day count computed at validation time (0.5 increments).
    pub days: Decimal,
    /// Leave category charged for this request.
    pub category: LeaveCategory,
    /// Full-day or half-day shape of the request.
    pub duration: DurationKind,
    /// Free-text reason supplied by the requester.
    pub reason: Option<String>,
    /// Current lifecycle status.
    pub status: LeaveStatus,
    /// Reason recorded when a manager rejects the request.
    pub rejection_reason: Option<String>,
    /// Id of the manager who approved or rejected the request.
    pub approved_by: Option<u64>,
    /// When the approve/reject decision was made.
    pub approved_at: Option<DateTime<Utc>>,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Whether the given calendar day falls inside the request's range.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
