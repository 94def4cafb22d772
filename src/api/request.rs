//! Request types for the leave engine API.
//!
//! These are the deserialization targets for the HTTP endpoints; each
//! converts into the engine's own parameter types.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::engine::CreateLeaveParams;
use crate::models::{HalfDayPeriod, LeaveCategory, LeaveStatus};
use crate::store::RequestFilter;

/// Body of `POST /leave`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLeaveBody {
    /// Requesting user.
    pub user_id: u64,
    /// First day of leave, inclusive.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Balance category to charge.
    pub category: LeaveCategory,
    /// Free-form reason.
    #[serde(default)]
    pub reason: Option<String>,
    /// Whether this is a half-day request.
    #[serde(default)]
    pub is_half_day: bool,
    /// Which half of the day, when `is_half_day` is set.
    #[serde(default)]
    pub half_day_period: Option<HalfDayPeriod>,
}

impl From<CreateLeaveBody> for CreateLeaveParams {
    fn from(body: CreateLeaveBody) -> Self {
        CreateLeaveParams {
            user_id: body.user_id,
            start_date: body.start_date,
            end_date: body.end_date,
            category: body.category,
            reason: body.reason,
            is_half_day: body.is_half_day,
            half_day_period: body.half_day_period,
        }
    }
}

/// Body of `POST /leave/:request_id/approve`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApproveBody {
    /// The manager approving the request.
    pub approver_id: u64,
}

/// Body of `POST /leave/:request_id/reject`.
#[derive(Debug, Clone, Deserialize)]
pub struct RejectBody {
    /// The manager rejecting the request.
    pub approver_id: u64,
    /// Why the request was rejected.
    pub reason: String,
}

/// Body of `POST /leave/:request_id/cancel`.
#[derive(Debug, Clone, Deserialize)]
pub struct CancelBody {
    /// The owner of the request.
    pub user_id: u64,
}

/// Body of `POST /carry-forward`.
#[derive(Debug, Clone, Deserialize)]
pub struct CarryForwardBody {
    /// The administrator triggering the batch.
    pub admin_id: u64,
}

/// Query parameters of `GET /leave/history`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    /// The user whose request history to return.
    pub user_id: u64,
}

/// Query parameters of `GET /leave/search`. Every filter is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Restrict to one user.
    #[serde(default)]
    pub user_id: Option<u64>,
    /// Restrict to one lifecycle status.
    #[serde(default)]
    pub status: Option<LeaveStatus>,
    /// Restrict to one leave category.
    #[serde(default)]
    pub category: Option<LeaveCategory>,
    /// Keep requests starting on or after this date.
    #[serde(default)]
    pub start_from: Option<NaiveDate>,
    /// Keep requests starting on or before this date.
    #[serde(default)]
    pub start_to: Option<NaiveDate>,
}

impl From<SearchQuery> for RequestFilter {
    fn from(query: SearchQuery) -> Self {
        RequestFilter {
            user_id: query.user_id,
            status: query.status,
            category: query.category,
            start_from: query.start_from,
            start_to: query.start_to,
        }
    }
}

/// Query parameters of `GET /leave/pending`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PendingQuery {
    /// Restrict to requests from this manager's direct reports.
    #[serde(default)]
    pub manager_id: Option<u64>,
}
