//! User directory profiles as seen by the engine.
//!
//! The engine does not own users; it reads them through the
//! [`UserDirectory`](crate::directory::UserDirectory) seam for manager
//! routing and notification targeting.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::request::LeaveCategory;

/// Organizational role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular employee.
    Worker,
    /// Manager of direct reports.
    Manager,
    /// Human resources.
    Hr,
    /// System administrator.
    Admin,
}

/// A user profile exposed by the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Directory-owned user id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Organizational role.
    pub role: UserRole,
    /// Id of the user's manager, if any.
    pub manager_id: Option<u64>,
}

/// One row of the who-is-out-today view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnLeaveToday {
    /// The user on leave.
    pub user_id: u64,
    /// Display name resolved from the directory.
    pub name: String,
    /// The category of the approved leave.
    pub category: LeaveCategory,
    /// First day of the leave.
    pub start_date: NaiveDate,
    /// Last day of the leave.
    pub end_date: NaiveDate,
}
