//! Write-only audit entries for lifecycle transitions.
//!
//! Audit entries are a side channel: the engine appends them best-effort
//! and never reads them back for its own decisions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The lifecycle action an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// A request was submitted.
    Created,
    /// A request was approved.
    Approved,
    /// A request was rejected.
    Rejected,
    /// A request was cancelled.
    Cancelled,
    /// The annual carry-forward batch ran.
    CarriedForward,
}

impl AuditAction {
    /// Returns the snake_case wire name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Created => "created",
            AuditAction::Approved => "approved",
            AuditAction::Rejected => "rejected",
            AuditAction::Cancelled => "cancelled",
            AuditAction::CarriedForward => "carried_forward",
        }
    }
}

/// One audit record: who did what, when, to which request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// The request the action applied to, if any (carry-forward has none).
    pub request_id: Option<Uuid>,
    /// The recorded action.
    pub action: AuditAction,
    /// The user who performed the action.
    pub actor_id: u64,
    /// Optional free-text detail, e.g. a rejection reason.
    pub details: Option<String>,
    /// When the action happened.
    pub recorded_at: DateTime<Utc>,
}
