//! Core data models for the leave engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod balance;
mod holiday;
mod request;
mod user;

pub use audit::{AuditAction, AuditEntry};
pub use balance::{BalanceHistoryEntry, LeaveBalance};
pub use holiday::Holiday;
pub use request::{DurationKind, HalfDayPeriod, LeaveCategory, LeaveRequest, LeaveStatus};
pub use user::{OnLeaveToday, UserProfile, UserRole};
