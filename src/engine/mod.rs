//! The leave engine: validation, the balance ledger, and the request
//! lifecycle.
//!
//! [`LeaveEngine`] is the entry point. It composes the pure calendar and
//! overlap helpers, the validator, the ledger, and the state machine over
//! a single [`crate::store::MemoryStore`].

mod calendar;
mod ledger;
mod lifecycle;
mod overlap;
mod schedule;
mod validator;

pub use calendar::{chargeable_days, half_day, is_weekend, working_days};
pub use ledger::{balance_for, carry_forward, credit, debit, CarryForwardOutcome};
pub use lifecycle::{CreateLeaveParams, LeaveEngine, SubmissionOutcome};
pub use overlap::{has_overlap, ranges_intersect};
pub use schedule::DailySummary;
pub use validator::{validate, ValidationOutcome};
