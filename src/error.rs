//! Error types for the leave engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every caller-recoverable condition in the engine. Each error carries
//! a human-readable message and a stable machine-readable code.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{LeaveCategory, LeaveStatus};

/// The main error type for the leave engine.
///
/// All operations in the engine return this error type. Every variant is
/// recoverable by the caller; none is fatal to the process.
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineError;
/// use chrono::NaiveDate;
///
/// let error = EngineError::PastDate {
///     start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
/// };
/// assert_eq!(error.code(), "PAST_DATE");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The end date precedes the start date.
    #[error("end date {end} is before start date {start}")]
    InvalidDateRange {
        /// The requested start date.
        start: NaiveDate,
        /// The requested end date.
        end: NaiveDate,
    },

    /// The request starts before today; retroactive requests are refused.
    #[error("cannot request leave starting in the past ({start})")]
    PastDate {
        /// The requested start date.
        start: NaiveDate,
    },

    /// The requested range contains no working days.
    #[error("no working days in the selected range (all weekends or holidays)")]
    NoWorkingDays,

    /// The range intersects one of the user's pending or approved requests.
    #[error("an active leave request already covers part of this range")]
    OverlappingLeave,

    /// The balance for the category cannot cover the requested days.
    #[error("insufficient {category} balance: available {available}, required {required}")]
    InsufficientBalance {
        /// The leave category whose balance fell short.
        category: LeaveCategory,
        /// The balance currently available.
        available: Decimal,
        /// The number of days the operation required.
        required: Decimal,
    },

    /// No leave request exists with the given id.
    #[error("leave request {request_id} not found")]
    NotFound {
        /// The id that was looked up.
        request_id: Uuid,
    },

    /// The request has already left the pending state.
    #[error("request is already {status}")]
    AlreadyProcessed {
        /// The status the request currently holds.
        status: LeaveStatus,
    },

    /// The acting user does not own the request.
    #[error("only the request owner may cancel it")]
    Forbidden,

    /// The request is in a state that does not permit the transition.
    #[error("cannot cancel a {status} request")]
    InvalidStatus {
        /// The status the request currently holds.
        status: LeaveStatus,
    },

    /// Policy configuration file was not found at the specified path.
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Policy configuration file could not be parsed.
    #[error("failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Returns the stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            EngineError::PastDate { .. } => "PAST_DATE",
            EngineError::NoWorkingDays => "NO_WORKING_DAYS",
            EngineError::OverlappingLeave => "OVERLAPPING_LEAVE",
            EngineError::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            EngineError::NotFound { .. } => "NOT_FOUND",
            EngineError::AlreadyProcessed { .. } => "ALREADY_PROCESSED",
            EngineError::Forbidden => "FORBIDDEN",
            EngineError::InvalidStatus { .. } => "INVALID_STATUS",
            EngineError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            EngineError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
