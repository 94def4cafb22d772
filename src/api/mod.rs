//! HTTP API module for the leave engine.
//!
//! This module provides the REST endpoints for submitting, deciding and
//! querying leave requests.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CreateLeaveBody;
pub use response::{ApiError, SubmissionResponse};
pub use state::AppState;
