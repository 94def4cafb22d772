//! HTTP request handlers for the leave engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, warn};
use uuid::Uuid;

use super::request::{
    ApproveBody, CancelBody, CarryForwardBody, CreateLeaveBody, HistoryQuery, PendingQuery,
    RejectBody, SearchQuery,
};
use super::response::{ApiError, ApiErrorResponse, SubmissionResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/leave", post(create_handler))
        .route("/leave/pending", get(pending_handler))
        .route("/leave/history", get(leave_history_handler))
        .route("/leave/search", get(search_handler))
        .route("/leave/today", get(today_handler))
        .route("/leave/:request_id/approve", post(approve_handler))
        .route("/leave/:request_id/reject", post(reject_handler))
        .route("/leave/:request_id/cancel", post(cancel_handler))
        .route("/balance/:user_id", get(balance_handler))
        .route("/balance/:user_id/history", get(history_handler))
        .route("/carry-forward", post(carry_forward_handler))
        .with_state(state)
}

/// Handler for POST /leave.
///
/// Validates and stores a new leave request, returning it with any
/// non-blocking warnings.
async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLeaveBody>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave submission");

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    match state.engine().create_request(body.into()) {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                request_id = %outcome.request.id,
                days = %outcome.request.days,
                "Leave request stored"
            );
            (
                StatusCode::CREATED,
                Json(SubmissionResponse {
                    request: outcome.request,
                    warning: outcome.warning,
                }),
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Submission rejected");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /leave/pending.
async fn pending_handler(
    State(state): State<AppState>,
    Query(query): Query<PendingQuery>,
) -> impl IntoResponse {
    Json(state.engine().pending_requests(query.manager_id))
}

/// Handler for GET /leave/history.
async fn leave_history_handler(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> impl IntoResponse {
    Json(state.engine().request_history(query.user_id))
}

/// Handler for GET /leave/search.
async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    Json(state.engine().search_requests(&query.into()))
}

/// Handler for GET /leave/today.
async fn today_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.engine().today_on_leave())
}

/// Handler for POST /leave/:request_id/approve.
async fn approve_handler(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    Json(body): Json<ApproveBody>,
) -> impl IntoResponse {
    match state.engine().approve(request_id, body.approver_id) {
        Ok(request) => Json(request).into_response(),
        Err(err) => {
            warn!(request_id = %request_id, error = %err, "Approval failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /leave/:request_id/reject.
async fn reject_handler(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    Json(body): Json<RejectBody>,
) -> impl IntoResponse {
    match state
        .engine()
        .reject(request_id, body.approver_id, body.reason)
    {
        Ok(request) => Json(request).into_response(),
        Err(err) => {
            warn!(request_id = %request_id, error = %err, "Rejection failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /leave/:request_id/cancel.
async fn cancel_handler(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    Json(body): Json<CancelBody>,
) -> impl IntoResponse {
    match state.engine().cancel(request_id, body.user_id) {
        Ok(request) => Json(request).into_response(),
        Err(err) => {
            warn!(request_id = %request_id, error = %err, "Cancellation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /balance/:user_id.
async fn balance_handler(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
) -> impl IntoResponse {
    match state.engine().balance(user_id) {
        Ok(balance) => Json(balance).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for GET /balance/:user_id/history.
async fn history_handler(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
) -> impl IntoResponse {
    Json(state.engine().balance_history(user_id))
}

/// Handler for POST /carry-forward.
async fn carry_forward_handler(
    State(state): State<AppState>,
    Json(body): Json<CarryForwardBody>,
) -> impl IntoResponse {
    match state.engine().carry_forward(body.admin_id) {
        Ok(outcome) => Json(outcome).into_response(),
        Err(err) => {
            warn!(error = %err, "Carry-forward failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}
