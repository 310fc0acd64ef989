//! HTTP request handlers for the settlement API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{PaySlip, Period};
use crate::service;

use super::request::{PaySlipQuery, ReportRequest, SettlementRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees/:id/settlement", post(calculate_settlement_handler))
        .route(
            "/employees/:id/settlements",
            post(save_settlement_handler).get(settlement_history_handler),
        )
        .route("/payslips/:id/:period", get(payslip_handler))
        .route("/payslips/:id/:period/text", get(payslip_text_handler))
        .route("/payroll/:period", get(payroll_report_handler))
        .route("/payroll/:period/employees", post(payroll_subset_handler))
        .with_state(state)
}

/// Handler for POST /employees/:id/settlement.
///
/// Computes a settlement without saving it.
async fn calculate_settlement_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    payload: Result<Json<SettlementRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %employee_id, "Processing settlement request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = request.period().and_then(|period| {
        service::calculate_settlement(
            state.store(),
            &employee_id,
            period,
            state.config().rounding(),
        )
    });

    match result {
        Ok(settlement) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                period = %settlement.period,
                net_pay = %settlement.net_pay,
                duration_us = start_time.elapsed().as_micros(),
                "Settlement computed successfully"
            );
            json_response(StatusCode::OK, settlement)
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /employees/:id/settlements.
///
/// Computes a settlement and appends it to the employee's history.
async fn save_settlement_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    payload: Result<Json<SettlementRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %employee_id, "Processing save request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let result = request.period().and_then(|period| {
        service::save_settlement(
            state.store(),
            &employee_id,
            period,
            state.config().rounding(),
        )
    });

    match result {
        Ok(record) => json_response(StatusCode::CREATED, record),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /employees/:id/settlements.
async fn settlement_history_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match service::settlement_history(state.store(), &employee_id) {
        Ok(records) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                records = records.len(),
                "Settlement history returned"
            );
            json_response(StatusCode::OK, records)
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /payslips/:id/:period.
async fn payslip_handler(
    State(state): State<AppState>,
    Path((employee_id, period)): Path<(String, String)>,
    query: Result<Query<PaySlipQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match build_payslip(&state, &employee_id, &period, query) {
        Ok(payslip) => json_response(StatusCode::OK, payslip),
        Err(err) => err.into_logged(correlation_id),
    }
}

/// Handler for GET /payslips/:id/:period/text.
///
/// Returns the pay-slip rendered as plain text.
async fn payslip_text_handler(
    State(state): State<AppState>,
    Path((employee_id, period)): Path<(String, String)>,
    query: Result<Query<PaySlipQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match build_payslip(&state, &employee_id, &period, query) {
        Ok(payslip) => {
            let disposition = format!("inline; filename=\"{}.txt\"", payslip.file_stem());
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                payslip.render_text(),
            )
                .into_response()
        }
        Err(err) => err.into_logged(correlation_id),
    }
}

/// Handler for GET /payroll/:period.
///
/// Settles every active employee for the period.
async fn payroll_report_handler(
    State(state): State<AppState>,
    Path(period): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, period = %period, "Processing payroll report");

    let result = period.parse::<Period>().and_then(|period| {
        service::compute_report(state.store(), period, state.config().rounding())
    });

    match result {
        Ok(report) => json_response(StatusCode::OK, report),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /payroll/:period/employees.
///
/// Settles only the employees listed in the request body.
async fn payroll_subset_handler(
    State(state): State<AppState>,
    Path(period): Path<String>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, period = %period, "Processing payroll subset report");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let result = period.parse::<Period>().and_then(|period| {
        let employee_ids = request.employee_ids()?;
        service::compute_report_for(
            state.store(),
            employee_ids,
            period,
            state.config().rounding(),
        )
    });

    match result {
        Ok(report) => json_response(StatusCode::OK, report),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Failure of a handler step that may come from the engine or the query string.
enum HandlerError {
    Engine(EngineError),
    Query(QueryRejection),
}

impl HandlerError {
    fn into_logged(self, correlation_id: Uuid) -> Response {
        match self {
            HandlerError::Engine(err) => engine_error(correlation_id, err),
            HandlerError::Query(rejection) => {
                warn!(
                    correlation_id = %correlation_id,
                    error = %rejection.body_text(),
                    "Query string rejected"
                );
                json_response(
                    StatusCode::BAD_REQUEST,
                    ApiError::validation_error(rejection.body_text()),
                )
            }
        }
    }
}

impl From<EngineError> for HandlerError {
    fn from(err: EngineError) -> Self {
        HandlerError::Engine(err)
    }
}

fn build_payslip(
    state: &AppState,
    employee_id: &str,
    period: &str,
    query: Result<Query<PaySlipQuery>, QueryRejection>,
) -> Result<PaySlip, HandlerError> {
    let Query(query) = query.map_err(HandlerError::Query)?;
    let period: Period = period.parse()?;
    let issue_date = query
        .issue_date
        .unwrap_or_else(|| Utc::now().date_naive());

    let payslip = service::build_payslip(
        state.store(),
        state.config().company(),
        employee_id,
        period,
        issue_date,
        state.config().rounding(),
    )?;
    Ok(payslip)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        kind = ?err.kind(),
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
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
    json_response(StatusCode::BAD_REQUEST, error)
}
