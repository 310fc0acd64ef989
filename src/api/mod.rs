//! HTTP API module for the settlement engine.
//!
//! This module exposes settlements, settlement history, pay-slips and
//! payroll reports as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PaySlipQuery, ReportRequest, SettlementRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
