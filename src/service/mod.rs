//! Operations that combine the store with the settlement engine.
//!
//! Services fetch and validate inputs through an injected
//! [`PayrollStore`](crate::store::PayrollStore), call the pure calculation
//! layer and log the outcome.

mod payslip;
mod report;
mod settlement;

pub use payslip::build_payslip;
pub use report::{compute_report, compute_report_for};
pub use settlement::{
    calculate_settlement, resolve_agreement, save_settlement, settle_employee, settlement_history,
};
