//! Payroll-wide reports.
//!
//! Every employee is settled independently. An employee whose settlement
//! fails is recorded in [`PayrollReport::failures`] and logged; the rest of
//! the report is still produced.

use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::{info, warn};

use crate::calculation::RoundingPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayrollReport, Period, ReportFailure, ReportRow, Settlement};
use crate::store::PayrollStore;

use super::settle_employee;

/// Settles every active employee for `period`.
///
/// Only a failure to list the employees fails the whole report.
///
/// # Example
///
/// ```no_run
/// use settlement_engine::calculation::RoundingPolicy;
/// use settlement_engine::config::ConfigLoader;
/// use settlement_engine::service::compute_report;
/// use settlement_engine::store::InMemoryStore;
///
/// let config = ConfigLoader::load("./config/payroll")?;
/// let store = InMemoryStore::load("./config/payroll", &config)?;
/// let report = compute_report(&store, "2025-03".parse()?, RoundingPolicy::CURRENCY)?;
/// println!("{} employees, total {}", report.total_employees, report.total_net_pay);
/// # Ok::<(), settlement_engine::error::EngineError>(())
/// ```
pub fn compute_report(
    store: &dyn PayrollStore,
    period: Period,
    rounding: RoundingPolicy,
) -> EngineResult<PayrollReport> {
    let employees = store.active_employees()?;

    let outcomes = employees
        .iter()
        .map(|employee| settle_row(store, employee, period, rounding))
        .collect();

    Ok(assemble(period, outcomes))
}

/// Settles the listed employees for `period`.
///
/// Identifiers that do not resolve to an active employee produce no row and
/// are recorded as `not_found` failures. Repeated identifiers are settled once.
pub fn compute_report_for(
    store: &dyn PayrollStore,
    employee_ids: &[String],
    period: Period,
    rounding: RoundingPolicy,
) -> EngineResult<PayrollReport> {
    let mut seen = HashSet::new();

    let outcomes = employee_ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .map(|id| match store.employee(id) {
            Ok(employee) => settle_row(store, &employee, period, rounding),
            Err(error) => Err(failure(id, None, &error)),
        })
        .collect();

    Ok(assemble(period, outcomes))
}

fn settle_row(
    store: &dyn PayrollStore,
    employee: &Employee,
    period: Period,
    rounding: RoundingPolicy,
) -> Result<ReportRow, ReportFailure> {
    settle_employee(store, employee, period, rounding)
        .map(|settlement| report_row(employee, &settlement))
        .map_err(|error| failure(&employee.id, Some(employee.badge_id.as_str()), &error))
}

fn report_row(employee: &Employee, settlement: &Settlement) -> ReportRow {
    ReportRow {
        employee_id: employee.id.clone(),
        badge_id: employee.badge_id.clone(),
        display_name: employee.display_name(),
        national_id: employee.national_id.clone(),
        base_salary: settlement.base_salary,
        overtime_total: settlement.earnings.overtime_total,
        bonus_total: settlement.earnings.bonus_total,
        gross_total: settlement.gross_pay(),
        deduction_total: settlement.total_deductions(),
        net_pay: settlement.net_pay,
    }
}

fn failure(employee_id: &str, badge_id: Option<&str>, error: &EngineError) -> ReportFailure {
    ReportFailure {
        employee_id: employee_id.to_string(),
        badge_id: badge_id.map(str::to_string),
        kind: error.kind(),
        message: error.to_string(),
    }
}

fn assemble(period: Period, outcomes: Vec<Result<ReportRow, ReportFailure>>) -> PayrollReport {
    let (mut rows, mut failures) = (Vec::new(), Vec::new());
    for outcome in outcomes {
        match outcome {
            Ok(row) => rows.push(row),
            Err(failure) => {
                warn!(
                    employee_id = %failure.employee_id,
                    period = %period,
                    kind = ?failure.kind,
                    error = %failure.message,
                    "Employee left out of payroll report"
                );
                failures.push(failure);
            }
        }
    }

    rows.sort_by(|a, b| {
        a.display_name
            .cmp(&b.display_name)
            .then_with(|| a.badge_id.cmp(&b.badge_id))
    });
    failures.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));

    let total_net_pay: Decimal = rows.iter().map(|row| row.net_pay).sum();

    info!(
        period = %period,
        employees = rows.len(),
        failures = failures.len(),
        total_net_pay = %total_net_pay,
        "Payroll report generated"
    );

    PayrollReport {
        period,
        generated_at: Utc::now(),
        total_employees: rows.len(),
        total_net_pay,
        rows,
        failures,
    }
}
