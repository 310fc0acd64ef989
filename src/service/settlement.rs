//! Settling a single employee.
//!
//! Resolves the employee, agreement and period activity from a
//! [`PayrollStore`], validates them, and hands them to the engine.

use tracing::{debug, info};

use crate::calculation::{RoundingPolicy, compute_settlement};
use crate::error::{EngineError, EngineResult};
use crate::models::{Agreement, Employee, Period, Settlement, SettlementRecord};
use crate::store::PayrollStore;

/// Computes the settlement of one employee for one period.
///
/// # Errors
///
/// - `EmployeeNotFound` when the id is unknown or the employee is inactive.
/// - `AgreementNotFound` when the employee references a missing agreement.
/// - `InvalidEmployee` / `InvalidRecord` when the employee, their agreement
///   or an activity record is malformed. Nothing is computed in that case.
///
/// # Example
///
/// ```no_run
/// use settlement_engine::calculation::RoundingPolicy;
/// use settlement_engine::config::ConfigLoader;
/// use settlement_engine::service::calculate_settlement;
/// use settlement_engine::store::InMemoryStore;
///
/// let config = ConfigLoader::load("./config/payroll")?;
/// let store = InMemoryStore::load("./config/payroll", &config)?;
/// let settlement = calculate_settlement(&store, "1", "2025-03".parse()?, RoundingPolicy::CURRENCY)?;
/// println!("Net pay: {}", settlement.net_pay);
/// # Ok::<(), settlement_engine::error::EngineError>(())
/// ```
pub fn calculate_settlement(
    store: &dyn PayrollStore,
    employee_id: &str,
    period: Period,
    rounding: RoundingPolicy,
) -> EngineResult<Settlement> {
    let employee = store.employee(employee_id)?;
    settle_employee(store, &employee, period, rounding)
}

/// Computes the settlement of an already fetched employee.
pub fn settle_employee(
    store: &dyn PayrollStore,
    employee: &Employee,
    period: Period,
    rounding: RoundingPolicy,
) -> EngineResult<Settlement> {
    employee.validate()?;
    let agreement = resolve_agreement(store, employee)?;
    if let Some(agreement) = &agreement {
        agreement.validate()?;
    }

    let activity = store.period_activity(&employee.id, period)?;
    activity.validate(&employee.id, period)?;

    let settlement = compute_settlement(employee, agreement.as_ref(), &activity, period, rounding);

    debug!(
        employee_id = %employee.id,
        period = %period,
        gross_pay = %settlement.gross_pay(),
        total_deductions = %settlement.total_deductions(),
        net_pay = %settlement.net_pay,
        "Computed settlement"
    );

    Ok(settlement)
}

/// Looks up the employee's agreement, if they reference one.
pub fn resolve_agreement(
    store: &dyn PayrollStore,
    employee: &Employee,
) -> EngineResult<Option<Agreement>> {
    employee
        .agreement_id
        .as_deref()
        .map(|id| store.agreement(id))
        .transpose()
}

/// Computes a settlement and appends it to the employee's history.
///
/// Saving the same period again creates a new record.
pub fn save_settlement(
    store: &dyn PayrollStore,
    employee_id: &str,
    period: Period,
    rounding: RoundingPolicy,
) -> EngineResult<SettlementRecord> {
    let settlement = calculate_settlement(store, employee_id, period, rounding)?;
    let record = store.save_settlement(settlement)?;

    info!(
        record_id = %record.id,
        employee_id = %record.employee_id,
        period = %record.period,
        net_pay = %record.net_pay,
        "Saved settlement"
    );

    Ok(record)
}

/// Returns the saved settlements of one employee, newest period first.
///
/// Saved records stay readable after the employee is deactivated. Fails with
/// `EmployeeNotFound` only when the id has neither records nor an employee
/// behind it.
pub fn settlement_history(
    store: &dyn PayrollStore,
    employee_id: &str,
) -> EngineResult<Vec<SettlementRecord>> {
    let records = store.settlement_history(employee_id)?;
    if records.is_empty() && !store.employee_exists(employee_id)? {
        return Err(EngineError::EmployeeNotFound {
            employee_id: employee_id.to_string(),
        });
    }
    Ok(records)
}
