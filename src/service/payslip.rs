//! Pay-slip assembly.

use chrono::NaiveDate;
use tracing::debug;

use crate::calculation::RoundingPolicy;
use crate::error::EngineResult;
use crate::models::{CompanyInfo, PaySlip, PaySlipEmployee, Period};
use crate::store::PayrollStore;

use super::{resolve_agreement, settle_employee};

/// Settles one employee and wraps the result in a [`PaySlip`].
///
/// Fails exactly as [`super::calculate_settlement`] does.
pub fn build_payslip(
    store: &dyn PayrollStore,
    company: &CompanyInfo,
    employee_id: &str,
    period: Period,
    issue_date: NaiveDate,
    rounding: RoundingPolicy,
) -> EngineResult<PaySlip> {
    let employee = store.employee(employee_id)?;
    let settlement = settle_employee(store, &employee, period, rounding)?;
    let agreement = resolve_agreement(store, &employee)?;

    let slip_employee = PaySlipEmployee {
        badge_id: employee.badge_id.clone(),
        display_name: employee.display_name(),
        national_id: employee.national_id.clone(),
        hire_date: employee.hire_date,
        agreement_name: agreement.map(|a| a.name),
    };

    let payslip = PaySlip::new(company.clone(), slip_employee, issue_date, settlement);
    debug!(employee_id, period = %period, file = %payslip.file_stem(), "Built pay-slip");

    Ok(payslip)
}
