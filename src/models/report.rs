//! Payroll report models.
//!
//! A [`PayrollReport`] summarizes the settlements of many employees for one
//! period. Employees whose settlement could not be computed are listed in
//! `failures` instead of `rows` and contribute nothing to the totals.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

use super::Period;

/// One employee's line in a payroll report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Employee identifier.
    pub employee_id: String,
    /// Badge number.
    pub badge_id: String,
    /// "Last, First".
    pub display_name: String,
    /// National identity document number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Overtime total.
    pub overtime_total: Decimal,
    /// Bonus total.
    pub bonus_total: Decimal,
    /// Gross pay.
    pub gross_total: Decimal,
    /// Total deductions.
    pub deduction_total: Decimal,
    /// Net pay.
    pub net_pay: Decimal,
}

/// Why an employee was left out of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFailure {
    /// The identifier that failed.
    pub employee_id: String,
    /// Badge number, when the employee itself could be resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_id: Option<String>,
    /// Failure class.
    pub kind: ErrorKind,
    /// Error message.
    pub message: String,
}

/// Payroll-wide settlement summary ("nómina") for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// The pay period.
    pub period: Period,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of employees included in `rows`.
    pub total_employees: usize,
    /// Sum of the included employees' net pay.
    pub total_net_pay: Decimal,
    /// Included employees, ordered by display name.
    pub rows: Vec<ReportRow>,
    /// Employees excluded because their settlement failed.
    #[serde(default)]
    pub failures: Vec<ReportFailure>,
}
