//! Core data models for the settlement engine.
//!
//! This module contains all the domain models used throughout the engine:
//! the inputs (employees, agreements, activity records, periods) and the
//! outputs (settlements, reports, pay-slips).

mod activity;
mod agreement;
mod employee;
mod limits;
mod payslip;
mod period;
mod report;
mod settlement;

pub use activity::{BonusRecord, DeductionRecord, OvertimeRecord, PeriodActivity};
pub use agreement::{
    Agreement, ContributionRate, HEALTH_INSURANCE_LABEL, PAMI_FUND_LABEL, RETIREMENT_LABEL,
    UNION_DUES_LABEL,
};
pub use employee::{Employee, EmployeeSnapshot};
pub use limits::{MAX_AMOUNT, MAX_MULTIPLIER, MAX_OVERTIME_HOURS};
pub use payslip::{CompanyInfo, PaySlip, PaySlipEmployee};
pub use period::Period;
pub use report::{PayrollReport, ReportFailure, ReportRow};
pub use settlement::{
    AuditStep, BonusLine, DeductionLine, Deductions, Earnings, OvertimeLine, PERCENTAGE_KIND,
    Settlement, SettlementRecord,
};
