//! Settlement models.
//!
//! This module contains the [`Settlement`] type and its associated structures
//! that capture everything the engine derives for one employee and period:
//! earnings lines, deduction lines, totals, net pay and an audit trace. It
//! also contains [`SettlementRecord`], the immutable historical snapshot
//! written by settlement persistence.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EmployeeSnapshot, Period};

/// Kind tag carried by deduction lines derived from an agreement rate.
pub const PERCENTAGE_KIND: &str = "percentage";

/// One overtime line on the earnings side.
///
/// # Example
///
/// ```
/// use settlement_engine::models::OvertimeLine;
/// use rust_decimal::Decimal;
///
/// let line = OvertimeLine {
///     type_label: "Overtime 50%".to_string(),
///     quantity: Decimal::new(10, 0),
///     multiplier: Decimal::new(15, 1),
///     unit_value: Decimal::new(1875, 0),
///     total: Decimal::new(18750, 0),
///     description: None,
/// };
/// assert_eq!(line.unit_value * line.quantity, line.total);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeLine {
    /// The overtime type name.
    pub type_label: String,
    /// Hours worked.
    pub quantity: Decimal,
    /// Multiplier applied to the hourly value.
    pub multiplier: Decimal,
    /// Value of one overtime hour (rounded for display).
    pub unit_value: Decimal,
    /// Line total.
    pub total: Decimal,
    /// Free-text note carried over from the overtime record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One bonus line on the earnings side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusLine {
    /// Concept printed on the pay-slip.
    pub concept: String,
    /// Amount.
    pub amount: Decimal,
}

/// One line on the deductions side.
///
/// Statutory contributions carry kind [`PERCENTAGE_KIND`] and the applied
/// rate; explicit deductions carry their catalog type and no rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    /// Concept printed on the pay-slip.
    pub concept: String,
    /// Kind tag ("percentage" or the deduction catalog type).
    pub kind: String,
    /// Percentage of gross pay, for statutory lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
    /// Amount withheld.
    pub amount: Decimal,
}

impl DeductionLine {
    /// Returns true for lines derived from an agreement contribution rate.
    pub fn is_statutory(&self) -> bool {
        self.kind == PERCENTAGE_KIND
    }
}

/// Gross pay ("haberes") breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Earnings {
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Sum of overtime line totals.
    pub overtime_total: Decimal,
    /// Sum of bonus amounts.
    pub bonus_total: Decimal,
    /// Gross pay: base + overtime + bonuses.
    pub total: Decimal,
    /// Overtime detail lines.
    pub overtime_lines: Vec<OvertimeLine>,
    /// Bonus detail lines.
    pub bonus_lines: Vec<BonusLine>,
}

/// Deductions ("descuentos") breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// Sum of all deduction lines.
    pub total: Decimal,
    /// Statutory lines first, then explicit deduction lines.
    pub lines: Vec<DeductionLine>,
}

impl Deductions {
    /// Iterates over the statutory contribution lines only.
    pub fn statutory(&self) -> impl Iterator<Item = &DeductionLine> {
        self.lines.iter().filter(|line| line.is_statutory())
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The computed settlement ("liquidación") for one employee and period.
///
/// A settlement is a pure function of its inputs: it carries no identifiers
/// or timestamps, so computing it twice from the same inputs yields equal
/// values. Persisting it wraps it in a [`SettlementRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Who was settled.
    pub employee: EmployeeSnapshot,
    /// The pay period.
    pub period: Period,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Gross pay breakdown.
    pub earnings: Earnings,
    /// Deduction breakdown.
    pub deductions: Deductions,
    /// Gross pay minus total deductions; may be negative.
    pub net_pay: Decimal,
    /// Rule-by-rule trace of the computation.
    pub audit_trace: Vec<AuditStep>,
}

impl Settlement {
    /// Gross pay.
    pub fn gross_pay(&self) -> Decimal {
        self.earnings.total
    }

    /// Total deductions.
    pub fn total_deductions(&self) -> Decimal {
        self.deductions.total
    }
}

/// A persisted settlement snapshot.
///
/// Saving a settlement for an (employee, period) pair that already has a
/// record appends a new record; history is never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRecord {
    /// Unique identifier for this record.
    pub id: Uuid,
    /// The settled employee.
    pub employee_id: String,
    /// The pay period.
    pub period: Period,
    /// When the settlement was saved.
    pub settled_at: DateTime<Utc>,
    /// Base salary at the time of settlement.
    pub base_salary: Decimal,
    /// Gross pay.
    pub gross_pay: Decimal,
    /// Total deductions.
    pub total_deductions: Decimal,
    /// Net pay.
    pub net_pay: Decimal,
    /// The full settlement detail.
    pub settlement: Settlement,
}

impl SettlementRecord {
    /// Wraps a computed settlement in a new historical record.
    pub fn new(settlement: Settlement) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: settlement.employee.id.clone(),
            period: settlement.period,
            settled_at: Utc::now(),
            base_salary: settlement.base_salary,
            gross_pay: settlement.earnings.total,
            total_deductions: settlement.deductions.total,
            net_pay: settlement.net_pay,
            settlement,
        }
    }
}
