//! Overtime valuation.
//!
//! Overtime is paid from the hourly value of the monthly salary, assuming a
//! 30-day month of 8-hour days, scaled by the overtime type's multiplier.

use rust_decimal::Decimal;

use crate::models::{AuditStep, OvertimeLine, OvertimeRecord};

use super::RoundingPolicy;

/// Days in the salary month used to derive the hourly value.
pub const DAYS_PER_MONTH: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Working hours per day used to derive the hourly value.
pub const HOURS_PER_DAY: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// The result of valuing a period's overtime records.
#[derive(Debug, Clone)]
pub struct OvertimeResult {
    /// One line per record, in input order.
    pub lines: Vec<OvertimeLine>,
    /// Sum of line totals.
    pub total: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the value of one ordinary hour: `base_salary / 30 / 8`.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::hourly_value;
/// use rust_decimal::Decimal;
///
/// assert_eq!(hourly_value(Decimal::new(300000, 0)), Decimal::new(1250, 0));
/// ```
pub fn hourly_value(base_salary: Decimal) -> Decimal {
    base_salary / DAYS_PER_MONTH / HOURS_PER_DAY
}

/// Values each overtime record.
///
/// For every record `unit_value = base_salary / 30 / 8 * multiplier` and
/// `total = unit_value * quantity`. The total is computed from the unrounded
/// unit value and then rounded once by `rounding`; the `unit_value` kept on
/// the line is rounded for display only.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::{calculate_overtime, RoundingPolicy};
/// use settlement_engine::models::OvertimeRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let record = OvertimeRecord {
///     employee_id: "1".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
///     type_label: "Overtime 50%".to_string(),
///     multiplier: Decimal::from_str("1.5").unwrap(),
///     quantity: Decimal::from_str("10").unwrap(),
///     description: None,
/// };
///
/// let result = calculate_overtime(
///     Decimal::from_str("300000.00").unwrap(),
///     &[record],
///     RoundingPolicy::CURRENCY,
///     1,
/// );
///
/// assert_eq!(result.lines[0].unit_value, Decimal::from_str("1875.00").unwrap());
/// assert_eq!(result.total, Decimal::from_str("18750.00").unwrap());
/// ```
pub fn calculate_overtime(
    base_salary: Decimal,
    records: &[OvertimeRecord],
    rounding: RoundingPolicy,
    step_number: u32,
) -> OvertimeResult {
    let hour_value = hourly_value(base_salary);

    let lines: Vec<OvertimeLine> = records
        .iter()
        .map(|record| {
            let unit_value = hour_value * record.multiplier;
            OvertimeLine {
                type_label: record.type_label.clone(),
                quantity: record.quantity,
                multiplier: record.multiplier,
                unit_value: rounding.apply(unit_value),
                total: rounding.apply(unit_value * record.quantity),
                description: record.description.clone(),
            }
        })
        .collect();

    let total: Decimal = lines.iter().map(|line| line.total).sum();
    let hours: Decimal = lines.iter().map(|line| line.quantity).sum();

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime".to_string(),
        rule_name: "Overtime Valuation".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "days_per_month": DAYS_PER_MONTH.to_string(),
            "hours_per_day": HOURS_PER_DAY.to_string(),
            "records": records.len()
        }),
        output: serde_json::json!({
            "hourly_value": rounding.apply(hour_value).to_string(),
            "hours": hours.normalize().to_string(),
            "total": total.to_string()
        }),
        reasoning: format!(
            "{} overtime record(s), {} hours at base {} / {} / {}: total {}",
            records.len(),
            hours.normalize(),
            base_salary,
            DAYS_PER_MONTH,
            HOURS_PER_DAY,
            total
        ),
    };

    OvertimeResult {
        lines,
        total,
        audit_step,
    }
}
