//! Period activity records.
//!
//! Overtime, bonus and deduction entries recorded against an employee for a
//! pay period. The store hands these to the engine already filtered to one
//! employee and one [`Period`], with catalog fields (multiplier, type label,
//! deduction type) resolved.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{MAX_AMOUNT, MAX_MULTIPLIER, MAX_OVERTIME_HOURS, Period};

/// Overtime hours worked at a given multiplier.
///
/// # Example
///
/// ```
/// use settlement_engine::models::OvertimeRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = OvertimeRecord {
///     employee_id: "1".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
///     type_label: "Overtime 50%".to_string(),
///     multiplier: Decimal::new(15, 1),
///     quantity: Decimal::new(10, 0),
///     description: None,
/// };
/// assert!(record.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRecord {
    /// The employee the hours belong to.
    pub employee_id: String,
    /// The day the hours were worked.
    pub date: NaiveDate,
    /// The overtime type name from the catalog.
    pub type_label: String,
    /// Rate multiplier applied to the hourly value (at least 1).
    pub multiplier: Decimal,
    /// Number of hours.
    pub quantity: Decimal,
    /// Free-text note.
    #[serde(default)]
    pub description: Option<String>,
}

impl OvertimeRecord {
    /// Checks `1 <= multiplier <= MAX_MULTIPLIER` and
    /// `0 <= quantity <= MAX_OVERTIME_HOURS`.
    pub fn validate(&self) -> EngineResult<()> {
        if self.multiplier < Decimal::ONE {
            return Err(invalid(
                "overtime",
                format!("multiplier must be at least 1 (got {})", self.multiplier),
            ));
        }
        if self.multiplier > Decimal::from(MAX_MULTIPLIER) {
            return Err(invalid(
                "overtime",
                format!("multiplier must not exceed {MAX_MULTIPLIER} (got {})", self.multiplier),
            ));
        }
        if self.quantity < Decimal::ZERO {
            return Err(invalid(
                "overtime",
                format!("quantity must not be negative (got {})", self.quantity),
            ));
        }
        if self.quantity > Decimal::from(MAX_OVERTIME_HOURS) {
            return Err(invalid(
                "overtime",
                format!(
                    "quantity must not exceed {MAX_OVERTIME_HOURS} hours (got {})",
                    self.quantity
                ),
            ));
        }
        Ok(())
    }
}

/// A fixed-amount bonus ("adicional").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusRecord {
    /// The employee receiving the bonus.
    pub employee_id: String,
    /// The date the bonus was granted.
    pub date: NaiveDate,
    /// Amount in currency units.
    pub amount: Decimal,
    /// Concept printed on the pay-slip.
    #[serde(default)]
    pub description: Option<String>,
}

impl BonusRecord {
    /// Checks `0 <= amount <= MAX_AMOUNT`.
    pub fn validate(&self) -> EngineResult<()> {
        if self.amount < Decimal::ZERO {
            return Err(invalid(
                "bonus",
                format!("amount must not be negative (got {})", self.amount),
            ));
        }
        check_amount_limit("bonus", self.amount)?;
        Ok(())
    }
}

/// A fixed-amount deduction that is not derived from an agreement rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRecord {
    /// The employee the deduction applies to.
    pub employee_id: String,
    /// The date the deduction was recorded.
    pub date: NaiveDate,
    /// Amount in currency units.
    pub amount: Decimal,
    /// Type tag from the deduction catalog (e.g. "fixed", "advance").
    pub deduction_type: String,
    /// Concept printed on the pay-slip.
    #[serde(default)]
    pub description: Option<String>,
}

impl DeductionRecord {
    /// Checks `0 <= amount <= MAX_AMOUNT`.
    pub fn validate(&self) -> EngineResult<()> {
        if self.amount < Decimal::ZERO {
            return Err(invalid(
                "deduction",
                format!("amount must not be negative (got {})", self.amount),
            ));
        }
        check_amount_limit("deduction", self.amount)?;
        Ok(())
    }
}

/// All activity recorded for one employee in one period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodActivity {
    /// Overtime entries.
    #[serde(default)]
    pub overtime: Vec<OvertimeRecord>,
    /// Bonus entries.
    #[serde(default)]
    pub bonuses: Vec<BonusRecord>,
    /// Explicit deduction entries.
    #[serde(default)]
    pub deductions: Vec<DeductionRecord>,
}

impl PeriodActivity {
    /// Returns true when no records were found.
    pub fn is_empty(&self) -> bool {
        self.overtime.is_empty() && self.bonuses.is_empty() && self.deductions.is_empty()
    }

    /// Validates every record and checks it belongs to `employee_id` and `period`.
    pub fn validate(&self, employee_id: &str, period: Period) -> EngineResult<()> {
        for record in &self.overtime {
            record.validate()?;
            check_scope("overtime", &record.employee_id, record.date, employee_id, period)?;
        }
        for record in &self.bonuses {
            record.validate()?;
            check_scope("bonus", &record.employee_id, record.date, employee_id, period)?;
        }
        for record in &self.deductions {
            record.validate()?;
            check_scope("deduction", &record.employee_id, record.date, employee_id, period)?;
        }
        Ok(())
    }
}

fn check_amount_limit(record: &str, amount: Decimal) -> EngineResult<()> {
    if amount > Decimal::from(MAX_AMOUNT) {
        return Err(invalid(
            record,
            format!("amount must not exceed {MAX_AMOUNT} (got {amount})"),
        ));
    }
    Ok(())
}

fn check_scope(
    record: &str,
    record_employee: &str,
    date: NaiveDate,
    employee_id: &str,
    period: Period,
) -> EngineResult<()> {
    if record_employee != employee_id {
        return Err(invalid(
            record,
            format!("belongs to employee '{record_employee}', expected '{employee_id}'"),
        ));
    }
    if !period.contains(date) {
        return Err(invalid(
            record,
            format!("dated {date}, outside period {period}"),
        ));
    }
    Ok(())
}

fn invalid(record: &str, message: String) -> EngineError {
    EngineError::InvalidRecord {
        record: record.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn march() -> Period {
        Period::new(2025, 3).unwrap()
    }

    fn overtime(multiplier: &str, quantity: &str) -> OvertimeRecord {
        OvertimeRecord {
            employee_id: "1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            type_label: "Overtime 50%".to_string(),
            multiplier: dec(multiplier),
            quantity: dec(quantity),
            description: None,
        }
    }

    #[test]
    fn test_overtime_rejects_multiplier_below_one() {
        match overtime("0.5", "2").validate() {
            Err(EngineError::InvalidRecord { record, .. }) => assert_eq!(record, "overtime"),
            other => panic!("Expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_overtime_rejects_negative_quantity() {
        assert!(overtime("1.5", "-1").validate().is_err());
    }

    #[test]
    fn test_overtime_accepts_zero_quantity() {
        assert!(overtime("2", "0").validate().is_ok());
    }

    #[test]
    fn test_overtime_rejects_out_of_range_values() {
        assert!(overtime("11", "2").validate().is_err());
        assert!(overtime("1.5", "745").validate().is_err());
        assert!(overtime("10", "744").validate().is_ok());
    }

    #[test]
    fn test_bonus_rejects_amount_above_limit() {
        let bonus = BonusRecord {
            employee_id: "1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            amount: Decimal::from(MAX_AMOUNT) + Decimal::ONE,
            description: None,
        };
        match bonus.validate() {
            Err(EngineError::InvalidRecord { record, message }) => {
                assert_eq!(record, "bonus");
                assert!(message.contains("must not exceed"));
            }
            other => panic!("Expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_bonus_rejects_negative_amount() {
        let bonus = BonusRecord {
            employee_id: "1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            amount: dec("-10"),
            description: None,
        };
        assert!(bonus.validate().is_err());
    }

    #[test]
    fn test_activity_rejects_record_outside_period() {
        let mut record = overtime("1.5", "2");
        record.date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let activity = PeriodActivity {
            overtime: vec![record],
            ..Default::default()
        };

        let err = activity.validate("1", march()).unwrap_err();
        assert!(err.to_string().contains("outside period 2025-03"));
    }

    #[test]
    fn test_activity_rejects_foreign_employee() {
        let activity = PeriodActivity {
            deductions: vec![DeductionRecord {
                employee_id: "2".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
                amount: dec("100"),
                deduction_type: "fixed".to_string(),
                description: None,
            }],
            ..Default::default()
        };

        assert!(activity.validate("1", march()).is_err());
    }

    #[test]
    fn test_empty_activity_is_valid() {
        let activity = PeriodActivity::default();
        assert!(activity.is_empty());
        assert!(activity.validate("1", march()).is_ok());
    }

    #[test]
    fn test_deserialize_deduction_record() {
        let json = r#"{
            "employee_id": "1",
            "date": "2025-03-05",
            "amount": "15000.00",
            "deduction_type": "advance",
            "description": "Salary advance"
        }"#;

        let record: DeductionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.amount, dec("15000.00"));
        assert_eq!(record.deduction_type, "advance");
        assert_eq!(record.description.as_deref(), Some("Salary advance"));
    }
}
