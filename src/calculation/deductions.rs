//! Explicit (fixed-amount) deductions.

use rust_decimal::Decimal;

use crate::models::{AuditStep, DeductionLine, DeductionRecord};

use super::RoundingPolicy;

/// Concept printed for deductions recorded without a description.
pub const DEFAULT_DEDUCTION_CONCEPT: &str = "Additional deduction";

/// The result of converting a period's deduction records into lines.
#[derive(Debug, Clone)]
pub struct DeductionsResult {
    /// One line per record, in input order.
    pub lines: Vec<DeductionLine>,
    /// Sum of deduction amounts.
    pub total: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Turns explicit deduction records into deduction lines tagged with their type.
pub fn calculate_deductions(
    records: &[DeductionRecord],
    rounding: RoundingPolicy,
    step_number: u32,
) -> DeductionsResult {
    let lines: Vec<DeductionLine> = records
        .iter()
        .map(|record| DeductionLine {
            concept: record
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DEDUCTION_CONCEPT.to_string()),
            kind: record.deduction_type.clone(),
            rate: None,
            amount: rounding.apply(record.amount),
        })
        .collect();

    let total: Decimal = lines.iter().map(|line| line.amount).sum();

    let audit_step = AuditStep {
        step_number,
        rule_id: "explicit_deductions".to_string(),
        rule_name: "Explicit Deductions".to_string(),
        input: serde_json::json!({ "records": records.len() }),
        output: serde_json::json!({ "total": total.to_string() }),
        reasoning: format!("{} deduction record(s) totalling {}", records.len(), total),
    };

    DeductionsResult {
        lines,
        total,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn deduction(amount: &str, kind: &str, description: Option<&str>) -> DeductionRecord {
        DeductionRecord {
            employee_id: "1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            amount: dec(amount),
            deduction_type: kind.to_string(),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_lines_carry_type_and_no_rate() {
        let result = calculate_deductions(
            &[deduction("15000", "advance", Some("Salary advance"))],
            RoundingPolicy::CURRENCY,
            5,
        );

        assert_eq!(result.lines[0].kind, "advance");
        assert_eq!(result.lines[0].rate, None);
        assert_eq!(result.lines[0].concept, "Salary advance");
        assert!(!result.lines[0].is_statutory());
        assert_eq!(result.total, dec("15000"));
    }

    #[test]
    fn test_missing_description_uses_default_concept() {
        let result =
            calculate_deductions(&[deduction("10", "fixed", None)], RoundingPolicy::CURRENCY, 1);
        assert_eq!(result.lines[0].concept, DEFAULT_DEDUCTION_CONCEPT);
    }

    #[test]
    fn test_sums_in_order() {
        let result = calculate_deductions(
            &[deduction("100.10", "fixed", None), deduction("0.90", "loan", None)],
            RoundingPolicy::CURRENCY,
            1,
        );
        assert_eq!(result.lines[1].kind, "loan");
        assert_eq!(result.total, dec("101.00"));
    }
}
