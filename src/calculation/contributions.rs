//! Statutory contributions.
//!
//! An agreement lists the contribution categories withheld from gross pay.
//! Each becomes a deduction line of `gross_pay * rate / 100`. Employees
//! without an agreement get no statutory lines at all, not zero-valued ones.

use rust_decimal::Decimal;

use crate::models::{Agreement, AuditStep, DeductionLine, PERCENTAGE_KIND};

use super::RoundingPolicy;

/// The result of applying an agreement's contribution rates.
#[derive(Debug, Clone)]
pub struct ContributionsResult {
    /// One line per contribution category, in agreement order.
    pub lines: Vec<DeductionLine>,
    /// Sum of contribution amounts.
    pub total: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the statutory contribution lines for a gross pay figure.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::{calculate_contributions, RoundingPolicy};
/// use settlement_engine::models::Agreement;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let agreement = Agreement::standard("comercio", "Comercio", dec("11"), dec("3"), dec("2"), dec("1.5"));
///
/// let result = calculate_contributions(dec("326750.00"), Some(&agreement), RoundingPolicy::CURRENCY, 1);
/// assert_eq!(result.lines.len(), 4);
/// assert_eq!(result.lines[0].amount, dec("35942.50"));
/// assert_eq!(result.total, dec("57181.25"));
///
/// let none = calculate_contributions(dec("326750.00"), None, RoundingPolicy::CURRENCY, 1);
/// assert!(none.lines.is_empty());
/// ```
pub fn calculate_contributions(
    gross_pay: Decimal,
    agreement: Option<&Agreement>,
    rounding: RoundingPolicy,
    step_number: u32,
) -> ContributionsResult {
    let Some(agreement) = agreement else {
        let audit_step = AuditStep {
            step_number,
            rule_id: "statutory_contributions".to_string(),
            rule_name: "Statutory Contributions".to_string(),
            input: serde_json::json!({
                "gross_pay": gross_pay.to_string(),
                "agreement_id": null
            }),
            output: serde_json::json!({ "lines": 0, "total": "0" }),
            reasoning: "Employee has no agreement - no statutory contributions withheld"
                .to_string(),
        };

        return ContributionsResult {
            lines: Vec::new(),
            total: Decimal::ZERO,
            audit_step,
        };
    };

    let lines: Vec<DeductionLine> = agreement
        .contributions
        .iter()
        .map(|contribution| DeductionLine {
            concept: format!("Contribution: {}", contribution.label),
            kind: PERCENTAGE_KIND.to_string(),
            rate: Some(contribution.rate),
            amount: rounding.apply(gross_pay * contribution.rate / Decimal::ONE_HUNDRED),
        })
        .collect();

    let total: Decimal = lines.iter().map(|line| line.amount).sum();

    let audit_step = AuditStep {
        step_number,
        rule_id: "statutory_contributions".to_string(),
        rule_name: "Statutory Contributions".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "agreement_id": agreement.id,
            "rates": agreement
                .contributions
                .iter()
                .map(|c| serde_json::json!({ "label": c.label, "rate": c.rate.to_string() }))
                .collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "lines": lines.len(),
            "total": total.to_string()
        }),
        reasoning: format!(
            "Agreement '{}': {}% of {} = {}",
            agreement.name,
            agreement.total_rate().normalize(),
            gross_pay,
            total
        ),
    };

    ContributionsResult {
        lines,
        total,
        audit_step,
    }
}
