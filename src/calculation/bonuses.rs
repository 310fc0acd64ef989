//! Bonus aggregation.

use rust_decimal::Decimal;

use crate::models::{AuditStep, BonusLine, BonusRecord};

use super::RoundingPolicy;

/// Concept printed for bonuses recorded without a description.
pub const DEFAULT_BONUS_CONCEPT: &str = "Bonus";

/// The result of aggregating a period's bonus records.
#[derive(Debug, Clone)]
pub struct BonusResult {
    /// One line per record, in input order.
    pub lines: Vec<BonusLine>,
    /// Sum of bonus amounts.
    pub total: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Turns bonus records into earnings lines and sums them.
pub fn calculate_bonuses(
    records: &[BonusRecord],
    rounding: RoundingPolicy,
    step_number: u32,
) -> BonusResult {
    let lines: Vec<BonusLine> = records
        .iter()
        .map(|record| BonusLine {
            concept: record
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BONUS_CONCEPT.to_string()),
            amount: rounding.apply(record.amount),
        })
        .collect();

    let total: Decimal = lines.iter().map(|line| line.amount).sum();

    let audit_step = AuditStep {
        step_number,
        rule_id: "bonuses".to_string(),
        rule_name: "Bonuses".to_string(),
        input: serde_json::json!({ "records": records.len() }),
        output: serde_json::json!({ "total": total.to_string() }),
        reasoning: format!("{} bonus record(s) totalling {}", records.len(), total),
    };

    BonusResult {
        lines,
        total,
        audit_step,
    }
}
