//! Settlement computation.
//!
//! [`compute_settlement`] is the engine: a pure function from an employee,
//! their agreement (if any) and the period's activity records to a
//! [`Settlement`]. It performs no I/O and trusts its inputs; callers resolve
//! and validate them first (see [`crate::service`]).

use rust_decimal::Decimal;

use crate::models::{
    Agreement, AuditStep, Deductions, Earnings, Employee, Period, PeriodActivity, Settlement,
};

use super::{
    RoundingPolicy, calculate_bonuses, calculate_contributions, calculate_deductions,
    calculate_overtime,
};

/// Computes the settlement for one employee and period.
///
/// 1. Overtime lines: `base_salary / 30 / 8 * multiplier * quantity`.
/// 2. Bonus lines.
/// 3. `gross_pay = base_salary + overtime + bonuses`.
/// 4. One statutory line per agreement contribution (`gross_pay * rate / 100`);
///    none when `agreement` is `None`.
/// 5. One line per explicit deduction record.
/// 6. `net_pay = gross_pay - total_deductions` (not clamped at zero).
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::{compute_settlement, RoundingPolicy};
/// use settlement_engine::models::{BonusRecord, Employee, OvertimeRecord, Period, PeriodActivity};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
///
/// let employee = Employee {
///     id: "1".to_string(),
///     badge_id: "EMP-001".to_string(),
///     first_name: "Juan".to_string(),
///     last_name: "Pérez".to_string(),
///     national_id: None,
///     hire_date: None,
///     base_salary: dec("300000.00"),
///     agreement_id: None,
///     active: true,
/// };
/// let activity = PeriodActivity {
///     overtime: vec![OvertimeRecord {
///         employee_id: "1".to_string(),
///         date,
///         type_label: "Overtime 50%".to_string(),
///         multiplier: dec("1.5"),
///         quantity: dec("10"),
///         description: None,
///     }],
///     bonuses: vec![BonusRecord {
///         employee_id: "1".to_string(),
///         date,
///         amount: dec("8000.00"),
///         description: None,
///     }],
///     deductions: vec![],
/// };
///
/// let period = Period::new(2025, 3).unwrap();
/// let settlement = compute_settlement(&employee, None, &activity, period, RoundingPolicy::CURRENCY);
///
/// assert_eq!(settlement.earnings.total, dec("326750.00"));
/// assert!(settlement.deductions.lines.is_empty());
/// assert_eq!(settlement.net_pay, dec("326750.00"));
/// ```
pub fn compute_settlement(
    employee: &Employee,
    agreement: Option<&Agreement>,
    activity: &PeriodActivity,
    period: Period,
    rounding: RoundingPolicy,
) -> Settlement {
    let base_salary = employee.base_salary;
    let mut audit_trace: Vec<AuditStep> = Vec::with_capacity(6);

    let overtime = calculate_overtime(base_salary, &activity.overtime, rounding, 1);
    audit_trace.push(overtime.audit_step);

    let bonuses = calculate_bonuses(&activity.bonuses, rounding, 2);
    audit_trace.push(bonuses.audit_step);

    let gross_pay = base_salary + overtime.total + bonuses.total;
    audit_trace.push(AuditStep {
        step_number: 3,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Pay".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "overtime_total": overtime.total.to_string(),
            "bonus_total": bonuses.total.to_string()
        }),
        output: serde_json::json!({ "gross_pay": gross_pay.to_string() }),
        reasoning: format!(
            "{} + {} + {} = {}",
            base_salary, overtime.total, bonuses.total, gross_pay
        ),
    });

    let contributions = calculate_contributions(gross_pay, agreement, rounding, 4);
    audit_trace.push(contributions.audit_step);

    let explicit = calculate_deductions(&activity.deductions, rounding, 5);
    audit_trace.push(explicit.audit_step);

    let mut deduction_lines = contributions.lines;
    deduction_lines.extend(explicit.lines);
    let total_deductions: Decimal = deduction_lines.iter().map(|line| line.amount).sum();

    let net_pay = gross_pay - total_deductions;
    audit_trace.push(AuditStep {
        step_number: 6,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "total_deductions": total_deductions.to_string()
        }),
        output: serde_json::json!({
            "net_pay": net_pay.to_string(),
            "negative": net_pay < Decimal::ZERO
        }),
        reasoning: format!("{} - {} = {}", gross_pay, total_deductions, net_pay),
    });

    Settlement {
        employee: employee.snapshot(),
        period,
        base_salary,
        earnings: Earnings {
            base_salary,
            overtime_total: overtime.total,
            bonus_total: bonuses.total,
            total: gross_pay,
            overtime_lines: overtime.lines,
            bonus_lines: bonuses.lines,
        },
        deductions: Deductions {
            total: total_deductions,
            lines: deduction_lines,
        },
        net_pay,
        audit_trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{RoundingMode, hourly_value};
    use crate::models::{BonusRecord, DeductionRecord, OvertimeRecord};
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn march() -> Period {
        Period::new(2025, 3).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn create_employee(base_salary: &str) -> Employee {
        Employee {
            id: "1".to_string(),
            badge_id: "EMP-001".to_string(),
            first_name: "Juan".to_string(),
            last_name: "Pérez".to_string(),
            national_id: Some("12345678".to_string()),
            hire_date: None,
            base_salary: dec(base_salary),
            agreement_id: None,
            active: true,
        }
    }

    fn create_agreement() -> Agreement {
        Agreement::standard(
            "comercio",
            "Empleados de Comercio",
            dec("11"),
            dec("3"),
            dec("2"),
            dec("1.5"),
        )
    }

    fn overtime(multiplier: &str, quantity: &str) -> OvertimeRecord {
        OvertimeRecord {
            employee_id: "1".to_string(),
            date: day(14),
            type_label: "Overtime 50%".to_string(),
            multiplier: dec(multiplier),
            quantity: dec(quantity),
            description: None,
        }
    }

    fn bonus(amount: &str) -> BonusRecord {
        BonusRecord {
            employee_id: "1".to_string(),
            date: day(1),
            amount: dec(amount),
            description: Some("Attendance".to_string()),
        }
    }

    fn deduction(amount: &str) -> DeductionRecord {
        DeductionRecord {
            employee_id: "1".to_string(),
            date: day(20),
            amount: dec(amount),
            deduction_type: "advance".to_string(),
            description: Some("Salary advance".to_string()),
        }
    }

    fn scenario_activity() -> PeriodActivity {
        PeriodActivity {
            overtime: vec![overtime("1.5", "10")],
            bonuses: vec![bonus("8000.00")],
            deductions: vec![],
        }
    }

    #[test]
    fn test_scenario_without_agreement() {
        let settlement = compute_settlement(
            &create_employee("300000.00"),
            None,
            &scenario_activity(),
            march(),
            RoundingPolicy::CURRENCY,
        );

        assert_eq!(settlement.earnings.overtime_lines[0].unit_value, dec("1875.0"));
        assert_eq!(settlement.earnings.overtime_lines[0].total, dec("18750.0"));
        assert_eq!(settlement.earnings.overtime_total, dec("18750"));
        assert_eq!(settlement.earnings.bonus_total, dec("8000"));
        assert_eq!(settlement.gross_pay(), dec("326750.00"));
        assert!(settlement.deductions.lines.is_empty());
        assert_eq!(settlement.total_deductions(), Decimal::ZERO);
        assert_eq!(settlement.net_pay, dec("326750.00"));
    }

    #[test]
    fn test_scenario_with_agreement() {
        let agreement = create_agreement();
        let settlement = compute_settlement(
            &create_employee("300000.00"),
            Some(&agreement),
            &scenario_activity(),
            march(),
            RoundingPolicy::CURRENCY,
        );

        let statutory: Vec<Decimal> = settlement.deductions.statutory().map(|l| l.amount).collect();
        assert_eq!(
            statutory,
            vec![dec("35942.50"), dec("9802.50"), dec("6535.00"), dec("4901.25")]
        );
        assert_eq!(settlement.total_deductions(), dec("57181.25"));
        assert_eq!(settlement.net_pay, dec("269568.75"));
    }

    #[test]
    fn test_zero_salary_without_agreement() {
        let settlement = compute_settlement(
            &create_employee("0"),
            None,
            &PeriodActivity::default(),
            march(),
            RoundingPolicy::CURRENCY,
        );
        assert_eq!(settlement.gross_pay(), Decimal::ZERO);
        assert_eq!(settlement.total_deductions(), Decimal::ZERO);
        assert!(settlement.deductions.lines.is_empty());
        assert_eq!(settlement.net_pay, Decimal::ZERO);
    }

    #[test]
    fn test_zero_salary_with_agreement_has_zero_lines() {
        let agreement = create_agreement();
        let settlement = compute_settlement(
            &create_employee("0"),
            Some(&agreement),
            &PeriodActivity::default(),
            march(),
            RoundingPolicy::CURRENCY,
        );
        assert_eq!(settlement.deductions.lines.len(), 4);
        assert!(settlement.deductions.lines.iter().all(|l| l.amount.is_zero()));
        assert_eq!(settlement.net_pay, Decimal::ZERO);
    }

    #[test]
    fn test_statutory_lines_precede_explicit_lines() {
        let agreement = create_agreement();
        let activity = PeriodActivity {
            deductions: vec![deduction("15000")],
            ..scenario_activity()
        };
        let settlement = compute_settlement(
            &create_employee("300000.00"),
            Some(&agreement),
            &activity,
            march(),
            RoundingPolicy::CURRENCY,
        );

        let kinds: Vec<&str> = settlement
            .deductions
            .lines
            .iter()
            .map(|l| l.kind.as_str())
            .collect();
        assert_eq!(
            kinds,
            vec!["percentage", "percentage", "percentage", "percentage", "advance"]
        );
        assert_eq!(settlement.total_deductions(), dec("72181.25"));
        assert_eq!(settlement.net_pay, dec("254568.75"));
    }

    #[test]
    fn test_explicit_deductions_not_subject_to_contributions() {
        // Contributions are computed on gross pay, before explicit deductions.
        let agreement = create_agreement();
        let with = compute_settlement(
            &create_employee("100000"),
            Some(&agreement),
            &PeriodActivity {
                deductions: vec![deduction("5000")],
                ..Default::default()
            },
            march(),
            RoundingPolicy::CURRENCY,
        );
        let statutory_total: Decimal = with.deductions.statutory().map(|l| l.amount).sum();
        assert_eq!(statutory_total, dec("17500.00"));
    }

    #[test]
    fn test_net_pay_may_be_negative() {
        let settlement = compute_settlement(
            &create_employee("1000"),
            None,
            &PeriodActivity {
                deductions: vec![deduction("2500")],
                ..Default::default()
            },
            march(),
            RoundingPolicy::CURRENCY,
        );
        assert_eq!(settlement.net_pay, dec("-1500"));
        assert_eq!(settlement.audit_trace[5].output["negative"], true);
    }

    #[test]
    fn test_snapshot_and_period_carried() {
        let settlement = compute_settlement(
            &create_employee("1000"),
            None,
            &PeriodActivity::default(),
            march(),
            RoundingPolicy::CURRENCY,
        );
        assert_eq!(settlement.employee.badge_id, "EMP-001");
        assert_eq!(settlement.period.to_string(), "2025-03");
        assert_eq!(settlement.base_salary, dec("1000"));
        assert_eq!(settlement.earnings.base_salary, dec("1000"));
    }

    #[test]
    fn test_audit_trace_has_six_ordered_steps() {
        let settlement = compute_settlement(
            &create_employee("300000"),
            Some(&create_agreement()),
            &scenario_activity(),
            march(),
            RoundingPolicy::CURRENCY,
        );

        let rule_ids: Vec<&str> = settlement
            .audit_trace
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec![
                "overtime",
                "bonuses",
                "gross_pay",
                "statutory_contributions",
                "explicit_deductions",
                "net_pay"
            ]
        );
        let numbers: Vec<u32> = settlement.audit_trace.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_unrounded_policy_keeps_precision() {
        let policy = RoundingPolicy {
            decimal_places: 2,
            mode: RoundingMode::Unrounded,
        };
        let settlement = compute_settlement(
            &create_employee("250000"),
            None,
            &PeriodActivity {
                overtime: vec![overtime("1.5", "1")],
                ..Default::default()
            },
            march(),
            policy,
        );
        let expected = hourly_value(dec("250000")) * dec("1.5") * dec("1");
        assert_eq!(settlement.earnings.overtime_total, expected);
    }

    fn money() -> impl Strategy<Value = Decimal> {
        (0i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
    }

    fn rate() -> impl Strategy<Value = Decimal> {
        (0i64..=2000).prop_map(|hundredths| Decimal::new(hundredths, 2))
    }

    fn multiplier() -> impl Strategy<Value = Decimal> {
        (100i64..=300).prop_map(|hundredths| Decimal::new(hundredths, 2))
    }

    fn hours() -> impl Strategy<Value = Decimal> {
        (0i64..=2000).prop_map(|tenths| Decimal::new(tenths, 1))
    }

    fn activity_strategy() -> impl Strategy<Value = PeriodActivity> {
        (
            prop::collection::vec((multiplier(), hours()), 0..5),
            prop::collection::vec(money(), 0..4),
            prop::collection::vec(money(), 0..4),
        )
            .prop_map(|(overtime_specs, bonus_amounts, deduction_amounts)| PeriodActivity {
                overtime: overtime_specs
                    .into_iter()
                    .map(|(multiplier, quantity)| OvertimeRecord {
                        employee_id: "1".to_string(),
                        date: day(10),
                        type_label: "Overtime".to_string(),
                        multiplier,
                        quantity,
                        description: None,
                    })
                    .collect(),
                bonuses: bonus_amounts
                    .into_iter()
                    .map(|amount| BonusRecord {
                        employee_id: "1".to_string(),
                        date: day(10),
                        amount,
                        description: None,
                    })
                    .collect(),
                deductions: deduction_amounts
                    .into_iter()
                    .map(|amount| DeductionRecord {
                        employee_id: "1".to_string(),
                        date: day(10),
                        amount,
                        deduction_type: "fixed".to_string(),
                        description: None,
                    })
                    .collect(),
            })
    }

    fn employee_with(base_salary: Decimal) -> Employee {
        Employee {
            base_salary,
            ..create_employee("0")
        }
    }

    proptest! {
        #[test]
        fn prop_no_agreement_means_no_statutory_lines(
            base in money(),
            activity in activity_strategy(),
        ) {
            let settlement = compute_settlement(
                &employee_with(base), None, &activity, march(), RoundingPolicy::CURRENCY,
            );
            prop_assert_eq!(settlement.deductions.statutory().count(), 0);
            prop_assert_eq!(settlement.deductions.lines.len(), activity.deductions.len());
        }

        #[test]
        fn prop_net_pay_is_gross_minus_deductions(
            base in money(),
            activity in activity_strategy(),
            rates in (rate(), rate(), rate(), rate()),
        ) {
            let agreement = Agreement::standard("a", "A", rates.0, rates.1, rates.2, rates.3);
            let settlement = compute_settlement(
                &employee_with(base), Some(&agreement), &activity, march(), RoundingPolicy::CURRENCY,
            );
            prop_assert_eq!(
                settlement.net_pay,
                settlement.earnings.total - settlement.deductions.total
            );
            let line_sum: Decimal = settlement.deductions.lines.iter().map(|l| l.amount).sum();
            prop_assert_eq!(settlement.deductions.total, line_sum);
            prop_assert_eq!(
                settlement.earnings.total,
                base + settlement.earnings.overtime_total + settlement.earnings.bonus_total
            );
        }

        #[test]
        fn prop_overtime_line_follows_formula(
            base in money(),
            activity in activity_strategy(),
        ) {
            let settlement = compute_settlement(
                &employee_with(base), None, &activity, march(), RoundingPolicy::UNROUNDED,
            );
            for (line, record) in settlement.earnings.overtime_lines.iter().zip(&activity.overtime) {
                let expected = (base / Decimal::from(30) / Decimal::from(8))
                    * record.multiplier
                    * record.quantity;
                prop_assert_eq!(line.total, expected);
            }

            let rounded = compute_settlement(
                &employee_with(base), None, &activity, march(), RoundingPolicy::CURRENCY,
            );
            for (line, record) in rounded.earnings.overtime_lines.iter().zip(&activity.overtime) {
                let expected = RoundingPolicy::CURRENCY.apply(
                    base / Decimal::from(30) / Decimal::from(8) * record.multiplier * record.quantity,
                );
                prop_assert_eq!(line.total, expected);
            }
        }

        #[test]
        fn prop_computation_is_idempotent(
            base in money(),
            activity in activity_strategy(),
            with_agreement in any::<bool>(),
        ) {
            let agreement = create_agreement();
            let agreement = with_agreement.then_some(&agreement);
            let first = compute_settlement(
                &employee_with(base), agreement, &activity, march(), RoundingPolicy::CURRENCY,
            );
            let second = compute_settlement(
                &employee_with(base), agreement, &activity, march(), RoundingPolicy::CURRENCY,
            );
            prop_assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
            prop_assert_eq!(first, second);
        }
    }
}
