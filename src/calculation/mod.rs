//! Calculation logic for the settlement engine.
//!
//! Each step of a settlement lives in its own module and returns a result
//! carrying its lines, its total and an audit step: overtime valuation,
//! bonus aggregation, statutory contributions from the employee's agreement
//! and explicit deductions. [`compute_settlement`] composes them and derives
//! gross and net pay. Every function here is pure.

mod bonuses;
mod contributions;
mod deductions;
mod overtime;
mod rounding;
mod settlement;

pub use bonuses::{BonusResult, DEFAULT_BONUS_CONCEPT, calculate_bonuses};
pub use contributions::{ContributionsResult, calculate_contributions};
pub use deductions::{DEFAULT_DEDUCTION_CONCEPT, DeductionsResult, calculate_deductions};
pub use overtime::{
    DAYS_PER_MONTH, HOURS_PER_DAY, OvertimeResult, calculate_overtime, hourly_value,
};
pub use rounding::{RoundingMode, RoundingPolicy};
pub use settlement::compute_settlement;
