//! Upper bounds on engine inputs.
//!
//! Every monetary product and sum the engine forms stays far below
//! `Decimal::MAX` as long as salaries, amounts, multipliers and hours stay
//! within these bounds. Validation rejects anything larger.

/// Largest base salary or activity amount accepted, in currency units.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// Largest overtime multiplier accepted.
pub const MAX_MULTIPLIER: i64 = 10;

/// Largest number of overtime hours in one record (31 days of 24 hours).
pub const MAX_OVERTIME_HOURS: i64 = 744;
