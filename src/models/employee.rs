//! Employee model and related types.
//!
//! This module defines the [`Employee`] master record consumed by the
//! settlement engine and the [`EmployeeSnapshot`] copied into every
//! computed settlement.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::MAX_AMOUNT;

/// Represents an employee whose pay is settled by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The badge number ("legajo") printed on pay-slips and reports.
    pub badge_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// National identity document number.
    #[serde(default)]
    pub national_id: Option<String>,
    /// The date the employee was hired.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    /// Monthly base salary in currency units.
    pub base_salary: Decimal,
    /// The labor agreement that governs statutory contributions, if any.
    #[serde(default)]
    pub agreement_id: Option<String>,
    /// Inactive employees are excluded from payroll-wide reports.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Returns the display name used on reports, formatted as "Last, First".
    ///
    /// # Examples
    ///
    /// ```
    /// use settlement_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "1".to_string(),
    ///     badge_id: "EMP-001".to_string(),
    ///     first_name: "Juan".to_string(),
    ///     last_name: "Pérez".to_string(),
    ///     national_id: None,
    ///     hire_date: None,
    ///     base_salary: Decimal::new(300000, 0),
    ///     agreement_id: None,
    ///     active: true,
    /// };
    /// assert_eq!(employee.display_name(), "Pérez, Juan");
    /// ```
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    /// Checks the preconditions the settlement engine relies on.
    pub fn validate(&self) -> EngineResult<()> {
        if self.base_salary < Decimal::ZERO {
            return Err(EngineError::InvalidEmployee {
                field: "base_salary".to_string(),
                message: format!("must not be negative (got {})", self.base_salary),
            });
        }
        if self.base_salary > Decimal::from(MAX_AMOUNT) {
            return Err(EngineError::InvalidEmployee {
                field: "base_salary".to_string(),
                message: format!("must not exceed {MAX_AMOUNT} (got {})", self.base_salary),
            });
        }
        if self.badge_id.trim().is_empty() {
            return Err(EngineError::InvalidEmployee {
                field: "badge_id".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Captures the identity fields copied into a settlement.
    pub fn snapshot(&self) -> EmployeeSnapshot {
        EmployeeSnapshot {
            id: self.id.clone(),
            badge_id: self.badge_id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

/// The employee identity as it was when a settlement was computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSnapshot {
    /// Unique identifier for the employee.
    pub id: String,
    /// Badge number.
    pub badge_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}
