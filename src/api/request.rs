//! Request types for the settlement API.
//!
//! Bodies are deserialized leniently (every field optional) so that a missing
//! field surfaces as a `MISSING_FIELD` error rather than a generic JSON
//! rejection.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Period;

/// Request body for settling one employee.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettlementRequest {
    /// The pay period, formatted "YYYY-MM".
    #[serde(default)]
    pub period: Option<String>,
}

impl SettlementRequest {
    /// Parses the requested period.
    pub fn period(&self) -> EngineResult<Period> {
        self.period
            .as_deref()
            .ok_or_else(|| EngineError::MissingField {
                field: "period".to_string(),
            })?
            .parse()
    }
}

/// Request body for a report over selected employees.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportRequest {
    /// The employees to include. Ids may be sent as strings or numbers.
    #[serde(default, deserialize_with = "deserialize_employee_ids")]
    pub employee_ids: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EmployeeId {
    Text(String),
    Number(u64),
}

impl From<EmployeeId> for String {
    fn from(id: EmployeeId) -> Self {
        match id {
            EmployeeId::Text(id) => id,
            EmployeeId::Number(id) => id.to_string(),
        }
    }
}

fn deserialize_employee_ids<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    let ids = Option::<Vec<EmployeeId>>::deserialize(deserializer)?;
    Ok(ids.map(|ids| ids.into_iter().map(String::from).collect()))
}

impl ReportRequest {
    /// Returns the requested employee ids.
    pub fn employee_ids(&self) -> EngineResult<&[String]> {
        self.employee_ids
            .as_deref()
            .ok_or_else(|| EngineError::MissingField {
                field: "employee_ids".to_string(),
            })
    }
}

/// Query string accepted by the pay-slip endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaySlipQuery {
    /// Issue date printed on the pay-slip; defaults to today.
    #[serde(default)]
    pub issue_date: Option<NaiveDate>,
}
