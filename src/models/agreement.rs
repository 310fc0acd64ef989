//! Labor agreement model.
//!
//! An [`Agreement`] ("convenio") supplies the statutory contribution rates that
//! are withheld from gross pay. The categories are an ordered list so an
//! agreement can define any number of them; [`Agreement::standard`] builds the
//! four categories every agreement has historically carried.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Label of the retirement contribution.
pub const RETIREMENT_LABEL: &str = "Retirement";
/// Label of the health-insurance contribution.
pub const HEALTH_INSURANCE_LABEL: &str = "Health Insurance";
/// Label of the union-dues contribution.
pub const UNION_DUES_LABEL: &str = "Union Dues";
/// Label of the fourth statutory fund (PAMI).
pub const PAMI_FUND_LABEL: &str = "PAMI Fund";

/// A single statutory contribution category and its percentage of gross pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRate {
    /// Printed label, e.g. "Retirement".
    pub label: String,
    /// Percentage of gross pay (0-100).
    pub rate: Decimal,
}

impl ContributionRate {
    /// Creates a contribution category.
    pub fn new(label: impl Into<String>, rate: Decimal) -> Self {
        Self {
            label: label.into(),
            rate,
        }
    }
}

/// A labor agreement with its ordered statutory contribution categories.
///
/// # Example
///
/// ```
/// use settlement_engine::models::Agreement;
/// use rust_decimal::Decimal;
///
/// let agreement = Agreement::standard(
///     "comercio",
///     "Empleados de Comercio",
///     Decimal::new(11, 0),
///     Decimal::new(3, 0),
///     Decimal::new(2, 0),
///     Decimal::new(15, 1),
/// );
/// assert_eq!(agreement.contributions.len(), 4);
/// assert_eq!(agreement.contributions[0].label, "Retirement");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agreement {
    /// Unique identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Contribution categories, in the order they appear on the pay-slip.
    pub contributions: Vec<ContributionRate>,
}

impl Agreement {
    /// Builds an agreement with the four default statutory categories.
    pub fn standard(
        id: impl Into<String>,
        name: impl Into<String>,
        retirement: Decimal,
        health_insurance: Decimal,
        union_dues: Decimal,
        pami_fund: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            contributions: vec![
                ContributionRate::new(RETIREMENT_LABEL, retirement),
                ContributionRate::new(HEALTH_INSURANCE_LABEL, health_insurance),
                ContributionRate::new(UNION_DUES_LABEL, union_dues),
                ContributionRate::new(PAMI_FUND_LABEL, pami_fund),
            ],
        }
    }

    /// Sum of all contribution rates.
    pub fn total_rate(&self) -> Decimal {
        self.contributions.iter().map(|c| c.rate).sum()
    }

    /// Rejects negative rates and rates above 100%.
    pub fn validate(&self) -> EngineResult<()> {
        let hundred = Decimal::ONE_HUNDRED;
        for contribution in &self.contributions {
            if contribution.rate < Decimal::ZERO || contribution.rate > hundred {
                return Err(EngineError::InvalidRecord {
                    record: "agreement".to_string(),
                    message: format!(
                        "'{}' contribution '{}' rate {} is outside 0-100",
                        self.id, contribution.label, contribution.rate
                    ),
                });
            }
        }
        Ok(())
    }
}
