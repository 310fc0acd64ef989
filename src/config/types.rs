//! Configuration types for payroll settlement.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML catalog files.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::calculation::RoundingPolicy;
use crate::models::{Agreement, CompanyInfo};

/// Engine settings from settings.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Rounding applied to every line item.
    #[serde(default)]
    pub rounding: RoundingPolicy,
    /// The company printed on pay-slips.
    #[serde(default)]
    pub company: CompanyInfo,
}

/// Agreements configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct AgreementsConfig {
    /// All agreements, each with its ordered contribution list.
    pub agreements: Vec<Agreement>,
}

/// A kind of overtime and the multiplier it is paid at.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OvertimeType {
    /// Catalog identifier referenced by activity entries.
    pub id: String,
    /// Label printed on the overtime line (e.g. "Overtime 50%").
    pub name: String,
    /// Multiplier over the hourly value (1.5 for 150%).
    pub multiplier: Decimal,
}

/// Overtime types configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeTypesConfig {
    /// The overtime catalog.
    pub overtime_types: Vec<OvertimeType>,
}

/// A kind of bonus.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BonusType {
    /// Catalog identifier referenced by activity entries.
    pub id: String,
    /// Concept printed when an entry has no description.
    pub name: String,
}

/// Bonus types configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct BonusTypesConfig {
    /// The bonus catalog.
    pub bonus_types: Vec<BonusType>,
}

/// A kind of explicit deduction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeductionType {
    /// Catalog identifier referenced by activity entries.
    pub id: String,
    /// Concept printed when an entry has no description.
    pub name: String,
    /// Type tag carried onto the deduction line (e.g. "fixed", "advance").
    pub kind: String,
}

/// Deduction types configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct DeductionTypesConfig {
    /// The deduction catalog.
    pub deduction_types: Vec<DeductionType>,
}

/// The complete payroll configuration loaded from YAML files.
///
/// This struct aggregates the settings and every catalog loaded from a
/// payroll configuration directory, indexed by identifier.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    settings: Settings,
    agreements: HashMap<String, Agreement>,
    overtime_types: HashMap<String, OvertimeType>,
    bonus_types: HashMap<String, BonusType>,
    deduction_types: HashMap<String, DeductionType>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(
        settings: Settings,
        agreements: Vec<Agreement>,
        overtime_types: Vec<OvertimeType>,
        bonus_types: Vec<BonusType>,
        deduction_types: Vec<DeductionType>,
    ) -> Self {
        Self {
            settings,
            agreements: agreements.into_iter().map(|a| (a.id.clone(), a)).collect(),
            overtime_types: overtime_types
                .into_iter()
                .map(|t| (t.id.clone(), t))
                .collect(),
            bonus_types: bonus_types.into_iter().map(|t| (t.id.clone(), t)).collect(),
            deduction_types: deduction_types
                .into_iter()
                .map(|t| (t.id.clone(), t))
                .collect(),
        }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns all agreements.
    pub fn agreements(&self) -> &HashMap<String, Agreement> {
        &self.agreements
    }

    /// Returns the overtime catalog.
    pub fn overtime_types(&self) -> &HashMap<String, OvertimeType> {
        &self.overtime_types
    }

    /// Returns the bonus catalog.
    pub fn bonus_types(&self) -> &HashMap<String, BonusType> {
        &self.bonus_types
    }

    /// Returns the deduction catalog.
    pub fn deduction_types(&self) -> &HashMap<String, DeductionType> {
        &self.deduction_types
    }
}
