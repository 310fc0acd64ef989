//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! catalogs and settings from YAML files.

use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::calculation::RoundingPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{Agreement, CompanyInfo};

use super::types::{
    AgreementsConfig, BonusType, BonusTypesConfig, DeductionType, DeductionTypesConfig,
    OvertimeType, OvertimeTypesConfig, PayrollConfig, Settings,
};

/// Loads and provides access to payroll configuration.
///
/// The `ConfigLoader` reads YAML catalog files from a directory and provides
/// lookups for agreements and the overtime, bonus and deduction catalogs.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/payroll/
/// ├── settings.yaml        # Rounding policy and company header
/// ├── agreements.yaml      # Agreements and their contribution rates
/// ├── overtime_types.yaml  # Overtime catalog
/// ├── bonus_types.yaml     # Bonus catalog
/// ├── deduction_types.yaml # Deduction catalog
/// ├── employees.yaml       # Employee master data (read by the store)
/// └── activity.yaml        # Period activity (read by the store)
/// ```
///
/// # Example
///
/// ```no_run
/// use settlement_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll").unwrap();
///
/// let agreement = loader.get_agreement("comercio").unwrap();
/// println!("Agreement: {} ({}%)", agreement.name, agreement.total_rate());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A catalog contains duplicate ids, an out-of-range contribution rate,
    ///   an overtime multiplier below 1, or a deduction kind reserved for
    ///   statutory lines
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<Settings>(&path.join("settings.yaml"))?;

        let agreements_path = path.join("agreements.yaml");
        let agreements = Self::load_yaml::<AgreementsConfig>(&agreements_path)?.agreements;
        Self::check_agreements(&agreements_path, &agreements)?;

        let overtime_path = path.join("overtime_types.yaml");
        let overtime_types = Self::load_yaml::<OvertimeTypesConfig>(&overtime_path)?.overtime_types;
        Self::check_overtime_types(&overtime_path, &overtime_types)?;

        let bonus_path = path.join("bonus_types.yaml");
        let bonus_types = Self::load_yaml::<BonusTypesConfig>(&bonus_path)?.bonus_types;
        Self::check_unique_ids(&bonus_path, bonus_types.iter().map(|t| t.id.as_str()))?;

        let deduction_path = path.join("deduction_types.yaml");
        let deduction_types =
            Self::load_yaml::<DeductionTypesConfig>(&deduction_path)?.deduction_types;
        Self::check_deduction_types(&deduction_path, &deduction_types)?;

        let config = PayrollConfig::new(
            settings,
            agreements,
            overtime_types,
            bonus_types,
            deduction_types,
        );

        Ok(Self { config })
    }

    /// Builds a loader from already parsed parts.
    pub fn from_config(config: PayrollConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    pub(crate) fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check_agreements(path: &Path, agreements: &[Agreement]) -> EngineResult<()> {
        Self::check_unique_ids(path, agreements.iter().map(|a| a.id.as_str()))?;
        for agreement in agreements {
            agreement
                .validate()
                .map_err(|e| invalid_config(path, e.to_string()))?;
        }
        Ok(())
    }

    fn check_overtime_types(path: &Path, types: &[OvertimeType]) -> EngineResult<()> {
        Self::check_unique_ids(path, types.iter().map(|t| t.id.as_str()))?;
        match types.iter().find(|t| t.multiplier < Decimal::ONE) {
            Some(t) => Err(invalid_config(
                path,
                format!("overtime type '{}' has multiplier {} below 1", t.id, t.multiplier),
            )),
            None => Ok(()),
        }
    }

    fn check_deduction_types(path: &Path, types: &[DeductionType]) -> EngineResult<()> {
        Self::check_unique_ids(path, types.iter().map(|t| t.id.as_str()))?;
        match types.iter().find(|t| t.kind == crate::models::PERCENTAGE_KIND) {
            Some(t) => Err(invalid_config(
                path,
                format!(
                    "deduction type '{}' uses kind '{}', which is reserved for contributions",
                    t.id, t.kind
                ),
            )),
            None => Ok(()),
        }
    }

    fn check_unique_ids<'a>(path: &Path, ids: impl Iterator<Item = &'a str>) -> EngineResult<()> {
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                return Err(invalid_config(path, format!("duplicate id '{id}'")));
            }
        }
        Ok(())
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &Settings {
        self.config.settings()
    }

    /// Returns the configured rounding policy.
    pub fn rounding(&self) -> RoundingPolicy {
        self.config.settings().rounding
    }

    /// Returns the company printed on pay-slips.
    pub fn company(&self) -> &CompanyInfo {
        &self.config.settings().company
    }

    /// Gets an agreement by its id.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use settlement_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/payroll")?;
    /// let agreement = loader.get_agreement("comercio")?;
    /// println!("{} contribution categories", agreement.contributions.len());
    /// # Ok::<(), settlement_engine::error::EngineError>(())
    /// ```
    pub fn get_agreement(&self, agreement_id: &str) -> EngineResult<&Agreement> {
        self.config
            .agreements()
            .get(agreement_id)
            .ok_or_else(|| EngineError::AgreementNotFound {
                agreement_id: agreement_id.to_string(),
            })
    }

    /// Gets an overtime type by its id.
    pub fn get_overtime_type(&self, id: &str) -> EngineResult<&OvertimeType> {
        self.config
            .overtime_types()
            .get(id)
            .ok_or_else(|| catalog_miss("Overtime type", id))
    }

    /// Gets a bonus type by its id.
    pub fn get_bonus_type(&self, id: &str) -> EngineResult<&BonusType> {
        self.config
            .bonus_types()
            .get(id)
            .ok_or_else(|| catalog_miss("Bonus type", id))
    }

    /// Gets a deduction type by its id.
    pub fn get_deduction_type(&self, id: &str) -> EngineResult<&DeductionType> {
        self.config
            .deduction_types()
            .get(id)
            .ok_or_else(|| catalog_miss("Deduction type", id))
    }
}

fn catalog_miss(catalog: &str, id: &str) -> EngineError {
    EngineError::CatalogEntryNotFound {
        catalog: catalog.to_string(),
        id: id.to_string(),
    }
}

fn invalid_config(path: &Path, message: String) -> EngineError {
    EngineError::ConfigParseError {
        path: path.display().to_string(),
        message,
    }
}
