//! Configuration loading and management for the settlement engine.
//!
//! This module loads the payroll catalogs from YAML files: engine settings
//! (rounding, company header), agreements with their contribution rates,
//! and the overtime, bonus and deduction type catalogs.
//!
//! # Example
//!
//! ```no_run
//! use settlement_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll").unwrap();
//! println!("Payroll for: {}", config.company().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AgreementsConfig, BonusType, BonusTypesConfig, DeductionType, DeductionTypesConfig,
    OvertimeType, OvertimeTypesConfig, PayrollConfig, Settings,
};
