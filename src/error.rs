//! Error types for the settlement engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure that can surface while resolving inputs for, computing,
//! persisting or reporting on payroll settlements.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for the settlement engine.
///
/// The pure computation in [`crate::calculation`] never fails; these errors
/// come from resolving its inputs (catalog and activity lookups), validating
/// them, and from loading configuration.
///
/// # Example
///
/// ```
/// use settlement_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "emp_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_404");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The employee does not exist (or is no longer active).
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        employee_id: String,
    },

    /// The employee references an agreement that does not exist.
    #[error("Agreement not found: {agreement_id}")]
    AgreementNotFound {
        /// The agreement identifier that was looked up.
        agreement_id: String,
    },

    /// A catalog entry (overtime type, bonus type, deduction type) was not found.
    #[error("{catalog} entry not found: {id}")]
    CatalogEntryNotFound {
        /// The catalog that was searched.
        catalog: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// A pay period identifier could not be parsed.
    #[error("Invalid period '{value}': {message}")]
    InvalidPeriod {
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        message: String,
    },

    /// A required input was not provided.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An activity record (overtime, bonus, deduction) was invalid.
    #[error("Invalid {record} record: {message}")]
    InvalidRecord {
        /// The kind of record.
        record: String,
        /// A description of what made the record invalid.
        message: String,
    },

    /// The storage collaborator failed.
    #[error("Storage error: {message}")]
    StorageError {
        /// A description of the failure.
        message: String,
    },
}

/// Broad classification of an [`EngineError`].
///
/// Used by the report aggregator to describe per-employee failures and by the
/// HTTP layer to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// An employee or a referenced catalog entity does not exist.
    NotFound,
    /// Input was missing or malformed; nothing was computed.
    Validation,
    /// Configuration could not be loaded.
    Configuration,
    /// The storage collaborator failed.
    Storage,
}

impl EngineError {
    /// Returns the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::EmployeeNotFound { .. }
            | EngineError::AgreementNotFound { .. }
            | EngineError::CatalogEntryNotFound { .. } => ErrorKind::NotFound,
            EngineError::InvalidPeriod { .. }
            | EngineError::MissingField { .. }
            | EngineError::InvalidEmployee { .. }
            | EngineError::InvalidRecord { .. } => ErrorKind::Validation,
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ErrorKind::Configuration
            }
            EngineError::StorageError { .. } => ErrorKind::Storage,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
