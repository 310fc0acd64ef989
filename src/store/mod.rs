//! Storage collaborators for the settlement engine.
//!
//! The engine itself never touches storage. Services receive an explicit
//! [`PayrollStore`] handle that supplies employees, agreements and period
//! activity, and keeps the append-only settlement history.

mod memory;

pub use memory::InMemoryStore;

use crate::error::EngineResult;
use crate::models::{Agreement, Employee, Period, PeriodActivity, Settlement, SettlementRecord};

/// Read access to payroll inputs and append access to settlement history.
///
/// Implementations must be shareable across request handlers.
pub trait PayrollStore: Send + Sync {
    /// Fetches an active employee by id, failing with `EmployeeNotFound`.
    fn employee(&self, employee_id: &str) -> EngineResult<Employee>;

    /// Returns true when the id names an employee, active or not.
    fn employee_exists(&self, employee_id: &str) -> EngineResult<bool>;

    /// Lists every active employee.
    fn active_employees(&self) -> EngineResult<Vec<Employee>>;

    /// Fetches an agreement by id, failing with `AgreementNotFound`.
    fn agreement(&self, agreement_id: &str) -> EngineResult<Agreement>;

    /// Returns the overtime, bonus and deduction records of one employee whose
    /// dates fall inside `period`.
    fn period_activity(&self, employee_id: &str, period: Period) -> EngineResult<PeriodActivity>;

    /// Appends a settlement to the history and returns the stored record.
    ///
    /// Saving the same employee and period twice creates two records.
    fn save_settlement(&self, settlement: Settlement) -> EngineResult<SettlementRecord>;

    /// Returns every saved settlement of one employee, newest period first.
    fn settlement_history(&self, employee_id: &str) -> EngineResult<Vec<SettlementRecord>>;
}
