//! In-memory [`PayrollStore`] backed by YAML reference data.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;
use tracing::info;

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Agreement, BonusRecord, DeductionRecord, Employee, OvertimeRecord, Period, PeriodActivity,
    Settlement, SettlementRecord,
};

use super::PayrollStore;

/// employees.yaml file structure.
#[derive(Debug, Deserialize)]
struct EmployeesFile {
    employees: Vec<Employee>,
}

/// activity.yaml file structure. Entries name catalog ids instead of
/// carrying multipliers and labels.
#[derive(Debug, Default, Deserialize)]
struct ActivityFile {
    #[serde(default)]
    overtime: Vec<OvertimeEntry>,
    #[serde(default)]
    bonuses: Vec<BonusEntry>,
    #[serde(default)]
    deductions: Vec<DeductionEntry>,
}

#[derive(Debug, Deserialize)]
struct OvertimeEntry {
    employee_id: String,
    date: NaiveDate,
    overtime_type: String,
    quantity: Decimal,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BonusEntry {
    employee_id: String,
    date: NaiveDate,
    bonus_type: String,
    amount: Decimal,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeductionEntry {
    employee_id: String,
    date: NaiveDate,
    deduction_type: String,
    amount: Decimal,
    #[serde(default)]
    description: Option<String>,
}

/// A [`PayrollStore`] holding reference data in memory.
///
/// Employees, agreements and activity records are immutable after
/// construction. The settlement history sits behind a `RwLock` so readers
/// only ever observe whole records.
///
/// # Example
///
/// ```no_run
/// use settlement_engine::config::ConfigLoader;
/// use settlement_engine::store::{InMemoryStore, PayrollStore};
///
/// let config = ConfigLoader::load("./config/payroll")?;
/// let store = InMemoryStore::load("./config/payroll", &config)?;
/// println!("{} active employees", store.active_employees()?.len());
/// # Ok::<(), settlement_engine::error::EngineError>(())
/// ```
#[derive(Debug)]
pub struct InMemoryStore {
    employees: Vec<Employee>,
    agreements: HashMap<String, Agreement>,
    activity: PeriodActivity,
    history: RwLock<Vec<SettlementRecord>>,
}

impl InMemoryStore {
    /// Creates a store from already resolved records.
    pub fn new(
        employees: Vec<Employee>,
        agreements: Vec<Agreement>,
        activity: PeriodActivity,
    ) -> Self {
        Self {
            employees,
            agreements: agreements.into_iter().map(|a| (a.id.clone(), a)).collect(),
            activity,
            history: RwLock::new(Vec::new()),
        }
    }

    /// Loads employees.yaml and activity.yaml from `path`, resolving catalog
    /// ids in activity entries against `config`.
    ///
    /// Fails with `CatalogEntryNotFound` when an entry names an unknown
    /// overtime, bonus or deduction type.
    pub fn load<P: AsRef<Path>>(path: P, config: &ConfigLoader) -> EngineResult<Self> {
        let path = path.as_ref();

        let employees = ConfigLoader::load_yaml::<EmployeesFile>(&path.join("employees.yaml"))?
            .employees;
        let activity_file = ConfigLoader::load_yaml::<ActivityFile>(&path.join("activity.yaml"))?;
        let activity = resolve_activity(activity_file, config)?;

        info!(
            employees = employees.len(),
            overtime = activity.overtime.len(),
            bonuses = activity.bonuses.len(),
            deductions = activity.deductions.len(),
            "Loaded payroll reference data"
        );

        let agreements = config.config().agreements().values().cloned().collect();
        Ok(Self::new(employees, agreements, activity))
    }
}

fn resolve_activity(file: ActivityFile, config: &ConfigLoader) -> EngineResult<PeriodActivity> {
    let overtime = file
        .overtime
        .into_iter()
        .map(|entry| {
            let overtime_type = config.get_overtime_type(&entry.overtime_type)?;
            Ok(OvertimeRecord {
                employee_id: entry.employee_id,
                date: entry.date,
                type_label: overtime_type.name.clone(),
                multiplier: overtime_type.multiplier,
                quantity: entry.quantity,
                description: entry.description,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let bonuses = file
        .bonuses
        .into_iter()
        .map(|entry| {
            let bonus_type = config.get_bonus_type(&entry.bonus_type)?;
            Ok(BonusRecord {
                employee_id: entry.employee_id,
                date: entry.date,
                amount: entry.amount,
                description: entry.description.or_else(|| Some(bonus_type.name.clone())),
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let deductions = file
        .deductions
        .into_iter()
        .map(|entry| {
            let deduction_type = config.get_deduction_type(&entry.deduction_type)?;
            Ok(DeductionRecord {
                employee_id: entry.employee_id,
                date: entry.date,
                amount: entry.amount,
                deduction_type: deduction_type.kind.clone(),
                description: entry.description.or_else(|| Some(deduction_type.name.clone())),
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(PeriodActivity {
        overtime,
        bonuses,
        deductions,
    })
}

fn poisoned() -> EngineError {
    EngineError::StorageError {
        message: "settlement history lock poisoned".to_string(),
    }
}

impl PayrollStore for InMemoryStore {
    fn employee(&self, employee_id: &str) -> EngineResult<Employee> {
        self.employees
            .iter()
            .find(|e| e.id == employee_id && e.active)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    fn employee_exists(&self, employee_id: &str) -> EngineResult<bool> {
        Ok(self.employees.iter().any(|e| e.id == employee_id))
    }

    fn active_employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.employees.iter().filter(|e| e.active).cloned().collect())
    }

    fn agreement(&self, agreement_id: &str) -> EngineResult<Agreement> {
        self.agreements
            .get(agreement_id)
            .cloned()
            .ok_or_else(|| EngineError::AgreementNotFound {
                agreement_id: agreement_id.to_string(),
            })
    }

    fn period_activity(&self, employee_id: &str, period: Period) -> EngineResult<PeriodActivity> {
        let in_scope = |id: &str, date: NaiveDate| id == employee_id && period.contains(date);

        Ok(PeriodActivity {
            overtime: self
                .activity
                .overtime
                .iter()
                .filter(|r| in_scope(&r.employee_id, r.date))
                .cloned()
                .collect(),
            bonuses: self
                .activity
                .bonuses
                .iter()
                .filter(|r| in_scope(&r.employee_id, r.date))
                .cloned()
                .collect(),
            deductions: self
                .activity
                .deductions
                .iter()
                .filter(|r| in_scope(&r.employee_id, r.date))
                .cloned()
                .collect(),
        })
    }

    fn save_settlement(&self, settlement: Settlement) -> EngineResult<SettlementRecord> {
        let record = SettlementRecord::new(settlement);
        self.history
            .write()
            .map_err(|_| poisoned())?
            .push(record.clone());
        Ok(record)
    }

    fn settlement_history(&self, employee_id: &str) -> EngineResult<Vec<SettlementRecord>> {
        let history = self.history.read().map_err(|_| poisoned())?;
        let mut records: Vec<SettlementRecord> = history
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            b.period
                .cmp(&a.period)
                .then_with(|| b.settled_at.cmp(&a.settled_at))
        });
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{RoundingPolicy, compute_settlement};
    use std::path::PathBuf;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn config_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/payroll")
    }

    fn load_store() -> InMemoryStore {
        let config = ConfigLoader::load(config_path()).unwrap();
        InMemoryStore::load(config_path(), &config).unwrap()
    }

    fn period(s: &str) -> Period {
        Period::from_str(s).unwrap()
    }

    #[test]
    fn test_load_fixture_store() {
        let store = load_store();

        let active = store.active_employees().unwrap();
        let ids: Vec<&str> = active.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "5"]);
    }

    #[test]
    fn test_inactive_employee_not_found() {
        let store = load_store();

        match store.employee("4") {
            Err(EngineError::EmployeeNotFound { employee_id }) => assert_eq!(employee_id, "4"),
            other => panic!("Expected EmployeeNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_inactive_employee_still_exists() {
        let store = load_store();

        assert!(store.employee_exists("4").unwrap());
        assert!(!store.employee_exists("404").unwrap());
    }

    #[test]
    fn test_period_activity_resolves_catalog_entries() {
        let store = load_store();

        let activity = store.period_activity("1", period("2025-03")).unwrap();
        assert_eq!(activity.overtime.len(), 1);
        assert_eq!(activity.overtime[0].type_label, "Overtime 50%");
        assert_eq!(activity.overtime[0].multiplier, dec("1.5"));
        assert_eq!(activity.bonuses.len(), 1);
        assert_eq!(
            activity.bonuses[0].description.as_deref(),
            Some("Attendance bonus")
        );
        assert!(activity.deductions.is_empty());
    }

    #[test]
    fn test_period_activity_filters_by_period_and_employee() {
        let store = load_store();

        let april = store.period_activity("1", period("2025-04")).unwrap();
        assert_eq!(april.overtime.len(), 1);
        assert_eq!(april.overtime[0].type_label, "Holiday overtime");
        assert!(april.bonuses.is_empty());

        let deductions = store.period_activity("2", period("2025-03")).unwrap().deductions;
        assert_eq!(deductions.len(), 1);
        assert_eq!(deductions[0].deduction_type, "advance");

        assert!(store.period_activity("1", period("2024-03")).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_catalog_id_fails_load() {
        let config = ConfigLoader::load(config_path()).unwrap();
        let file: ActivityFile = serde_yaml::from_str(
            r#"
overtime:
  - employee_id: "1"
    date: 2025-03-14
    overtime_type: ot_300
    quantity: "2"
"#,
        )
        .unwrap();

        match resolve_activity(file, &config) {
            Err(EngineError::CatalogEntryNotFound { id, .. }) => assert_eq!(id, "ot_300"),
            other => panic!("Expected CatalogEntryNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_history_is_append_only_and_newest_first() {
        let store = load_store();
        let employee = store.employee("3").unwrap();

        let settle = |p: &str| {
            let period = period(p);
            let activity = store.period_activity("3", period).unwrap();
            compute_settlement(&employee, None, &activity, period, RoundingPolicy::CURRENCY)
        };

        let first = store.save_settlement(settle("2025-03")).unwrap();
        store.save_settlement(settle("2025-04")).unwrap();
        let again = store.save_settlement(settle("2025-03")).unwrap();

        assert_ne!(first.id, again.id);
        assert_eq!(first.net_pay, again.net_pay);

        let history = store.settlement_history("3").unwrap();
        let periods: Vec<String> = history.iter().map(|r| r.period.to_string()).collect();
        assert_eq!(periods, vec!["2025-04", "2025-03", "2025-03"]);

        assert!(store.settlement_history("1").unwrap().is_empty());
    }

    #[test]
    fn test_agreement_lookup() {
        let store = load_store();

        assert_eq!(store.agreement("comercio").unwrap().contributions.len(), 4);
        assert!(matches!(
            store.agreement("gastronomicos"),
            Err(EngineError::AgreementNotFound { .. })
        ));
    }
}
