//! Performance benchmarks for the settlement engine.
//!
//! This benchmark suite covers:
//! - A single settlement computed directly by the engine
//! - A single settlement request through the HTTP router
//! - Payroll reports over growing employee counts
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use settlement_engine::api::{AppState, create_router};
use settlement_engine::calculation::{RoundingPolicy, compute_settlement};
use settlement_engine::config::ConfigLoader;
use settlement_engine::models::{
    Agreement, BonusRecord, DeductionRecord, Employee, OvertimeRecord, Period, PeriodActivity,
};
use settlement_engine::service::compute_report;
use settlement_engine::store::InMemoryStore;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const CONFIG_DIR: &str = "./config/payroll";

fn march() -> Period {
    Period::new(2025, 3).unwrap()
}

fn comercio() -> Agreement {
    Agreement::standard(
        "comercio",
        "Empleados de Comercio",
        Decimal::new(11, 0),
        Decimal::new(3, 0),
        Decimal::new(2, 0),
        Decimal::new(15, 1),
    )
}

fn create_employee(i: usize) -> Employee {
    Employee {
        id: i.to_string(),
        badge_id: format!("EMP-{i:05}"),
        first_name: format!("Name{i}"),
        last_name: format!("Family{}", i % 97),
        national_id: None,
        hire_date: None,
        base_salary: Decimal::new(250_000 + (i as i64 % 50) * 1_000, 0),
        agreement_id: (i % 4 != 0).then(|| "comercio".to_string()),
        active: true,
    }
}

/// Two overtime records, a bonus and a deduction per employee.
fn create_activity(employee_ids: impl Iterator<Item = String>) -> PeriodActivity {
    let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    let mut activity = PeriodActivity::default();

    for id in employee_ids {
        for (multiplier, quantity) in [(Decimal::new(15, 1), 6), (Decimal::new(2, 0), 3)] {
            activity.overtime.push(OvertimeRecord {
                employee_id: id.clone(),
                date,
                type_label: "Overtime".to_string(),
                multiplier,
                quantity: Decimal::from(quantity),
                description: None,
            });
        }
        activity.bonuses.push(BonusRecord {
            employee_id: id.clone(),
            date,
            amount: Decimal::new(8000, 0),
            description: None,
        });
        activity.deductions.push(DeductionRecord {
            employee_id: id,
            date,
            amount: Decimal::new(5000, 0),
            deduction_type: "advance".to_string(),
            description: None,
        });
    }

    activity
}

fn create_store(employee_count: usize) -> InMemoryStore {
    let employees: Vec<Employee> = (0..employee_count).map(create_employee).collect();
    let activity = create_activity(employees.iter().map(|e| e.id.clone()));
    InMemoryStore::new(employees, vec![comercio()], activity)
}

/// Benchmark: One settlement computed by the pure engine.
fn bench_single_settlement(c: &mut Criterion) {
    let employee = create_employee(1);
    let agreement = comercio();
    let activity = create_activity(std::iter::once(employee.id.clone()));

    c.bench_function("single_settlement", |b| {
        b.iter(|| {
            black_box(compute_settlement(
                black_box(&employee),
                Some(&agreement),
                black_box(&activity),
                march(),
                RoundingPolicy::CURRENCY,
            ))
        })
    });
}

/// Benchmark: One settlement request through the router, fixtures included.
fn bench_settlement_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load(CONFIG_DIR).expect("Failed to load config");
    let store = InMemoryStore::load(CONFIG_DIR, &config).expect("Failed to load store");
    let router = create_router(AppState::new(config, store));
    let body = serde_json::json!({ "period": "2025-03" }).to_string();

    c.bench_function("settlement_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/employees/1/settlement")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: Payroll reports at increasing employee counts.
fn bench_report_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("payroll_report");
    group.sample_size(10);

    for employee_count in [10usize, 100, 1000].iter() {
        let store = create_store(*employee_count);

        group.throughput(Throughput::Elements(*employee_count as u64));
        group.bench_with_input(
            BenchmarkId::new("employees", employee_count),
            employee_count,
            |b, _| {
                b.iter(|| {
                    black_box(compute_report(&store, march(), RoundingPolicy::CURRENCY).unwrap())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_settlement,
    bench_settlement_request,
    bench_report_scaling,
);
criterion_main!(benches);
