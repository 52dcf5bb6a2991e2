//! Performance benchmarks for the payroll engine.
//!
//! This benchmark suite measures:
//! - A single mandate month through the HTTP router
//! - Full yearly runs for every contract type, called directly
//! - Batches of yearly requests through the router
//! - Scaling with the number of months in a run
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::api::{AppState, CalculationRequest, create_router};
use payroll_engine::calculation::{
    calculate_yearly_result_of_employer, calculate_yearly_result_of_employment,
    calculate_yearly_result_of_mandate, calculate_yearly_result_of_self_employment,
};
use payroll_engine::config::ConfigLoader;
use payroll_engine::models::{
    EmployerMonthlyInput, EmploymentMonthlyInput, MandateMonthlyInput,
    SelfEmploymentMonthlyInput, TaxRules,
};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Loads the shipped rate table.
fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/pl").expect("Failed to load config")
}

/// Creates a mandate request with a specified number of months.
fn create_mandate_request(month_count: usize) -> CalculationRequest {
    let months: Vec<serde_json::Value> = (0..month_count)
        .map(|i| {
            serde_json::json!({
                "gross_amount": format!("{}.00", 6000 + i * 1500),
                "is_sick_contribution": i % 2 == 0,
                "author_expenses_share": "0.5"
            })
        })
        .collect();

    let request_json = serde_json::json!({
        "calculation": "contract_of_mandate",
        "year": 2021,
        "months": months
    });

    serde_json::from_value(request_json).expect("Failed to create request")
}

async fn post(router: axum::Router, body: String) -> axum::response::Response {
    router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Benchmark: Single month through the router.
fn bench_single_month(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_config()));
    let body = serde_json::to_string(&create_mandate_request(1)).unwrap();

    c.bench_function("single_month", |b| {
        b.to_async(&rt)
            .iter(|| async { black_box(post(router.clone(), body.clone()).await) })
    });
}

/// Benchmark: Twelve-month runs of each contract type, without HTTP.
fn bench_yearly_runs(c: &mut Criterion) {
    let config = load_config();
    let params = config.year(2022).expect("2022 is configured");

    let mandate = vec![MandateMonthlyInput::new(Decimal::from(18000)); 12];
    let employment = vec![EmploymentMonthlyInput::new(Decimal::from(18000)); 12];
    let employer = vec![EmployerMonthlyInput::new(Decimal::from(18000)); 12];
    let self_employment = vec![
        SelfEmploymentMonthlyInput {
            costs: Decimal::from(4000),
            health_contribution_basis: Decimal::from(6000),
            ..SelfEmploymentMonthlyInput::new(Decimal::from(25000), Decimal::from(3554))
        };
        12
    ];
    let general = TaxRules::General {
        tax_reducing_amount: true,
        middle_class_relief: true,
    };

    let mut group = c.benchmark_group("yearly_runs");
    group.throughput(Throughput::Elements(12));

    group.bench_function("mandate", |b| {
        b.iter(|| calculate_yearly_result_of_mandate(black_box(&mandate), params))
    });
    group.bench_function("employment", |b| {
        b.iter(|| calculate_yearly_result_of_employment(black_box(&employment), params))
    });
    group.bench_function("employer", |b| {
        b.iter(|| calculate_yearly_result_of_employer(black_box(&employer), params))
    });
    group.bench_function("self_employment", |b| {
        b.iter(|| {
            calculate_yearly_result_of_self_employment(black_box(&self_employment), &general, params)
        })
    });

    group.finish();
}

/// Benchmark: Batch of 100 yearly requests through the router.
fn bench_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = AppState::new(load_config());

    // Vary gross amounts so runs cross different thresholds
    let requests: Vec<String> = (0..100)
        .map(|i| {
            let months: Vec<serde_json::Value> = (0..12)
                .map(|_| {
                    serde_json::json!({
                        "gross_amount": format!("{}", 3000 + i * 250),
                        "is_young": i % 4 == 0
                    })
                })
                .collect();
            let calculation = if i % 2 == 0 {
                "contract_of_mandate"
            } else {
                "contract_of_employment"
            };
            let request_json = serde_json::json!({
                "calculation": calculation,
                "year": 2021 + (i % 4),
                "months": months
            });
            serde_json::to_string(&request_json).unwrap()
        })
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(100);
            for body in &requests {
                let router = create_router(state.clone());
                results.push(post(router, body.clone()).await);
            }
            black_box(results)
        })
    });

    group.finish();
}

/// Benchmark: Various month counts to understand scaling behavior.
fn bench_scaling(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = AppState::new(load_config());

    let mut group = c.benchmark_group("scaling");

    for month_count in [1, 3, 6, 12].iter() {
        let router = create_router(state.clone());
        let body = serde_json::to_string(&create_mandate_request(*month_count)).unwrap();

        group.throughput(Throughput::Elements(*month_count as u64));
        group.bench_with_input(
            BenchmarkId::new("months", month_count),
            month_count,
            |b, _| {
                b.to_async(&rt)
                    .iter(|| async { black_box(post(router.clone(), body.clone()).await) })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_month,
    bench_yearly_runs,
    bench_batch_100,
    bench_scaling,
);
criterion_main!(benches);
