//! Analysis pipeline performance benchmarks.
//!
//! Measures parsing, summarizing and chart resolution on synthetic tables.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use datalens::chart::{resolve_chart, ChartRequest, DEFAULT_BINS};
use datalens::hr::{generate_employees, top_risk, DepartmentFilter, HrReport};
use datalens::input::Parser;
use datalens::{AnalysisType, ChartChoices, Dashboard, Dataset, QualityReport};

/// Generate an order ledger CSV with gaps in a few columns.
fn generate_orders(rows: usize) -> String {
    let regions = ["North", "South", "East", "West"];
    let products = ["Laptop", "Monitor", "Keyboard", "Mouse", "Headset"];

    let mut data = String::from(
        "order_id,region,product,units,unit_price,revenue,discount,order_date\n",
    );
    for row in 0..rows {
        let units = (row % 17) + 1;
        let price = 10.0 + (row % 97) as f64 * 3.25;
        data.push_str(&format!("{},", 1000 + row));
        if row % 23 != 0 {
            data.push_str(regions[row % regions.len()]);
        }
        data.push(',');
        data.push_str(products[row % products.len()]);
        data.push(',');
        if row % 31 != 0 {
            data.push_str(&units.to_string());
        }
        data.push_str(&format!(",{:.2},{:.2},", price, price * units as f64));
        if row % 7 != 0 {
            data.push_str(&format!("{:.2}", (row % 4) as f64 * 0.05));
        }
        data.push_str(&format!(",2024-{:02}-{:02}\n", (row % 12) + 1, (row % 28) + 1));
    }
    data
}

fn bench_full_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_analysis");
    let dashboard = Dashboard::new();

    for rows in [100, 1_000, 10_000] {
        let data = generate_orders(rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| {
                dashboard
                    .analyze_bytes(
                        "orders.csv",
                        black_box(data.as_bytes()),
                        AnalysisType::Correlation,
                        &ChartChoices::new(),
                    )
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_quality_summary(c: &mut Criterion) {
    let data = generate_orders(10_000);
    let (table, _) = Parser::new().parse_named_bytes("orders.csv", data.as_bytes()).unwrap();
    let dataset = Dataset::from_table(&table).unwrap();

    c.bench_function("quality_summary_10k", |b| {
        b.iter(|| QualityReport::summarize(black_box(&dataset)))
    });

    let requests = [
        ("heatmap", ChartRequest::Correlation {
            columns: ["order_id", "units", "unit_price", "revenue", "discount"]
                .into_iter()
                .map(String::from)
                .collect(),
        }),
        ("histogram", ChartRequest::Distribution {
            column: "revenue".into(),
            group_by: Some("region".into()),
        }),
        ("scatter", ChartRequest::Relationship {
            x: "unit_price".into(),
            y: "revenue".into(),
            color_by: Some("product".into()),
        }),
    ];

    let mut group = c.benchmark_group("resolve_chart");
    for (name, request) in &requests {
        group.bench_with_input(BenchmarkId::from_parameter(name), request, |b, request| {
            b.iter(|| resolve_chart(&dataset, black_box(request), DEFAULT_BINS).unwrap())
        });
    }
    group.finish();
}

fn bench_hr(c: &mut Criterion) {
    let employees = generate_employees(5_000, 7);

    c.bench_function("top_risk_5k", |b| b.iter(|| top_risk(black_box(&employees), 10)));
    c.bench_function("hr_report_5k", |b| {
        b.iter(|| {
            HrReport::build(black_box(&employees), &DepartmentFilter::All, 10, DEFAULT_BINS)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_full_analysis, bench_quality_summary, bench_hr);
criterion_main!(benches);
