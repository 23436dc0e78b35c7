/// Criterion benchmarks for benchviz.
///
/// Synthetic device tables stand in for loaded CSV runs, so nothing touches
/// the file system.
///
/// Benchmark groups:
///   • summarize     – grouping and averaging a device table
///   • reconcile     – union of model/test keys across two tables
///   • align_metric  – laying means out along the model axis
use benchviz::{
    aggregate::Summary,
    align::align_metric,
    reconcile::CanonicalAxis,
    record::{Device, DeviceTable, MeasurementRecord, Metric},
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

// ---------------------------------------------------------------------------
// Helper: build a table of `rows` records over `models` × `tests` keys
// ---------------------------------------------------------------------------
fn generate_table(device: Device, rows: usize, models: usize, tests: usize) -> DeviceTable {
    let mut rng = rand::rng();
    let records = (0..rows)
        .map(|_| MeasurementRecord {
            model: format!("model-{}", rng.random_range(0..models)),
            test_name: format!("test-{}", rng.random_range(0..tests)),
            tokens: Some(rng.random_range(16.0..512.0)),
            tokens_per_sec: rng.random_range(1.0..200.0),
            seconds: rng.random_range(0.1..30.0),
            cpu_percent: rng.random_range(0.0..100.0),
            mem_mb: rng.random_range(100.0..8000.0),
            vram_mb: match device {
                Device::Gpu => Some(rng.random_range(500.0..24000.0)),
                Device::Cpu => None,
            },
            benchmark: Some("benchmark_0".into()),
        })
        .collect();
    DeviceTable::with_records(device, records)
}

const SIZES: [(usize, usize, usize); 4] = [(100, 4, 2), (1_000, 10, 4), (10_000, 20, 8), (100_000, 50, 10)];

// ---------------------------------------------------------------------------
// Summary::from_table
// ---------------------------------------------------------------------------
fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize");

    for (rows, models, tests) in SIZES {
        let id = BenchmarkId::from_parameter(format!("{rows}r×{models}m×{tests}t"));
        let table = generate_table(Device::Gpu, rows, models, tests);
        group.bench_with_input(id, &table, |b, table| {
            b.iter(|| Summary::from_table(table, &Metric::ALL));
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// CanonicalAxis::union
// ---------------------------------------------------------------------------
fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");

    for (rows, models, tests) in SIZES {
        let id = BenchmarkId::from_parameter(format!("{rows}r×{models}m×{tests}t"));
        let gpu = generate_table(Device::Gpu, rows, models, tests);
        let cpu = generate_table(Device::Cpu, rows, models, tests);
        group.bench_with_input(id, &(gpu, cpu), |b, (gpu, cpu)| {
            b.iter(|| CanonicalAxis::union(gpu, cpu));
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// align_metric
// ---------------------------------------------------------------------------
fn bench_align_metric(c: &mut Criterion) {
    let mut group = c.benchmark_group("align_metric");

    for (rows, models, tests) in SIZES {
        let id = BenchmarkId::from_parameter(format!("{rows}r×{models}m×{tests}t"));
        let gpu = generate_table(Device::Gpu, rows, models, tests);
        let cpu = generate_table(Device::Cpu, rows, models, tests);
        let axis = CanonicalAxis::union(&gpu, &cpu);
        let gpu = Summary::from_table(&gpu, &Metric::ALL);
        let cpu = Summary::from_table(&cpu, &Metric::ALL);
        group.bench_function(id, |b| {
            b.iter(|| align_metric(Metric::TokensPerSec, &axis, &gpu, &cpu));
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------
criterion_group!(benches, bench_summarize, bench_reconcile, bench_align_metric);
criterion_main!(benches);
