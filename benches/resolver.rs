use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tabular_eda::resolver::{resolve_drop, resolve_fill_literal, resolve_fill_statistic, FillStatistic};
use tabular_eda::types::{DataSet, DataType, Field, Schema, Value};

/// Every seventh numeric cell and every eleventh label is missing.
fn sparse_dataset(rows: usize) -> DataSet {
    let schema = Schema::new(vec![
        Field::new("id", DataType::Int64),
        Field::new("score", DataType::Float64),
        Field::new("label", DataType::Utf8),
    ]);
    let data = (0..rows)
        .map(|i| {
            let score = if i % 7 == 0 { Value::Null } else { Value::Float64(i as f64 * 0.5) };
            let label = if i % 11 == 0 { Value::Null } else { Value::Utf8(format!("l{}", i % 13)) };
            vec![Value::Int64(i as i64), score, label]
        })
        .collect();
    DataSet::new(schema, data)
}

fn bench_resolver(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolver");
    for rows in [1_000usize, 100_000] {
        let ds = sparse_dataset(rows);
        group.bench_with_input(BenchmarkId::new("fill_mean", rows), &ds, |b, ds| {
            b.iter(|| resolve_fill_statistic(black_box(ds), FillStatistic::Mean))
        });
        group.bench_with_input(BenchmarkId::new("fill_median", rows), &ds, |b, ds| {
            b.iter(|| resolve_fill_statistic(black_box(ds), FillStatistic::Median))
        });
        group.bench_with_input(BenchmarkId::new("fill_literal", rows), &ds, |b, ds| {
            b.iter(|| resolve_fill_literal(black_box(ds), "0"))
        });
        group.bench_with_input(BenchmarkId::new("drop", rows), &ds, |b, ds| {
            b.iter(|| resolve_drop(black_box(ds)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolver);
criterion_main!(benches);
