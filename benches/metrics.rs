//! Benchmarks for column layout computation.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::cast_possible_truncation)]

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gridhead::layout::partition;
use gridhead::{Column, ColumnMetrics, HeaderRow, HeaderRowProps};

/// Column list with every eighth column frozen and every fifth hidden.
fn make_columns(count: usize) -> Vec<Column> {
    (0..count)
        .map(|i| {
            let mut column = Column::new(format!("c{i}"), 80.0 + (i % 7) as f32 * 10.0);
            column.resizable = true;
            column.frozen = i % 8 == 0;
            column.visible = i % 5 != 0;
            column
        })
        .collect()
}

/// Benchmark the offset pass across column counts
fn bench_compute_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_metrics");

    for count in [10, 100, 1000] {
        let columns = make_columns(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("columns", count), &columns, |b, columns| {
            b.iter(|| ColumnMetrics::new(black_box(columns.clone()), black_box(1200.0)))
        });
    }

    group.finish();
}

/// Benchmark a single-column resize with full offset reflow
fn bench_resize_reflow(c: &mut Criterion) {
    let metrics = ColumnMetrics::new(make_columns(100), 1200.0);

    c.bench_function("resize_reflow_100", |b| {
        b.iter(|| metrics.resize_column(black_box(50), black_box(240.0)))
    });
}

/// Benchmark frozen/scrollable partitioning
fn bench_partition(c: &mut Criterion) {
    let metrics = ColumnMetrics::new(make_columns(1000), 1200.0);

    c.bench_function("partition_1000", |b| {
        b.iter(|| partition(black_box(&metrics.columns)))
    });
}

/// Benchmark a full row update pass: gate, metrics, partition, cell rebuild
fn bench_row_update(c: &mut Criterion) {
    let columns: Arc<[Column]> = make_columns(100).into();
    let mut row = HeaderRow::new(HeaderRowProps::new(Arc::clone(&columns), 35.0));

    c.bench_function("row_update_100", |b| {
        b.iter(|| {
            let mut next = HeaderRowProps::new(Arc::clone(&columns), 35.0);
            next.data_changed = true;
            row.update(black_box(next))
        })
    });
}

/// Benchmark producing the render payload for a mid-drag row
fn bench_row_render(c: &mut Criterion) {
    let columns: Arc<[Column]> = make_columns(100).into();
    let mut row = HeaderRow::new(HeaderRowProps::new(Arc::clone(&columns), 35.0));
    row.handle_resize("c3", 240.0);

    c.bench_function("row_render_100", |b| b.iter(|| black_box(row.render())));
}

criterion_group!(
    benches,
    bench_compute_metrics,
    bench_resize_reflow,
    bench_partition,
    bench_row_update,
    bench_row_render,
);

criterion_main!(benches);
