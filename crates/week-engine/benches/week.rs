use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use week_engine::{from_epoch_seconds, resolve, to_epoch_seconds};

fn bench_resolve(c: &mut Criterion) {
    let boundary = from_epoch_seconds(1_609_459_200).unwrap(); // 2021-01-01
    let mid_year = from_epoch_seconds(1_686_830_400).unwrap(); // 2023-06-15

    let mut group = c.benchmark_group("resolve");
    group.bench_function("year_boundary", |b| b.iter(|| resolve(black_box(&boundary))));
    group.bench_function("mid_year", |b| b.iter(|| resolve(black_box(&mid_year))));
    group.finish();
}

fn bench_epoch(c: &mut Criterion) {
    let mut group = c.benchmark_group("epoch");
    group.bench_function("from_i64", |b| {
        b.iter(|| from_epoch_seconds(black_box(1_700_000_000i64)))
    });
    group.bench_function("from_str", |b| {
        b.iter(|| from_epoch_seconds(black_box("1700000000")))
    });
    group.bench_function("from_f64", |b| {
        b.iter(|| from_epoch_seconds(black_box(1_700_000_000.25f64)))
    });
    let ts = from_epoch_seconds(1_700_000_000).unwrap();
    group.bench_function("to_i64", |b| b.iter(|| to_epoch_seconds(black_box(&ts))));
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_epoch);
criterion_main!(benches);
