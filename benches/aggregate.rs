//! Microbenchmarks for statistics, analysis and report rendering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pixbench::analysis::Analysis;
use pixbench::config::{Labels, ProfileConfig};
use pixbench::corpus::{self, Pattern};
use pixbench::report::{csv, markdown, profile, ReportMeta};
use pixbench::result::{BenchmarkResult, Implementation, Operation, ResultSet, SizeRun};
use pixbench::stats;

fn make_timings(len: usize, mut seed: u32) -> Vec<f64> {
    (0..len)
        .map(|_| {
            seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
            0.01 + f64::from(seed >> 16) / 1e7
        })
        .collect()
}

fn make_sweep(sizes: &[u32], runs: usize) -> ResultSet {
    let mut set = ResultSet::new();
    for (i, &size) in sizes.iter().enumerate() {
        let seed = i as u32 * 4;
        for (k, implementation) in [Implementation::Candidate, Implementation::Reference]
            .into_iter()
            .enumerate()
        {
            let timings = |op: u32| make_timings(runs, seed + k as u32 * 2 + op);
            let encode =
                BenchmarkResult::with_timings(implementation, size, Operation::Encode, timings(0))
                    .compressed(Some(u64::from(size) * u64::from(size) / 3));
            // Candidate decode drops out every third size.
            let decode = (implementation == Implementation::Reference || i % 3 != 2).then(|| {
                BenchmarkResult::with_timings(implementation, size, Operation::Decode, timings(1))
            });
            set.push(SizeRun { encode, decode });
        }
    }
    set
}

fn bench_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats");
    for len in [5usize, 100, 10_000] {
        let timings = make_timings(len, 0x5EED);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("median", len), &timings, |b, t| {
            b.iter(|| stats::median(black_box(t)))
        });
        group.bench_with_input(BenchmarkId::new("std_dev", len), &timings, |b, t| {
            b.iter(|| stats::sample_std_dev(black_box(t)))
        });
    }
    group.finish();
}

fn bench_reports(c: &mut Criterion) {
    let sizes: Vec<u32> = (1..=24).map(|i| i * 128).collect();
    let results = make_sweep(&sizes, 20);
    let config = ProfileConfig::default();
    let meta = ReportMeta {
        labels: Labels::default(),
        generated_at: "2024-01-01 00:00:00".into(),
    };

    let mut group = c.benchmark_group("reports");
    group.bench_function("analysis", |b| {
        b.iter(|| Analysis::new(black_box(&results), &config))
    });

    let analysis = Analysis::new(&results, &config);
    group.bench_function("markdown", |b| {
        b.iter(|| markdown::render(black_box(&results), &analysis, &meta))
    });
    group.bench_function("csv", |b| b.iter(|| csv::render(black_box(&results))));
    group.bench_function("profile", |b| {
        b.iter(|| profile::render(black_box(&results), &analysis, &meta, &config))
    });
    group.finish();
}

fn bench_corpus(c: &mut Criterion) {
    let mut group = c.benchmark_group("corpus");
    for size in [256u32, 1024] {
        group.throughput(Throughput::Bytes(u64::from(size) * u64::from(size)));
        group.bench_with_input(BenchmarkId::new("noise", size), &size, |b, &s| {
            b.iter(|| corpus::render_pixels(s, Pattern::default()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_stats, bench_reports, bench_corpus);
criterion_main!(benches);
