//! Matrix routines against naive per-pair evaluation.

use cdist::{compute_distance, DistanceConfig, DistanceEngine, DistanceMetric, Metric, PointSet};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;

fn naive(left: &PointSet, right: &PointSet, metric: Metric) -> Vec<f32> {
    let mut out = Vec::with_capacity(left.len() * right.len());
    for l in left.rows() {
        for r in right.rows() {
            out.push(metric.distance(l, r));
        }
    }
    out
}

fn bench_cdist(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);

    for metric in Metric::ALL {
        let mut group = c.benchmark_group(format!("cdist_{}", metric));

        for (rows, dim) in [(64, 16), (256, 128), (1024, 384)] {
            let left = PointSet::random_uniform(rows, dim, &mut rng);
            let right = PointSet::random_uniform(rows, dim, &mut rng);
            let label = format!("{}x{}", rows, dim);

            group.throughput(Throughput::Elements((rows * rows) as u64));
            group.bench_with_input(BenchmarkId::new("matrix", &label), &rows, |b, _| {
                b.iter(|| compute_distance(black_box(&left), black_box(&right), metric))
            });

            let sequential = DistanceEngine::new(DistanceConfig::sequential());
            group.bench_with_input(BenchmarkId::new("matrix_sequential", &label), &rows, |b, _| {
                b.iter(|| sequential.compute(black_box(&left), black_box(&right), metric))
            });

            group.bench_with_input(BenchmarkId::new("naive", &label), &rows, |b, _| {
                b.iter(|| naive(black_box(&left), black_box(&right), metric))
            });
        }

        group.finish();
    }
}

criterion_group!(benches, bench_cdist);
criterion_main!(benches);
