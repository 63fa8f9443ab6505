//! Benchmarks pour la transformation d'arbres de coordonnées

use coordtree::CoordinateTree;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};

/// MultiPolygon synthétique : `polygons` anneaux de `ring_len` positions
fn synthetic_multipolygon(polygons: usize, ring_len: usize) -> Value {
    let polys: Vec<Value> = (0..polygons)
        .map(|p| {
            let ring: Vec<Value> = (0..ring_len)
                .map(|i| {
                    let x = 6_200_000.0 + (p * 1000 + i) as f64;
                    let y = 3_000_000.0 + (i as f64) * 2.5;
                    json!([x, y])
                })
                .collect();
            json!([ring])
        })
        .collect();
    Value::Array(polys)
}

fn scale(x: f64, y: f64) -> Result<(f64, f64), String> {
    Ok((x * 1e-5, y * 1e-5))
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for &ring_len in &[100usize, 10_000] {
        let value = synthetic_multipolygon(10, ring_len);
        group.throughput(Throughput::Elements((10 * ring_len) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(ring_len), &value, |b, v| {
            b.iter(|| black_box(CoordinateTree::from_value(black_box(v)).unwrap()))
        });
    }

    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_value");

    for &ring_len in &[100usize, 10_000] {
        let value = synthetic_multipolygon(10, ring_len);
        group.throughput(Throughput::Elements((10 * ring_len) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(ring_len), &value, |b, v| {
            b.iter(|| black_box(coordtree::transform_value(black_box(v), &scale).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_transform);
criterion_main!(benches);
