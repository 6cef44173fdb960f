//! Benchmarks for the coordinate mapper hot path.
//!
//! Run with: cargo bench --package cone-projection --bench mapper_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cone_common::GeoPoint;
use cone_projection::{CalibrationAxis, CoordinateMapper, LongitudeAxis, OutOfBoundsPolicy};
use test_utils::cone_ring;

fn atlantic_mapper(policy: OutOfBoundsPolicy) -> CoordinateMapper {
    let longitude: Vec<(i32, f64)> = (0..=21).map(|k| (47 * k, -105.0 + 5.0 * k as f64)).collect();
    let latitude = [
        (595, 5.0),
        (511, 10.0),
        (462, 15.0),
        (413, 20.0),
        (364, 25.0),
        (309, 30.0),
        (254, 35.0),
        (194, 40.0),
        (131, 45.0),
        (64, 50.0),
    ];
    CoordinateMapper::new(
        LongitudeAxis::Continuous(CalibrationAxis::from_pairs(&longitude, 5.0).unwrap()),
        CalibrationAxis::from_pairs(&latitude, 5.0).unwrap(),
        policy,
    )
}

fn bench_map_to_pixel(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_to_pixel");

    for &count in &[100usize, 1_000, 10_000] {
        let points: Vec<GeoPoint> = cone_ring(-60.0, 25.0, 8.0, count)
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();

        group.throughput(Throughput::Elements(count as u64));
        for policy in [OutOfBoundsPolicy::Skip, OutOfBoundsPolicy::Clamp] {
            let mapper = atlantic_mapper(policy);
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", policy), count),
                &points,
                |b, points| {
                    b.iter(|| {
                        points
                            .iter()
                            .filter_map(|p| mapper.map_to_pixel(black_box(*p), 1000, 650))
                            .count()
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_map_to_pixel);
criterion_main!(benches);
