use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use distance_calculator::{Coordinate, geometry_distance};

fn geometry_distance_benchmark(c: &mut Criterion) {
    let brussels = Coordinate::new(50.8503, 4.3517);
    let paris = Coordinate::new(48.8566, 2.3522);

    c.bench_function("geometry distance", |b| {
        b.iter(|| geometry_distance(black_box(&brussels), black_box(&paris)))
    });

    let points: Vec<Coordinate> = (0..10)
        .map(|i| Coordinate::new(50.0 + i as f64 * 0.1, 4.0 + i as f64 * 0.05))
        .collect();

    c.bench_function("geometry distance 10x10", |b| {
        b.iter(|| {
            points
                .iter()
                .flat_map(|from| points.iter().map(move |to| (from, to)))
                .filter_map(|(from, to)| geometry_distance(from, to).ok())
                .count()
        })
    });
}

criterion_group!(benches, geometry_distance_benchmark);
criterion_main!(benches);
