use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;

use geometric_lighting::bezier::BezierPatch;
use geometric_lighting::teapot;

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let params = (0..1000)
        .map(|_| (rng.gen::<f32>(), rng.gen::<f32>()))
        .collect::<Vec<_>>();
    let patch = teapot::control_grid(4)
        .map(|grid| BezierPatch::new(grid, 2))
        .unwrap()
        .unwrap();
    c.bench_function("Bezier patch evaluate", |b| {
        b.iter(|| {
            params.iter().for_each(|&(u, v)| {
                patch.evaluate(u, v);
            })
        })
    });

    let surface = teapot::teapot(2).unwrap();
    let mut group = c.benchmark_group("Teapot tessellation");
    for resolution in [4u32, 10, 32, 64] {
        group.bench_with_input(
            BenchmarkId::from_parameter(resolution),
            &resolution,
            |b, &resolution| {
                b.iter(|| {
                    surface.patches().iter().for_each(|patch| {
                        patch.tessellate(resolution).unwrap();
                    })
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
