//! Benchmarks for grid rasterization
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use spectralview::demo::{demo_tiles, reference_cube};
use spectralview::ops::spectral::false_color;
use spectralview::{create_view, HeadlessSurface, ViewOptions};

const BANDS: usize = 64;

/// Redraw of the current band, as done on every slider or pointer event
fn bench_rasterize(c: &mut Criterion) {
    let mut group = c.benchmark_group("rasterize");

    for &(w, h) in [(128usize, 96usize), (256, 192), (512, 384)].iter() {
        group.throughput(Throughput::Elements((4 * w * h) as u64));

        group.bench_with_input(BenchmarkId::new("band", format!("{}x{}", w, h)), &(w, h), |b, &(w, h)| {
            let view = create_view("bench", demo_tiles(h, w, BANDS), HeadlessSurface::default(), ViewOptions::default())
                .unwrap();
            b.iter(|| black_box(view.rasterize(black_box(false))));
        });

        group.bench_with_input(BenchmarkId::new("export", format!("{}x{}", w, h)), &(w, h), |b, &(w, h)| {
            let view = create_view("bench", demo_tiles(h, w, BANDS), HeadlessSurface::default(), ViewOptions::default())
                .unwrap();
            b.iter(|| black_box(view.export()));
        });
    }

    group.finish();
}

/// Default spectral map alone
fn bench_false_color(c: &mut Criterion) {
    let mut group = c.benchmark_group("false_color");

    for &bands in [16usize, 64, 200].iter() {
        let cube = reference_cube(192, 256, bands);
        group.throughput(Throughput::Elements(cube.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(bands), &cube, |b, cube| {
            b.iter(|| black_box(false_color(black_box(cube))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rasterize, bench_false_color);
criterion_main!(benches);
