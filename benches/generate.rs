//! Benchmarks for the CPU side of a regeneration.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use glyph_galaxy::glyph::{rasterize, DEFAULT_THRESHOLD};
use glyph_galaxy::{generate, FieldParameters};

fn bench_rasterize(c: &mut Criterion) {
    let mut group = c.benchmark_group("rasterize");

    for size in [64u32, 128, 256] {
        group.bench_with_input(BenchmarkId::new("Ma", size), &size, |b, &size| {
            b.iter(|| black_box(rasterize(black_box("Ma"), size, DEFAULT_THRESHOLD)))
        });
    }

    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let mask = rasterize("M", 128, DEFAULT_THRESHOLD);

    for count in [1_000u32, 100_000, 1_000_000] {
        let params = FieldParameters {
            count,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(count), &params, |b, params| {
            let mut rng = SmallRng::seed_from_u64(0);
            b.iter(|| black_box(generate(&mask, params, &mut rng)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rasterize, bench_generate);
criterion_main!(benches);
