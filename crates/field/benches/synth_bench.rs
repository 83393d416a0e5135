//! Criterion benchmark for the field synthesizer.
//!
//! The grid walk visits ~4.5k nodes and prices each against 2 attractors,
//! 7 facilities, and 2 exclusion regions.
//!
//! Run with: cargo bench -p field --bench synth_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use field::dataset;
use field::rng::FieldRng;
use field::synth::synthesize_field;

fn bench_synthesize(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_synthesis");
    group.sample_size(20);

    let config = dataset::hangzhou_config();

    group.bench_function("hangzhou_full_grid", |b| {
        b.iter(|| {
            let mut rng = FieldRng::from_seed_u64(42);
            black_box(synthesize_field(black_box(&config), &mut rng.0))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_synthesize);
criterion_main!(benches);
