//! Criterion benchmarks playing whole rounds through the controller.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use grove_bench::{play_round, reference_profile, stress_profile};
use grove_engine::Game;

fn bench_reference_round(c: &mut Criterion) {
    c.bench_function("round_reference", |b| {
        b.iter_batched(
            || {
                let mut game = Game::new(reference_profile(42)).unwrap();
                game.start_round().unwrap();
                game
            },
            |mut game| play_round(&mut game).unwrap(),
            BatchSize::SmallInput,
        );
    });
}

fn bench_stress_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_stress");
    group.sample_size(20);
    group.bench_function("play", |b| {
        b.iter_batched(
            || {
                let mut game = Game::new(stress_profile(42)).unwrap();
                game.start_round().unwrap();
                game
            },
            |mut game| play_round(&mut game).unwrap(),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_reference_round, bench_stress_round);
criterion_main!(benches);
