//! Criterion micro-benchmarks for pool acquire/release.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use grove_pool::{Pool, Poolable};

struct Block {
    alpha: f32,
}

impl Poolable for Block {
    type Prototype = ();

    fn instantiate(_: &()) -> Self {
        Block { alpha: 1.0 }
    }

    fn on_acquire(&mut self) {
        self.alpha = 1.0;
    }
}

fn bench_acquire_release_steady(c: &mut Criterion) {
    let mut pool: Pool<Block> = Pool::new((), 64);
    pool.ensure_initialized();
    c.bench_function("pool_acquire_release_steady", |b| {
        b.iter(|| {
            let h = pool.acquire();
            black_box(pool.get(h).map(|b| b.alpha));
            pool.release(h).unwrap();
        });
    });
}

fn bench_churn_64(c: &mut Criterion) {
    let mut pool: Pool<Block> = Pool::new((), 64);
    let mut held = Vec::with_capacity(64);
    c.bench_function("pool_churn_64", |b| {
        b.iter(|| {
            for _ in 0..64 {
                held.push(pool.acquire());
            }
            // Release in interleaved order so the reuse queue is shuffled.
            for i in (0..held.len()).step_by(2).chain((1..held.len()).step_by(2)) {
                pool.release(held[i]).unwrap();
            }
            held.clear();
        });
    });
}

fn bench_stale_lookup(c: &mut Criterion) {
    let mut pool: Pool<Block> = Pool::new((), 1);
    let stale = pool.acquire();
    pool.release(stale).unwrap();
    let _live = pool.acquire();
    c.bench_function("pool_stale_lookup", |b| {
        b.iter(|| black_box(pool.get(black_box(stale)).is_none()));
    });
}

criterion_group!(
    benches,
    bench_acquire_release_steady,
    bench_churn_64,
    bench_stale_lookup
);
criterion_main!(benches);
