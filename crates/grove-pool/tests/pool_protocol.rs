//! Acquire/release protocol checks through the public API only.

use std::cell::Cell;

use grove_core::PoolError;
use grove_pool::{Handle, Pool, Poolable};

/// A pooled sprite whose opacity must be restored on reuse.
#[derive(Debug)]
struct Sprite {
    serial: u32,
    alpha: f32,
    parent: Option<u32>,
}

impl Poolable for Sprite {
    type Prototype = Cell<u32>;

    fn instantiate(next_serial: &Self::Prototype) -> Self {
        let serial = next_serial.get();
        next_serial.set(serial + 1);
        Sprite {
            serial,
            alpha: 1.0,
            parent: None,
        }
    }

    fn on_acquire(&mut self) {
        self.alpha = 1.0;
    }

    fn on_release(&mut self) {
        self.parent = None;
    }
}

fn serial(pool: &Pool<Sprite>, h: Handle<Sprite>) -> u32 {
    pool.get(h).expect("live handle").serial
}

#[test]
fn fifo_reuse_across_interleaved_releases() {
    let mut pool: Pool<Sprite> = Pool::new(Cell::new(0), 3);
    let a = pool.acquire();
    let b = pool.acquire();
    let c = pool.acquire();
    let (sa, sb, sc) = (serial(&pool, a), serial(&pool, b), serial(&pool, c));

    pool.release(b).unwrap();
    pool.release(a).unwrap();
    pool.release(c).unwrap();

    let order: Vec<u32> = (0..3)
        .map(|_| {
            let h = pool.acquire();
            serial(&pool, h)
        })
        .collect();
    assert_eq!(order, vec![sb, sa, sc]);
    assert_eq!(pool.len(), 3);
}

#[test]
fn reuse_restores_default_appearance_and_detaches() {
    let mut pool: Pool<Sprite> = Pool::new(Cell::new(0), 0);
    let h = pool.acquire();
    {
        let sprite = pool.get_mut(h).unwrap();
        sprite.alpha = 0.1;
        sprite.parent = Some(7);
    }
    pool.release(h).unwrap();

    let h = pool.acquire();
    let sprite = pool.get(h).unwrap();
    assert_eq!(sprite.alpha, 1.0);
    assert_eq!(sprite.parent, None);
}

#[test]
fn misuse_leaves_pool_untouched() {
    let mut pool: Pool<Sprite> = Pool::new(Cell::new(0), 2);
    let mut other: Pool<Sprite> = Pool::new(Cell::new(100), 0);
    let h = pool.acquire();
    let foreign = other.acquire();

    assert!(matches!(
        pool.release(foreign),
        Err(PoolError::ForeignHandle { .. })
    ));
    pool.release(h).unwrap();
    assert!(matches!(pool.release(h), Err(PoolError::StaleHandle { .. })));

    assert_eq!(pool.active_count(), 0);
    assert_eq!(pool.inactive_count(), 2);
    assert_eq!(other.active_count(), 1);
}
