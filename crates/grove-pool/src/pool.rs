//! The generic pool.

use std::collections::VecDeque;
use std::fmt;

use grove_core::{PoolError, PoolId};

use crate::handle::Handle;

/// Capability implemented by anything a [`Pool`] can hold.
///
/// The pool is generic over this trait rather than over a base type: each
/// entity kind says how it is built from its prototype and how it resets
/// itself on the way in and out of use.
pub trait Poolable: Sized {
    /// Instance-kind descriptor new instances are built from.
    type Prototype;

    /// Construct a fresh, inactive instance.
    fn instantiate(prototype: &Self::Prototype) -> Self;

    /// Called every time the instance is handed out. Restore default
    /// state here so a reused instance looks freshly built.
    fn on_acquire(&mut self) {}

    /// Called every time the instance is returned. Detach from any
    /// external container here.
    fn on_release(&mut self) {}
}

struct Slot<T> {
    value: T,
    generation: u32,
    active: bool,
}

/// Registry of reusable instances of one kind.
///
/// Inactive instances wait in a FIFO queue, so the instance released
/// earliest is reused first. The pool populates itself lazily: the first
/// [`acquire`](Pool::acquire) constructs the standing minimum before
/// serving the request.
pub struct Pool<T: Poolable> {
    id: PoolId,
    prototype: T::Prototype,
    min_size: usize,
    slots: Vec<Slot<T>>,
    inactive: VecDeque<u32>,
    initialized: bool,
}

impl<T: Poolable> Pool<T> {
    /// Create an empty pool. Nothing is constructed until first use.
    pub fn new(prototype: T::Prototype, min_size: usize) -> Self {
        Self {
            id: PoolId::next(),
            prototype,
            min_size,
            slots: Vec::new(),
            inactive: VecDeque::new(),
            initialized: false,
        }
    }

    /// This pool's identity. Every handle it issues carries it.
    pub fn id(&self) -> PoolId {
        self.id
    }

    /// The prototype new instances are built from.
    pub fn prototype(&self) -> &T::Prototype {
        &self.prototype
    }

    /// Standing inventory built on first use.
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Whether the standing inventory has been built.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Build the standing inventory if that has not happened yet.
    pub fn ensure_initialized(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        while self.inactive.len() < self.min_size {
            let index = self.construct();
            self.inactive.push_back(index);
        }
        tracing::debug!(pool = %self.id, size = self.min_size, "pool initialized");
    }

    /// Hand out an instance, reusing the oldest released one if possible.
    pub fn acquire(&mut self) -> Handle<T> {
        self.ensure_initialized();

        let index = match self.inactive.front().copied() {
            Some(head) if !self.slots[head as usize].active => {
                self.inactive.pop_front();
                head
            }
            Some(head) => {
                tracing::warn!(
                    pool = %self.id,
                    head,
                    "head of reuse queue is active, constructing instead"
                );
                self.construct()
            }
            None => self.construct(),
        };

        let slot = &mut self.slots[index as usize];
        slot.active = true;
        slot.value.on_acquire();
        tracing::trace!(pool = %self.id, index, generation = slot.generation, "acquired");
        Handle::new(self.id, index, slot.generation)
    }

    /// Return an instance for reuse.
    ///
    /// The handle and every copy of it become stale.
    ///
    /// # Errors
    ///
    /// Fails without touching the pool if the handle belongs to another
    /// pool or is stale. A second release of the same handle is stale.
    pub fn release(&mut self, handle: Handle<T>) -> Result<(), PoolError> {
        let index = self.check(handle)?;
        let slot = &mut self.slots[index];
        if !slot.active {
            return Err(PoolError::AlreadyInactive {
                index: handle.index,
            });
        }
        slot.active = false;
        slot.generation = slot.generation.wrapping_add(1);
        slot.value.on_release();
        self.inactive.push_back(handle.index);
        tracing::trace!(pool = %self.id, index = handle.index, "released");
        Ok(())
    }

    /// Borrow the instance behind a live handle.
    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        let index = self.check(handle).ok()?;
        let slot = &self.slots[index];
        slot.active.then_some(&slot.value)
    }

    /// Mutably borrow the instance behind a live handle.
    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        let index = self.check(handle).ok()?;
        let slot = &mut self.slots[index];
        if slot.active {
            Some(&mut slot.value)
        } else {
            None
        }
    }

    /// Like [`get_mut`](Pool::get_mut) but reports why the handle is unusable.
    ///
    /// # Errors
    ///
    /// The same conditions as [`release`](Pool::release).
    pub fn try_get_mut(&mut self, handle: Handle<T>) -> Result<&mut T, PoolError> {
        let index = self.check(handle)?;
        let slot = &mut self.slots[index];
        if slot.active {
            Ok(&mut slot.value)
        } else {
            Err(PoolError::AlreadyInactive {
                index: handle.index,
            })
        }
    }

    /// Whether the handle names a currently active instance.
    pub fn is_live(&self, handle: Handle<T>) -> bool {
        self.get(handle).is_some()
    }

    /// Total instances ever constructed.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether nothing has been constructed yet.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Instances currently handed out.
    pub fn active_count(&self) -> usize {
        self.slots.len() - self.inactive.len()
    }

    /// Instances waiting for reuse.
    pub fn inactive_count(&self) -> usize {
        self.inactive.len()
    }

    /// Handles to every active instance, in slot order.
    pub fn active_handles(&self) -> impl Iterator<Item = Handle<T>> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.active)
            .map(|(i, slot)| Handle::new(self.id, i as u32, slot.generation))
    }

    /// Slot indices in the reuse queue, head first.
    pub fn reuse_order(&self) -> impl Iterator<Item = u32> + '_ {
        self.inactive.iter().copied()
    }

    fn construct(&mut self) -> u32 {
        let index = u32::try_from(self.slots.len()).expect("pool exceeds u32::MAX instances");
        self.slots.push(Slot {
            value: T::instantiate(&self.prototype),
            generation: 0,
            active: false,
        });
        tracing::trace!(pool = %self.id, index, "constructed pooled instance");
        index
    }

    fn check(&self, handle: Handle<T>) -> Result<usize, PoolError> {
        if handle.pool != self.id {
            return Err(PoolError::ForeignHandle {
                handle_pool: handle.pool,
                pool: self.id,
            });
        }
        let slot = self
            .slots
            .get(handle.index as usize)
            .ok_or(PoolError::UnknownSlot {
                index: handle.index,
            })?;
        if slot.generation != handle.generation {
            return Err(PoolError::StaleHandle {
                index: handle.index,
                handle_generation: handle.generation,
                current_generation: slot.generation,
            });
        }
        Ok(handle.index as usize)
    }
}

impl<T: Poolable> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("id", &self.id)
            .field("min_size", &self.min_size)
            .field("len", &self.slots.len())
            .field("inactive", &self.inactive.len())
            .field("initialized", &self.initialized)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[derive(Debug, Default)]
    struct Counter {
        acquired: u32,
        released: u32,
        dirty: bool,
    }

    impl Poolable for Counter {
        type Prototype = ();

        fn instantiate(_: &()) -> Self {
            Counter::default()
        }

        fn on_acquire(&mut self) {
            self.acquired += 1;
            self.dirty = false;
        }

        fn on_release(&mut self) {
            self.released += 1;
        }
    }

    fn assert_partitioned(pool: &Pool<Counter>) {
        let queued: HashSet<u32> = pool.reuse_order().collect();
        assert_eq!(queued.len(), pool.inactive_count(), "duplicate queue entry");
        for h in pool.active_handles() {
            assert!(!queued.contains(&h.index()), "slot {} active and queued", h.index());
        }
        assert_eq!(pool.active_count() + pool.inactive_count(), pool.len());
    }

    #[test]
    fn first_acquire_builds_standing_inventory() {
        let mut pool: Pool<Counter> = Pool::new((), 4);
        assert!(pool.is_empty());
        assert!(!pool.is_initialized());

        let _h = pool.acquire();
        assert!(pool.is_initialized());
        assert_eq!(pool.len(), 4);
        assert_eq!(pool.active_count(), 1);
        assert_eq!(pool.inactive_count(), 3);
    }

    #[test]
    fn acquire_past_inventory_grows_pool() {
        let mut pool: Pool<Counter> = Pool::new((), 1);
        let _a = pool.acquire();
        let _b = pool.acquire();
        let _c = pool.acquire();
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.inactive_count(), 0);
    }

    #[test]
    fn reuse_is_fifo() {
        let mut pool: Pool<Counter> = Pool::new((), 0);
        let a = pool.acquire();
        let b = pool.acquire();
        pool.release(a).unwrap();
        pool.release(b).unwrap();

        let first = pool.acquire();
        let second = pool.acquire();
        assert_eq!(first.index(), a.index());
        assert_eq!(second.index(), b.index());
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn hooks_run_on_every_transition() {
        let mut pool: Pool<Counter> = Pool::new((), 0);
        let h = pool.acquire();
        pool.get_mut(h).unwrap().dirty = true;
        pool.release(h).unwrap();
        let h = pool.acquire();
        let c = pool.get(h).unwrap();
        assert_eq!(c.acquired, 2);
        assert_eq!(c.released, 1);
        assert!(!c.dirty);
    }

    #[test]
    fn double_release_is_rejected() {
        let mut pool: Pool<Counter> = Pool::new((), 0);
        let h = pool.acquire();
        pool.release(h).unwrap();
        let err = pool.release(h).unwrap_err();
        assert!(matches!(err, PoolError::StaleHandle { .. }), "got {err:?}");
        assert_eq!(pool.inactive_count(), 1);
    }

    #[test]
    fn handle_past_the_end_is_unknown() {
        let mut pool: Pool<Counter> = Pool::new((), 1);
        let _h = pool.acquire();
        let bogus = Handle::new(pool.id(), 5, 0);
        assert_eq!(
            pool.release(bogus),
            Err(PoolError::UnknownSlot { index: 5 })
        );
        assert!(pool.get(bogus).is_none());
    }

    #[test]
    fn wrapped_generation_reports_already_inactive() {
        let mut pool: Pool<Counter> = Pool::new((), 0);
        let h = pool.acquire();
        pool.slots[h.index() as usize].generation = u32::MAX;
        let h = Handle::new(pool.id(), h.index(), u32::MAX);
        pool.release(h).unwrap();

        let wrapped = Handle::new(pool.id(), h.index(), 0);
        assert_eq!(
            pool.release(wrapped),
            Err(PoolError::AlreadyInactive { index: h.index() })
        );
        assert_eq!(pool.inactive_count(), 1);
    }

    #[test]
    fn foreign_handle_is_rejected() {
        let mut a: Pool<Counter> = Pool::new((), 0);
        let mut b: Pool<Counter> = Pool::new((), 0);
        let h = a.acquire();
        let err = b.release(h).unwrap_err();
        assert!(matches!(err, PoolError::ForeignHandle { .. }));
        assert!(a.is_live(h));
    }

    #[test]
    fn stale_handle_cannot_reach_reused_instance() {
        let mut pool: Pool<Counter> = Pool::new((), 0);
        let old = pool.acquire();
        pool.release(old).unwrap();
        let new = pool.acquire();
        assert_eq!(old.index(), new.index());
        assert!(pool.get(old).is_none());
        assert!(pool.get(new).is_some());
        assert!(matches!(
            pool.try_get_mut(old),
            Err(PoolError::StaleHandle { .. })
        ));
    }

    #[derive(Clone, Debug)]
    enum Op {
        Acquire,
        Release(usize),
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Acquire), (0usize..16).prop_map(Op::Release)]
    }

    proptest! {
        #[test]
        fn active_and_inactive_never_overlap(
            min_size in 0usize..6,
            ops in proptest::collection::vec(arb_op(), 1..64),
        ) {
            let mut pool: Pool<Counter> = Pool::new((), min_size);
            let mut live: Vec<Handle<Counter>> = Vec::new();
            for op in ops {
                match op {
                    Op::Acquire => live.push(pool.acquire()),
                    Op::Release(i) if !live.is_empty() => {
                        let h = live.swap_remove(i % live.len());
                        prop_assert!(pool.release(h).is_ok());
                    }
                    Op::Release(_) => {}
                }
                assert_partitioned(&pool);
                prop_assert_eq!(pool.active_count(), live.len());
            }
        }
    }
}
