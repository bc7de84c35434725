//! Pool handles.
//!
//! A [`Handle`] names one activation of one pooled instance. It is
//! generation-scoped: releasing the instance bumps the slot generation,
//! so every copy of the old handle becomes stale in O(1) without a
//! lookup table.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use grove_core::PoolId;

/// Typed reference to an instance owned by a [`Pool`](crate::Pool).
///
/// Handles are `Copy` regardless of `T` and never borrow the pool.
#[must_use]
pub struct Handle<T> {
    pub(crate) pool: PoolId,
    pub(crate) index: u32,
    pub(crate) generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub(crate) fn new(pool: PoolId, index: u32, generation: u32) -> Self {
        Self {
            pool,
            index,
            generation,
            _marker: PhantomData,
        }
    }

    /// The pool that issued this handle.
    pub fn pool(&self) -> PoolId {
        self.pool
    }

    /// Slot index within the issuing pool.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Slot generation at the time the handle was issued.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.pool == other.pool && self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pool.hash(state);
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Handle(pool={}, idx={}, gen={})",
            self.pool, self.index, self.generation
        )
    }
}
