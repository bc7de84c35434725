//! Strongly-typed identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Counter for unique [`PoolId`] allocation.
static POOL_COUNTER: AtomicU32 = AtomicU32::new(1);

/// Unique per-instance identifier for an object pool.
///
/// Allocated from a monotonic atomic counter via [`PoolId::next`]. Every
/// handle a pool hands out carries the pool's ID, so releasing a handle
/// into the wrong pool is detected instead of silently corrupting the
/// other pool's reuse queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolId(u32);

impl PoolId {
    /// Allocate a fresh, unique pool ID.
    ///
    /// Each call returns an ID that has never been returned before within
    /// this process. Thread-safe.
    pub fn next() -> Self {
        Self(POOL_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a timed task within one scheduler.
///
/// IDs are assigned sequentially and never reused, so a cancelled task's
/// ID can never alias a later task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TaskId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Monotonically increasing round counter.
///
/// Incremented each time the controller starts a new round. The first
/// round is `RoundNumber(1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoundNumber(pub u32);

impl RoundNumber {
    /// The round after this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for RoundNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_ids_are_unique() {
        let a = PoolId::next();
        let b = PoolId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn round_number_advances() {
        assert_eq!(RoundNumber::default().next(), RoundNumber(1));
        assert_eq!(RoundNumber(u32::MAX).next(), RoundNumber(u32::MAX));
    }
}
