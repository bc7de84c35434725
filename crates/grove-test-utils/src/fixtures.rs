//! Frame-loop helpers shared by integration tests and benches.

use std::time::Duration;

use grove_task::{Scheduler, TaskEvent};

/// One 60 Hz frame, rounded to whole milliseconds.
pub const FRAME: Duration = Duration::from_millis(16);

/// Shorthand for [`Duration::from_millis`].
pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Poll every queued event.
pub fn drain<K: Copy>(scheduler: &mut Scheduler<K>) -> Vec<TaskEvent<K>> {
    std::iter::from_fn(|| scheduler.poll_event()).collect()
}

/// Split `total_ms` into consecutive non-empty ticks at the given cut
/// points (taken modulo `total_ms`). The ticks always sum to `total_ms`.
pub fn ticks_summing_to(total_ms: u64, cuts: &[u64]) -> Vec<u64> {
    assert!(total_ms > 0, "cannot split an empty span");
    let mut points: Vec<u64> = cuts.iter().map(|c| c % total_ms).collect();
    points.push(0);
    points.push(total_ms);
    points.sort_unstable();
    points.dedup();
    points.windows(2).map(|w| w[1] - w[0]).collect()
}
