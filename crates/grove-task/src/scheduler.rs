//! Single-threaded task scheduler.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use grove_core::TaskId;
use indexmap::IndexMap;

use crate::task::{TaskStep, TimedTask};

/// What a task reported.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TaskEventKind {
    /// Apply progress `t`. The last progress event of a task is exactly 1.0.
    Progress(f32),
    /// The task ran to its end. Always preceded by `Progress(1.0)`.
    Completed,
}

/// One callback owed to a task's owner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TaskEvent<K> {
    /// The task that produced the event.
    pub id: TaskId,
    /// The owner-supplied key the task was started with.
    pub key: K,
    /// The callback to run.
    pub kind: TaskEventKind,
}

struct Entry<K> {
    key: K,
    task: TimedTask,
}

/// Runs timed tasks on one logical thread.
///
/// `K` is an owner-defined key that tells the owner which callback an
/// event belongs to. Tasks are stored in start order; cancellation is
/// O(1) amortized and preserves the order of the remaining tasks.
pub struct Scheduler<K> {
    tasks: IndexMap<TaskId, Entry<K>>,
    pending: VecDeque<TaskEvent<K>>,
    next_id: u64,
    elapsed: Duration,
}

impl<K: Copy> Scheduler<K> {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self {
            tasks: IndexMap::new(),
            pending: VecDeque::new(),
            next_id: 1,
            elapsed: Duration::ZERO,
        }
    }

    /// Start `task` under `key`. It is first advanced on the next
    /// [`advance`](Scheduler::advance).
    pub fn start(&mut self, key: K, task: TimedTask) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let duration_ms = task.duration().as_millis() as u64;
        tracing::trace!(task = %id, duration_ms, "task started");
        self.tasks.insert(id, Entry { key, task });
        id
    }

    /// Cancel a task. Any of its events not yet polled are discarded.
    ///
    /// Returns `true` if the task was still running or still had events
    /// waiting to be polled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let was_running = self.tasks.shift_remove(&id).is_some();
        let before = self.pending.len();
        self.pending.retain(|event| event.id != id);
        let had_pending = self.pending.len() != before;
        if was_running || had_pending {
            tracing::trace!(task = %id, "task cancelled");
        }
        was_running || had_pending
    }

    /// Cancel every task whose key matches `pred`. Returns how many were
    /// cancelled.
    pub fn cancel_where(&mut self, pred: impl Fn(&K) -> bool) -> usize {
        let doomed: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, entry)| pred(&entry.key))
            .map(|(id, _)| *id)
            .chain(
                self.pending
                    .iter()
                    .filter(|event| pred(&event.key))
                    .map(|event| event.id),
            )
            .collect();
        let mut cancelled = 0;
        for id in doomed {
            if self.cancel(id) {
                cancelled += 1;
            }
        }
        cancelled
    }

    /// Advance every running task by `dt`, in start order, queueing the
    /// resulting events. Finished tasks are removed.
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
        let pending = &mut self.pending;
        self.tasks.retain(|&id, entry| match entry.task.advance(dt) {
            TaskStep::Idle => true,
            TaskStep::Progress(t) => {
                pending.push_back(TaskEvent {
                    id,
                    key: entry.key,
                    kind: TaskEventKind::Progress(t),
                });
                true
            }
            TaskStep::Finished => {
                pending.push_back(TaskEvent {
                    id,
                    key: entry.key,
                    kind: TaskEventKind::Progress(1.0),
                });
                pending.push_back(TaskEvent {
                    id,
                    key: entry.key,
                    kind: TaskEventKind::Completed,
                });
                false
            }
        });
    }

    /// Take the next queued event.
    pub fn poll_event(&mut self) -> Option<TaskEvent<K>> {
        self.pending.pop_front()
    }

    /// Whether the task is still running (not finished, not cancelled).
    pub fn is_running(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    /// Progress of a running task.
    pub fn progress(&self, id: TaskId) -> Option<f32> {
        self.tasks.get(&id).map(|entry| entry.task.progress())
    }

    /// Number of running tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no task is running.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of events waiting to be polled.
    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    /// Total time advanced since creation.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Keys of running tasks, in start order.
    pub fn running_keys(&self) -> impl Iterator<Item = (TaskId, K)> + '_ {
        self.tasks.iter().map(|(id, entry)| (*id, entry.key))
    }
}

impl<K: Copy> Default for Scheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for Scheduler<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("running", &self.tasks.len())
            .field("pending_events", &self.pending.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
