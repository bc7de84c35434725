//! One task per purpose.

use grove_core::TaskId;

use crate::scheduler::Scheduler;
use crate::task::TimedTask;

/// Holds at most one running task for a single purpose, such as a tree's
/// grow animation or the camera transition.
///
/// Starting a new task through the slot cancels the previous one first,
/// so a superseded task never delivers another event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskSlot {
    current: Option<TaskId>,
}

impl TaskSlot {
    /// An empty slot.
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Cancel the held task, if any, and start `task` in its place.
    pub fn start<K: Copy>(
        &mut self,
        scheduler: &mut Scheduler<K>,
        key: K,
        task: TimedTask,
    ) -> TaskId {
        self.cancel(scheduler);
        let id = scheduler.start(key, task);
        self.current = Some(id);
        id
    }

    /// Cancel the held task. Returns `true` if there was one to cancel.
    pub fn cancel<K: Copy>(&mut self, scheduler: &mut Scheduler<K>) -> bool {
        match self.current.take() {
            Some(id) => scheduler.cancel(id),
            None => false,
        }
    }

    /// The held task.
    pub fn current(&self) -> Option<TaskId> {
        self.current
    }

    /// Whether `id` is the held task. Owners use this to ignore events
    /// from a task they have already replaced.
    pub fn is(&self, id: TaskId) -> bool {
        self.current == Some(id)
    }

    /// Clear the slot after `id` completed. Returns `false` and leaves the
    /// slot alone if `id` is not the held task.
    pub fn finish(&mut self, id: TaskId) -> bool {
        if self.is(id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Whether the slot holds a task.
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::scheduler::TaskEventKind;

    fn task(ms: u64) -> TimedTask {
        TimedTask::new(Duration::from_millis(ms)).unwrap()
    }

    #[test]
    fn restart_cancels_previous() {
        let mut sched = Scheduler::new();
        let mut slot = TaskSlot::new();
        let first = slot.start(&mut sched, "grow", task(100));
        sched.advance(Duration::from_millis(10));
        let second = slot.start(&mut sched, "grow", task(100));

        assert!(!sched.is_running(first));
        assert!(slot.is(second));
        assert_eq!(sched.pending_events(), 0);
        assert_eq!(sched.len(), 1);
    }

    #[test]
    fn finish_only_clears_matching_task() {
        let mut sched = Scheduler::new();
        let mut slot = TaskSlot::new();
        let id = slot.start(&mut sched, (), task(5));
        assert!(!slot.finish(TaskId(id.0 + 100)));
        assert!(slot.is_active());

        sched.advance(Duration::from_millis(5));
        while let Some(event) = sched.poll_event() {
            if event.kind == TaskEventKind::Completed {
                assert!(slot.finish(event.id));
            }
        }
        assert!(!slot.is_active());
        assert!(!slot.cancel(&mut sched));
    }
}
