//! Cooperative, cancellable timed tasks.
//!
//! A [`TimedTask`] advances a normalized progress value from 0 to 1 over a
//! fixed duration, optionally after a leading delay. Tasks run inside a
//! [`Scheduler`], which the owner advances once per frame with the frame's
//! elapsed time and then drains for [`TaskEvent`]s.
//!
//! # Ordering
//!
//! ```text
//! advance(dt) ── for each task, in start order ──► pending events
//!                                                   │
//! poll_event() ◄────────────────────────────────────┘
//! ```
//!
//! - Events within one advance are queued in task-start order.
//! - A finishing task queues `Progress(1.0)` and then `Completed`, both
//!   exactly once.
//! - Tasks started while events are being drained are not advanced until
//!   the next [`Scheduler::advance`], so a continuation always observes
//!   its predecessor's final progress first.
//! - [`Scheduler::cancel`] drops the task *and* any of its events still
//!   waiting to be polled. A cancelled task produces nothing further.
//!
//! Owners keep at most one task per purpose in a [`TaskSlot`]; starting a
//! task through a slot cancels whatever the slot held before.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod scheduler;
pub mod slot;
pub mod task;

pub use scheduler::{Scheduler, TaskEvent, TaskEventKind};
pub use slot::TaskSlot;
pub use task::{TaskPhase, TaskStep, TimedTask};
