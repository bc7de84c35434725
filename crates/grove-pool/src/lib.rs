//! Generational object pool with FIFO reuse.
//!
//! A [`Pool`] owns every instance it ever constructs. Clients hold
//! [`Handle`]s, never references, so an instance can be recycled without
//! leaving a dangling pointer behind: a handle that outlives its
//! instance's active period is detected as stale by its generation.
//!
//! # Lifecycle
//!
//! ```text
//!             acquire()                     release(h)
//!  inactive ─────────────► active ─────────────────────► inactive
//!  (FIFO queue)            on_acquire()   on_release()   (queue tail)
//!                                          generation += 1
//! ```
//!
//! Every constructed instance is, at all times, either active or queued
//! in the inactive FIFO, never both. The pool grows without bound: an
//! acquire with an empty queue constructs a new instance which stays in
//! the pool for good.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod handle;
pub mod pool;

pub use handle::Handle;
pub use pool::{Pool, Poolable};
