//! Core types and traits for the grove stacking-game core.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! abstractions shared by the rest of the workspace: identifiers, the
//! small vector type used for positions, easing curves, the random
//! source contract, and the error types for pool and configuration misuse.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod curve;
pub mod error;
pub mod id;
pub mod math;
pub mod random;

pub use curve::{Curve, CurveKind, EasingFn};
pub use error::{ConfigError, PoolError};
pub use id::{PoolId, RoundNumber, TaskId};
pub use math::Vec3;
pub use random::{RandomSource, SeededRandom};
