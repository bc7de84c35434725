//! Grove: the lifecycle and timing core of a stacking game.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all grove sub-crates. For most users, adding `grove` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use grove::prelude::*;
//! use std::time::Duration;
//!
//! let mut config = GameConfig::default();
//! config.tree.min_pieces = 2;
//! config.tree.max_pieces = 2;
//! let mut game = Game::new(config).unwrap();
//! game.start_round().unwrap();
//!
//! // The new tree grows and the camera moves; input waits for both.
//! assert_eq!(game.state(), PlayState::Wait);
//! while game.state() == PlayState::Wait {
//!     game.tick(Duration::from_millis(16)).unwrap();
//! }
//! assert_eq!(game.remove_piece().unwrap(), Removal::Removed { remaining: 1 });
//!
//! let events = game.drain_events();
//! assert!(events.iter().any(|e| matches!(e, GameEvent::PieceRemoved { .. })));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `grove-core` | IDs, `Vec3`, curves, random sources, errors |
//! | [`pool`] | `grove-pool` | Generic object pool and generational handles |
//! | [`task`] | `grove-task` | Timed tasks, the scheduler and task slots |
//! | [`engine`] | `grove-engine` | Pieces, trees, the round controller |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`grove-core`).
///
/// Contains [`types::Vec3`], the easing curves, the
/// [`types::RandomSource`] contract and the shared error types.
pub use grove_core as types;

/// Object pooling (`grove-pool`).
///
/// [`pool::Pool`] hands out [`pool::Handle`]s to anything implementing
/// [`pool::Poolable`].
pub use grove_pool as pool;

/// Cooperative timed tasks (`grove-task`).
///
/// [`task::TimedTask`] runs inside a [`task::Scheduler`]; owners keep one
/// task per purpose in a [`task::TaskSlot`].
pub use grove_task as task;

/// The game itself (`grove-engine`).
///
/// [`engine::Game`] sequences trees through rounds; [`engine::Stage`]
/// owns the pools and the scheduler.
pub use grove_engine as engine;

/// Common imports for typical grove usage.
///
/// ```rust
/// use grove::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use grove_core::{Curve, CurveKind, RandomSource, RoundNumber, SeededRandom, Vec3};

    // Errors
    pub use grove_core::{ConfigError, PoolError};

    // Pool
    pub use grove_pool::{Handle, Pool, Poolable};

    // Tasks
    pub use grove_task::{Scheduler, TaskEvent, TaskEventKind, TaskSlot, TimedTask};

    // Engine
    pub use grove_engine::{
        Game, GameConfig, GameError, GameEvent, PieceHandle, PlayState, Removal, TreeHandle,
    };
}
