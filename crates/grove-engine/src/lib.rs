//! Tree, piece and round lifecycle for the grove stacking game.
//!
//! [`Game`] is the controller. It owns a [`Stage`] (the piece pool, the
//! tree pool and the task scheduler) and sequences trees through rounds.
//! The caller drives it with [`Game::tick`] once per frame and reads
//! [`GameEvent`]s back with [`Game::drain_events`].
//!
//! # Lifecycle
//!
//! ```text
//! start_round ─► generate_new_tree ─► grow ─► view transition ─► Play
//!                      ▲                                          │
//!                      │               remove_piece ◄─────────────┘
//!                      │                   │
//!                      │        ┌──────────┴──────────┐
//!                      │   pieces remain         last piece
//!                      │        │                     │
//!                      │   collapse ─► Play      TreeDestroyed
//!                      └──────────────────────────────┘
//! ```
//!
//! When the round's tree budget is spent, `generate_new_tree` reports
//! [`GameEvent::RoundFinished`] and starts the next round itself.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod events;
pub mod feedback;
pub mod game;
pub mod piece;
pub mod stage;
pub mod tree;

pub use config::{GameConfig, PieceConfig, PoolConfig, RoundConfig, TreeConfig, ViewConfig};
pub use error::GameError;
pub use events::{GameEvent, PlayState};
pub use feedback::Banner;
pub use game::{Game, Removal};
pub use piece::{Material, Piece, PieceHandle, PieceVisual};
pub use stage::{Stage, TaskKey};
pub use tree::{GrowStyle, RemoveOutcome, Tree, TreeHandle, TreeState, TrunkVisual};
