//! Notifications the controller queues for its caller.

use std::fmt;

use grove_core::{RoundNumber, Vec3};

use crate::tree::{GrowStyle, TreeHandle};

/// Whether the controller accepts piece removal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlayState {
    /// Removal accepted.
    #[default]
    Play,
    /// A transition is running; removal is rejected.
    Wait,
}

impl fmt::Display for PlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Play => f.write_str("play"),
            Self::Wait => f.write_str("wait"),
        }
    }
}

/// Something that happened inside [`Game`](crate::Game).
///
/// Events are queued in the order they occur and handed out by
/// [`Game::drain_events`](crate::Game::drain_events).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    /// A round began with a freshly drawn tree budget.
    RoundStarted {
        /// The new round.
        round: RoundNumber,
        /// Trees in this round.
        trees: u32,
    },
    /// A tree was generated and became current.
    TreeSpawned {
        /// The new tree.
        tree: TreeHandle,
        /// Where it stands.
        position: Vec3,
        /// How many pieces it holds.
        pieces: usize,
        /// Its spawn animation.
        style: GrowStyle,
    },
    /// The current tree lost its bottom piece.
    PieceRemoved {
        /// The tree.
        tree: TreeHandle,
        /// Pieces still stacked.
        remaining: usize,
    },
    /// The current tree lost its last piece.
    TreeDestroyed {
        /// The tree.
        tree: TreeHandle,
    },
    /// The round's tree budget ran out.
    RoundFinished {
        /// The round that ended.
        round: RoundNumber,
    },
    /// The controller switched between play and wait.
    StateChanged {
        /// Previous state.
        from: PlayState,
        /// New state.
        to: PlayState,
    },
    /// A removal request arrived outside play and was ignored.
    InputRejected {
        /// State at the time.
        state: PlayState,
    },
    /// The feedback banner appeared.
    FeedbackShown {
        /// Banner text.
        text: &'static str,
    },
    /// The feedback banner timed out.
    FeedbackHidden,
}
