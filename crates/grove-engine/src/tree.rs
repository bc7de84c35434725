//! Trees: ordered stacks of pieces.
//!
//! A [`Tree`] is plain pooled data. The operations that also touch the
//! piece pool or the scheduler (generate, remove, teardown) live on
//! [`Stage`](crate::Stage).

use std::collections::VecDeque;

use grove_core::math::lerp_unclamped;
use grove_core::{Curve, Vec3};
use grove_pool::{Handle, Poolable};
use grove_task::TaskSlot;

use crate::config::TreeConfig;
use crate::piece::PieceHandle;

/// Handle to a pooled [`Tree`].
pub type TreeHandle = Handle<Tree>;

/// Spawn animation, picked at random per generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GrowStyle {
    /// The trunk scales up from nothing along the pop curve.
    #[default]
    PopOut,
    /// The trunk rises out of the ground and overshoots before settling.
    SlideBounce,
    /// The trunk rises out of the ground at constant speed.
    SlideLinear,
}

impl GrowStyle {
    /// Every style, in draw order.
    pub const ALL: [GrowStyle; 3] = [
        GrowStyle::PopOut,
        GrowStyle::SlideBounce,
        GrowStyle::SlideLinear,
    ];

    /// Map a draw in `0..=2` to a style. Out-of-range draws clamp.
    pub fn from_index(i: i32) -> Self {
        Self::ALL[i.clamp(0, 2) as usize]
    }
}

/// Where a tree is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TreeState {
    /// Acquired but not generated.
    #[default]
    Empty,
    /// Spawn animation running.
    Growing,
    /// Idle with pieces left.
    Standing,
    /// Settling after a piece was removed.
    Collapsing,
    /// The last piece was removed. Terminal until the next generate.
    Destroyed,
}

/// Trunk transform a renderer applies to every piece of the tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrunkVisual {
    /// Uniform scale.
    pub scale: f32,
    /// Vertical offset in piece units. Negative values sink the stack.
    pub offset: f32,
}

impl Default for TrunkVisual {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: 0.0,
        }
    }
}

/// Result of removing a tree's bottom piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The tree had no pieces. Nothing happened.
    Empty,
    /// A piece was removed and others remain.
    Removed {
        /// The piece now fading out.
        piece: PieceHandle,
        /// Pieces still stacked.
        remaining: usize,
    },
    /// The last piece was removed. Reported once per generation.
    Destroyed {
        /// The piece now fading out.
        piece: PieceHandle,
    },
}

/// An ordered stack of pieces, bottom first.
#[derive(Debug)]
pub struct Tree {
    position: Vec3,
    pieces: VecDeque<PieceHandle>,
    trunk: TrunkVisual,
    style: GrowStyle,
    state: TreeState,
    removed: u32,
    collapse_from: f32,
    destroyed_notified: bool,
    pub(crate) grow: TaskSlot,
    pub(crate) collapse: TaskSlot,
}

impl Tree {
    /// World position of the trunk base.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Stacked pieces, bottom first.
    pub fn pieces(&self) -> impl ExactSizeIterator<Item = PieceHandle> + '_ {
        self.pieces.iter().copied()
    }

    /// Number of stacked pieces.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Whether no piece is stacked.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Bottom piece, the next one [`remove_bottom`](crate::Stage::remove_bottom) takes.
    pub fn bottom(&self) -> Option<PieceHandle> {
        self.pieces.front().copied()
    }

    /// Trunk transform.
    pub fn trunk(&self) -> TrunkVisual {
        self.trunk
    }

    /// Spawn animation chosen by the last generate.
    pub fn grow_style(&self) -> GrowStyle {
        self.style
    }

    /// Lifecycle state.
    pub fn state(&self) -> TreeState {
        self.state
    }

    /// Pieces removed since the last generate.
    pub fn removed(&self) -> u32 {
        self.removed
    }

    pub(crate) fn place(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Forget the previous generation and return its pieces, bottom first.
    pub(crate) fn reset_stack(&mut self) -> impl Iterator<Item = PieceHandle> + '_ {
        self.trunk = TrunkVisual::default();
        self.state = TreeState::Empty;
        self.removed = 0;
        self.collapse_from = 0.0;
        self.destroyed_notified = false;
        self.pieces.drain(..)
    }

    pub(crate) fn push_top(&mut self, piece: PieceHandle) {
        self.pieces.push_back(piece);
    }

    pub(crate) fn begin_growth(&mut self, style: GrowStyle, config: &TreeConfig) {
        self.style = style;
        self.state = TreeState::Growing;
        self.apply_grow(0.0, config);
    }

    pub(crate) fn apply_grow(&mut self, t: f32, config: &TreeConfig) {
        let sunk = -(self.pieces.len() as f32);
        match self.style {
            GrowStyle::PopOut => {
                self.trunk.scale = config.pop_curve.evaluate(t);
                self.trunk.offset = 0.0;
            }
            GrowStyle::SlideBounce => {
                self.trunk.scale = 1.0;
                self.trunk.offset = lerp_unclamped(sunk, 0.0, config.slide_curve.evaluate(t));
            }
            GrowStyle::SlideLinear => {
                self.trunk.scale = 1.0;
                self.trunk.offset = lerp_unclamped(sunk, 0.0, t);
            }
        }
    }

    pub(crate) fn finish_growth(&mut self) {
        if self.state == TreeState::Growing {
            self.state = TreeState::Standing;
        }
    }

    /// Pop the bottom piece and prepare the collapse. Returns the piece
    /// and whether it was the last one, the latter at most once per
    /// generation.
    pub(crate) fn take_bottom(&mut self) -> Option<(PieceHandle, bool)> {
        let piece = self.pieces.pop_front()?;
        self.removed += 1;
        self.collapse_from = self.trunk.offset;
        let last = self.pieces.is_empty() && !self.destroyed_notified;
        if last {
            self.destroyed_notified = true;
            self.state = TreeState::Destroyed;
        } else if !self.pieces.is_empty() {
            self.state = TreeState::Collapsing;
        }
        Some((piece, last))
    }

    pub(crate) fn apply_collapse(&mut self, t: f32, config: &TreeConfig) {
        let target = -(self.removed as f32);
        self.trunk.offset =
            lerp_unclamped(self.collapse_from, target, config.collapse_curve.evaluate(t));
    }

    pub(crate) fn finish_collapse(&mut self) {
        if self.state == TreeState::Collapsing {
            self.state = TreeState::Standing;
        }
    }
}

impl Poolable for Tree {
    type Prototype = ();

    fn instantiate(_: &()) -> Self {
        Self {
            position: Vec3::ZERO,
            pieces: VecDeque::new(),
            trunk: TrunkVisual::default(),
            style: GrowStyle::default(),
            state: TreeState::Empty,
            removed: 0,
            collapse_from: 0.0,
            destroyed_notified: false,
            grow: TaskSlot::new(),
            collapse: TaskSlot::new(),
        }
    }

    fn on_acquire(&mut self) {
        *self = Self::instantiate(&());
    }

    fn on_release(&mut self) {
        self.pieces.clear();
        self.grow = TaskSlot::new();
        self.collapse = TaskSlot::new();
    }
}
