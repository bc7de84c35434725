//! The pools and the scheduler, plus the tree and piece operations that
//! need all three.
//!
//! Every task a stage starts is keyed by a [`TaskKey`] naming its owner.
//! Tasks bound to a tree or piece are cancelled before that object goes
//! back to its pool, so no event ever reaches a recycled instance.

use std::time::Duration;

use grove_core::{RandomSource, Vec3};
use grove_pool::Pool;
use grove_task::{Scheduler, TaskEvent, TaskEventKind, TimedTask};
use smallvec::SmallVec;

use crate::config::{PieceConfig, PoolConfig, TreeConfig};
use crate::error::GameError;
use crate::piece::{Piece, PieceHandle, PieceVisual};
use crate::tree::{GrowStyle, RemoveOutcome, Tree, TreeHandle};

/// Owner of a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskKey {
    /// A tree's spawn animation.
    Grow(TreeHandle),
    /// A tree settling after a removal.
    Collapse(TreeHandle),
    /// A removed piece fading out.
    PieceFade(PieceHandle),
    /// The camera moving to the current tree.
    View,
    /// The feedback banner's hide timer.
    Banner,
}

/// Something a stage task finished that the controller sequences on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StageSignal {
    /// A tree's collapse task completed.
    CollapseFinished(TreeHandle),
}

type Leftovers = SmallVec<[PieceHandle; 8]>;

/// Piece pool, tree pool and scheduler.
#[derive(Debug)]
pub struct Stage {
    pieces: Pool<Piece>,
    trees: Pool<Tree>,
    scheduler: Scheduler<TaskKey>,
    tree_config: TreeConfig,
    piece_config: PieceConfig,
}

impl Stage {
    /// Create a stage. The pools build their inventories on first use.
    pub fn new(tree_config: TreeConfig, piece_config: PieceConfig, pools: &PoolConfig) -> Self {
        Self {
            pieces: Pool::new(PieceVisual::default(), pools.min_pieces),
            trees: Pool::new((), pools.min_trees),
            scheduler: Scheduler::new(),
            tree_config,
            piece_config,
        }
    }

    /// The piece pool.
    pub fn pieces(&self) -> &Pool<Piece> {
        &self.pieces
    }

    /// The tree pool.
    pub fn trees(&self) -> &Pool<Tree> {
        &self.trees
    }

    /// The task scheduler.
    pub fn scheduler(&self) -> &Scheduler<TaskKey> {
        &self.scheduler
    }

    pub(crate) fn scheduler_mut(&mut self) -> &mut Scheduler<TaskKey> {
        &mut self.scheduler
    }

    /// Borrow a live piece.
    pub fn piece(&self, handle: PieceHandle) -> Option<&Piece> {
        self.pieces.get(handle)
    }

    /// Borrow a live tree.
    pub fn tree(&self, handle: TreeHandle) -> Option<&Tree> {
        self.trees.get(handle)
    }

    /// Tree settings in effect.
    pub fn tree_config(&self) -> &TreeConfig {
        &self.tree_config
    }

    /// Grow duration, which the camera waits out before moving.
    pub fn grow_duration(&self) -> Duration {
        self.tree_config.grow_duration
    }

    /// Take a tree from the pool and place it.
    pub fn acquire_tree(&mut self, position: Vec3) -> TreeHandle {
        let handle = self.trees.acquire();
        if let Some(tree) = self.trees.get_mut(handle) {
            tree.place(position);
        }
        handle
    }

    /// Generate with a size drawn from the configured inclusive range.
    ///
    /// # Errors
    ///
    /// Fails if the handle is not a live tree.
    pub fn generate_random(
        &mut self,
        handle: TreeHandle,
        rng: &mut dyn RandomSource,
    ) -> Result<GrowStyle, GameError> {
        let (min, max) = (self.tree_config.min_pieces, self.tree_config.max_pieces);
        let drawn = rng.range_int(
            i32::try_from(min).unwrap_or(i32::MAX),
            i32::try_from(max).unwrap_or(i32::MAX),
        );
        let size = usize::try_from(drawn).unwrap_or(0);
        self.generate(handle, size, rng)
    }

    /// Stack `size` fresh pieces in the tree and start a randomly chosen
    /// spawn animation.
    ///
    /// Pieces left over from a previous generation go straight back to
    /// the pool without animating. Each new piece gets a random yaw that
    /// is a whole number of quarter turns.
    ///
    /// # Errors
    ///
    /// Fails if the handle is not a live tree.
    pub fn generate(
        &mut self,
        handle: TreeHandle,
        size: usize,
        rng: &mut dyn RandomSource,
    ) -> Result<GrowStyle, GameError> {
        let tree = self.trees.try_get_mut(handle)?;
        tree.grow.cancel(&mut self.scheduler);
        tree.collapse.cancel(&mut self.scheduler);
        let leftovers: Leftovers = tree.reset_stack().collect();
        for piece in leftovers {
            self.release_piece(piece)?;
        }

        for i in 0..size {
            let piece = self.pieces.acquire();
            let yaw = u8::try_from(rng.range_int(0, 3)).unwrap_or(0);
            if let Some(p) = self.pieces.get_mut(piece) {
                p.attach(handle, i as f32, yaw);
            }
            self.trees.try_get_mut(handle)?.push_top(piece);
        }

        let style = GrowStyle::from_index(rng.range_int(0, 2));
        let task = TimedTask::new(self.tree_config.grow_duration)?;
        let tree = self.trees.try_get_mut(handle)?;
        tree.begin_growth(style, &self.tree_config);
        tree.grow.start(&mut self.scheduler, TaskKey::Grow(handle), task);
        tracing::debug!(tree = ?handle, size, ?style, "tree generated");
        Ok(style)
    }

    /// Remove the bottom piece: start its fade and the tree's collapse.
    ///
    /// Removing from an empty tree is a no-op. The last piece yields
    /// [`RemoveOutcome::Destroyed`], after both tasks have been started.
    ///
    /// # Errors
    ///
    /// Fails if the handle is not a live tree.
    pub fn remove_bottom(&mut self, handle: TreeHandle) -> Result<RemoveOutcome, GameError> {
        let collapse = TimedTask::new(self.tree_config.collapse_duration)?;
        let tree = self.trees.try_get_mut(handle)?;
        if tree.is_empty() {
            return Ok(RemoveOutcome::Empty);
        }
        // Growth and collapse both drive the trunk offset; settle growth first.
        if tree.grow.cancel(&mut self.scheduler) {
            tree.apply_grow(1.0, &self.tree_config);
            tree.finish_growth();
        }
        let Some((piece, last)) = tree.take_bottom() else {
            return Ok(RemoveOutcome::Empty);
        };
        tree.collapse.start(&mut self.scheduler, TaskKey::Collapse(handle), collapse);
        let remaining = tree.len();
        self.destroy_piece(piece)?;

        tracing::trace!(tree = ?handle, remaining, "piece removed");
        if last {
            tracing::debug!(tree = ?handle, "tree destroyed");
            Ok(RemoveOutcome::Destroyed { piece })
        } else {
            Ok(RemoveOutcome::Removed { piece, remaining })
        }
    }

    /// Detach a piece and start its fade. The piece returns to the pool
    /// when the fade completes.
    ///
    /// # Errors
    ///
    /// Fails if the handle is not a live piece.
    pub fn destroy_piece(&mut self, handle: PieceHandle) -> Result<(), GameError> {
        let task = TimedTask::new(self.piece_config.destroy_duration)?;
        let piece = self.pieces.try_get_mut(handle)?;
        piece.begin_fade();
        piece
            .fade
            .start(&mut self.scheduler, TaskKey::PieceFade(handle), task);
        Ok(())
    }

    /// Return a tree and its stacked pieces to their pools at once: no
    /// animation, no destroyed notification.
    ///
    /// # Errors
    ///
    /// Fails if the handle is not a live tree.
    pub fn teardown(&mut self, handle: TreeHandle) -> Result<(), GameError> {
        let tree = self.trees.try_get_mut(handle)?;
        tree.grow.cancel(&mut self.scheduler);
        tree.collapse.cancel(&mut self.scheduler);
        let leftovers: Leftovers = tree.reset_stack().collect();
        let count = leftovers.len();
        for piece in leftovers {
            self.release_piece(piece)?;
        }
        self.trees.release(handle)?;
        tracing::debug!(tree = ?handle, pieces = count, "tree torn down");
        Ok(())
    }

    /// Apply a tree or piece task event.
    ///
    /// Events for tasks that are no longer the owner's current task are
    /// ignored.
    pub(crate) fn apply(
        &mut self,
        event: TaskEvent<TaskKey>,
    ) -> Result<Option<StageSignal>, GameError> {
        match event.key {
            TaskKey::Grow(handle) => {
                let Some(tree) = self.trees.get_mut(handle) else {
                    return Ok(None);
                };
                if !tree.grow.is(event.id) {
                    return Ok(None);
                }
                match event.kind {
                    TaskEventKind::Progress(t) => tree.apply_grow(t, &self.tree_config),
                    TaskEventKind::Completed => {
                        tree.grow.finish(event.id);
                        tree.finish_growth();
                    }
                }
                Ok(None)
            }
            TaskKey::Collapse(handle) => {
                let Some(tree) = self.trees.get_mut(handle) else {
                    return Ok(None);
                };
                if !tree.collapse.is(event.id) {
                    return Ok(None);
                }
                match event.kind {
                    TaskEventKind::Progress(t) => {
                        tree.apply_collapse(t, &self.tree_config);
                        Ok(None)
                    }
                    TaskEventKind::Completed => {
                        tree.collapse.finish(event.id);
                        tree.finish_collapse();
                        Ok(Some(StageSignal::CollapseFinished(handle)))
                    }
                }
            }
            TaskKey::PieceFade(handle) => {
                let Some(piece) = self.pieces.get_mut(handle) else {
                    return Ok(None);
                };
                if !piece.fade.is(event.id) {
                    return Ok(None);
                }
                match event.kind {
                    TaskEventKind::Progress(t) => piece.apply_fade(t, &self.piece_config),
                    TaskEventKind::Completed => {
                        piece.fade.finish(event.id);
                        self.pieces.release(handle)?;
                    }
                }
                Ok(None)
            }
            TaskKey::View | TaskKey::Banner => Ok(None),
        }
    }

    fn release_piece(&mut self, handle: PieceHandle) -> Result<(), GameError> {
        if let Some(piece) = self.pieces.get_mut(handle) {
            piece.fade.cancel(&mut self.scheduler);
        }
        self.pieces.release(handle)?;
        Ok(())
    }
}
