//! The round controller.
//!
//! [`Game`] owns every tree, piece and task. It is single-threaded and
//! driven from outside: call [`tick`](Game::tick) once per frame with the
//! frame's elapsed time, call the three player operations whenever input
//! arrives, and [`drain_events`](Game::drain_events) afterwards.
//!
//! # Gating
//!
//! Removal is accepted only in [`PlayState::Play`]. Every transition the
//! player must wait for switches to [`PlayState::Wait`] when it starts and
//! back to `Play` when it completes:
//!
//! | Transition | Starts | Ends |
//! |---|---|---|
//! | new tree | `generate_new_tree` | view transition completes |
//! | removal | `remove_piece` | collapse of the current tree completes |
//!
//! The view transition is a single delayed task: it waits out the grow
//! animation and then moves the camera.

use std::time::Duration;

use grove_core::{Curve, RandomSource, RoundNumber, SeededRandom, Vec3};
use grove_task::{TaskEvent, TaskEventKind, TaskSlot, TimedTask};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::events::{GameEvent, PlayState};
use crate::feedback::{Banner, ROUND_FINISHED};
use crate::stage::{Stage, StageSignal, TaskKey};
use crate::tree::{RemoveOutcome, TreeHandle};

/// What a [`Game::remove_piece`] call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removal {
    /// The game was waiting on a transition. Nothing changed.
    Rejected,
    /// There was no piece to remove.
    Ignored,
    /// A piece was removed and the tree keeps standing.
    Removed {
        /// Pieces still stacked.
        remaining: usize,
    },
    /// The last piece was removed; the next tree (or round) has started.
    TreeDestroyed,
}

// ── Camera ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
struct Camera {
    position: Vec3,
    offset: Vec3,
    from: Option<Vec3>,
    target: Vec3,
}

impl Camera {
    fn new(offset: Vec3) -> Self {
        Self {
            position: offset,
            offset,
            from: None,
            target: offset,
        }
    }

    /// Aim at a new tree. The start point is taken when the move begins.
    fn aim(&mut self, tree_position: Vec3) {
        self.from = None;
        self.target = tree_position + self.offset;
    }

    fn apply(&mut self, eased: f32) {
        let from = *self.from.get_or_insert(self.position);
        self.position = from.lerp_unclamped(self.target, eased);
    }
}

// ── Game ────────────────────────────────────────────────────────────

/// Round/tree controller.
pub struct Game {
    config: GameConfig,
    stage: Stage,
    rng: Box<dyn RandomSource>,
    state: PlayState,
    round: RoundNumber,
    remaining_trees: u32,
    current: Option<TreeHandle>,
    last_tree_position: Vec3,
    retiring: Vec<TreeHandle>,
    awaiting_collapse: Option<TreeHandle>,
    camera: Camera,
    view: TaskSlot,
    banner: Banner,
    events: Vec<GameEvent>,
}

impl Game {
    /// Create a game seeded from `config.seed`.
    ///
    /// Nothing is spawned until [`start_round`](Game::start_round).
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if the configuration is invalid.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let rng = SeededRandom::new(config.seed);
        Self::with_random(config, rng)
    }

    /// Create a game drawing from `rng` instead of the seeded default.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if the configuration is invalid.
    pub fn with_random(
        config: GameConfig,
        rng: impl RandomSource + 'static,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let stage = Stage::new(config.tree.clone(), config.piece.clone(), &config.pool);
        let camera = Camera::new(config.view.camera_offset);
        Ok(Self {
            config,
            stage,
            rng: Box::new(rng),
            state: PlayState::Play,
            round: RoundNumber::default(),
            remaining_trees: 0,
            current: None,
            last_tree_position: Vec3::ZERO,
            retiring: Vec::new(),
            awaiting_collapse: None,
            camera,
            view: TaskSlot::new(),
            banner: Banner::new(),
            events: Vec::new(),
        })
    }

    // ── Player operations ───────────────────────────────────────────

    /// Tear down the current tree, draw this round's tree budget and
    /// spawn the first tree.
    ///
    /// # Errors
    ///
    /// Propagates pool protocol violations.
    pub fn start_round(&mut self) -> Result<(), GameError> {
        if let Some(tree) = self.current.take() {
            self.last_tree_position = self.tree_position(tree);
            self.stage.teardown(tree)?;
        }
        self.awaiting_collapse = None;

        let (min, max) = (self.config.round.min_trees, self.config.round.max_trees);
        let drawn = self.rng.range_int(
            i32::try_from(min).unwrap_or(i32::MAX),
            i32::try_from(max).unwrap_or(i32::MAX),
        );
        self.remaining_trees = u32::try_from(drawn).unwrap_or(min);
        self.round = self.round.next();
        tracing::info!(round = %self.round, trees = self.remaining_trees, "round started");
        self.events.push(GameEvent::RoundStarted {
            round: self.round,
            trees: self.remaining_trees,
        });
        self.generate_new_tree()
    }

    /// Spawn the next tree of the round, or finish the round if its
    /// budget is spent.
    ///
    /// The previous tree stays in place until the camera has moved off
    /// it, then goes back to the pool.
    ///
    /// # Errors
    ///
    /// Propagates pool protocol violations.
    pub fn generate_new_tree(&mut self) -> Result<(), GameError> {
        self.view.cancel(self.stage.scheduler_mut());
        self.awaiting_collapse = None;

        if self.remaining_trees == 0 {
            return self.finish_round();
        }

        let base = match self.current.take() {
            Some(previous) => {
                let position = self.tree_position(previous);
                self.retiring.push(previous);
                position
            }
            None => self.last_tree_position,
        };
        let side = self.rng.sign() as f32;
        let position = base + Vec3::new(side, 0.0, 1.0) * self.config.round.new_tree_distance;

        let tree = self.stage.acquire_tree(position);
        self.current = Some(tree);
        self.last_tree_position = position;
        let style = self.stage.generate_random(tree, &mut *self.rng)?;
        let pieces = self.stage.tree(tree).map_or(0, |t| t.len());

        let view = TimedTask::new(self.config.view.transition_duration)?
            .with_delay(self.stage.grow_duration());
        self.camera.aim(position);
        self.view.start(self.stage.scheduler_mut(), TaskKey::View, view);
        self.set_state(PlayState::Wait);

        self.remaining_trees -= 1;
        tracing::debug!(
            tree = ?tree,
            pieces,
            remaining = self.remaining_trees,
            "tree spawned"
        );
        self.events.push(GameEvent::TreeSpawned {
            tree,
            position,
            pieces,
            style,
        });
        Ok(())
    }

    /// Remove the current tree's bottom piece.
    ///
    /// Rejected outside [`PlayState::Play`]. Removing the last piece moves
    /// straight on to the next tree.
    ///
    /// # Errors
    ///
    /// Propagates pool protocol violations.
    pub fn remove_piece(&mut self) -> Result<Removal, GameError> {
        if self.state != PlayState::Play {
            tracing::debug!(state = %self.state, "removal rejected");
            self.events.push(GameEvent::InputRejected { state: self.state });
            return Ok(Removal::Rejected);
        }
        let Some(tree) = self.current else {
            return Ok(Removal::Ignored);
        };
        if self.stage.tree(tree).is_none_or(|t| t.is_empty()) {
            return Ok(Removal::Ignored);
        }

        self.set_state(PlayState::Wait);
        match self.stage.remove_bottom(tree)? {
            RemoveOutcome::Empty => {
                self.set_state(PlayState::Play);
                Ok(Removal::Ignored)
            }
            RemoveOutcome::Removed { remaining, .. } => {
                self.awaiting_collapse = Some(tree);
                self.events.push(GameEvent::PieceRemoved { tree, remaining });
                Ok(Removal::Removed { remaining })
            }
            RemoveOutcome::Destroyed { .. } => {
                self.events.push(GameEvent::PieceRemoved { tree, remaining: 0 });
                self.events.push(GameEvent::TreeDestroyed { tree });
                self.generate_new_tree()?;
                Ok(Removal::TreeDestroyed)
            }
        }
    }

    // ── Frame loop ──────────────────────────────────────────────────

    /// Advance every running task by `dt` and apply the results.
    ///
    /// # Errors
    ///
    /// Propagates pool protocol violations.
    pub fn tick(&mut self, dt: Duration) -> Result<(), GameError> {
        self.stage.scheduler_mut().advance(dt);
        while let Some(event) = self.stage.scheduler_mut().poll_event() {
            match event.key {
                TaskKey::View => self.on_view(event)?,
                TaskKey::Banner => {
                    if self.banner.handle(event) {
                        self.events.push(GameEvent::FeedbackHidden);
                    }
                }
                _ => {
                    if let Some(StageSignal::CollapseFinished(tree)) = self.stage.apply(event)? {
                        self.on_collapse_finished(tree);
                    }
                }
            }
        }
        Ok(())
    }

    /// Take every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of queued events.
    pub fn pending_event_count(&self) -> usize {
        self.events.len()
    }

    // ── Read access ─────────────────────────────────────────────────

    /// Whether removal is currently accepted.
    pub fn state(&self) -> PlayState {
        self.state
    }

    /// The current round. Zero before the first [`start_round`](Game::start_round).
    pub fn round(&self) -> RoundNumber {
        self.round
    }

    /// Trees still to spawn in this round.
    pub fn remaining_trees(&self) -> u32 {
        self.remaining_trees
    }

    /// The tree the player is working on.
    pub fn current_tree(&self) -> Option<TreeHandle> {
        self.current
    }

    /// Trees waiting for the camera to move off them before going back
    /// to the pool.
    pub fn retiring_trees(&self) -> &[TreeHandle] {
        &self.retiring
    }

    /// Camera position.
    pub fn camera_position(&self) -> Vec3 {
        self.camera.position
    }

    /// The feedback banner.
    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    /// Pools, scheduler and every live tree and piece.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Configuration in effect.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // ── Internals ───────────────────────────────────────────────────

    fn finish_round(&mut self) -> Result<(), GameError> {
        tracing::info!(round = %self.round, "round finished");
        self.events.push(GameEvent::RoundFinished { round: self.round });
        self.banner.show(
            self.stage.scheduler_mut(),
            ROUND_FINISHED,
            self.config.banner_duration,
        )?;
        self.events.push(GameEvent::FeedbackShown {
            text: ROUND_FINISHED,
        });
        self.start_round()
    }

    fn on_view(&mut self, event: TaskEvent<TaskKey>) -> Result<(), GameError> {
        if !self.view.is(event.id) {
            return Ok(());
        }
        match event.kind {
            TaskEventKind::Progress(t) => {
                self.camera.apply(self.config.view.curve.evaluate(t));
            }
            TaskEventKind::Completed => {
                self.view.finish(event.id);
                for tree in std::mem::take(&mut self.retiring) {
                    self.stage.teardown(tree)?;
                }
                self.set_state(PlayState::Play);
            }
        }
        Ok(())
    }

    fn on_collapse_finished(&mut self, tree: TreeHandle) {
        if self.awaiting_collapse == Some(tree) {
            self.awaiting_collapse = None;
            self.set_state(PlayState::Play);
        }
    }

    fn set_state(&mut self, to: PlayState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        tracing::trace!(%from, %to, "state changed");
        self.events.push(GameEvent::StateChanged { from, to });
    }

    fn tree_position(&self, tree: TreeHandle) -> Vec3 {
        self.stage
            .tree(tree)
            .map_or(self.last_tree_position, |t| t.position())
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("round", &self.round)
            .field("remaining_trees", &self.remaining_trees)
            .field("current", &self.current)
            .field("retiring", &self.retiring.len())
            .field("stage", &self.stage)
            .finish_non_exhaustive()
    }
}
