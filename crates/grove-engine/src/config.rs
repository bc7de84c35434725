//! Game configuration and validation.
//!
//! [`GameConfig`] groups the per-subsystem settings. Nothing is clamped:
//! [`validate()`](GameConfig::validate) rejects bad values up front and
//! [`Game::new`](crate::Game::new) refuses to start with them.

use std::time::Duration;

use grove_core::{ConfigError, CurveKind, Vec3};

// ── Validation helpers ─────────────────────────────────────────────

fn positive(name: &'static str, d: Duration) -> Result<(), ConfigError> {
    if d.is_zero() {
        return Err(ConfigError::NonPositiveDuration { name });
    }
    Ok(())
}

fn inclusive_range(name: &'static str, min: u32, max: u32) -> Result<(), ConfigError> {
    if min == 0 {
        return Err(ConfigError::EmptyRange { name });
    }
    if min > max {
        return Err(ConfigError::InvertedRange { name, min, max });
    }
    Ok(())
}

fn finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { name, value });
    }
    Ok(())
}

fn finite_vec(name: &'static str, v: Vec3) -> Result<(), ConfigError> {
    finite(name, v.x)?;
    finite(name, v.y)?;
    finite(name, v.z)
}

// ── TreeConfig ─────────────────────────────────────────────────────

/// How trees are sized and animated.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeConfig {
    /// Fewest pieces in a generated tree (inclusive). Default: 4.
    pub min_pieces: u32,
    /// Most pieces in a generated tree (inclusive). Default: 8.
    pub max_pieces: u32,
    /// Length of the spawn animation. Default: 600 ms.
    pub grow_duration: Duration,
    /// Length of the collapse after a piece is removed. Default: 250 ms.
    pub collapse_duration: Duration,
    /// Trunk scale curve for the pop-out spawn. Default: [`CurveKind::PopOut`].
    pub pop_curve: CurveKind,
    /// Offset curve for the bouncing slide-in spawn. Default:
    /// [`CurveKind::EaseOutBack`].
    pub slide_curve: CurveKind,
    /// Offset curve for the collapse. Default: [`CurveKind::EaseOut`].
    pub collapse_curve: CurveKind,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            min_pieces: 4,
            max_pieces: 8,
            grow_duration: Duration::from_millis(600),
            collapse_duration: Duration::from_millis(250),
            pop_curve: CurveKind::PopOut,
            slide_curve: CurveKind::EaseOutBack,
            collapse_curve: CurveKind::EaseOut,
        }
    }
}

impl TreeConfig {
    /// Check piece range and durations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        inclusive_range("pieces per tree", self.min_pieces, self.max_pieces)?;
        positive("grow duration", self.grow_duration)?;
        positive("collapse duration", self.collapse_duration)
    }
}

// ── PieceConfig ────────────────────────────────────────────────────

/// How a removed piece fades away.
#[derive(Clone, Debug, PartialEq)]
pub struct PieceConfig {
    /// Length of the fade-and-shrink. Default: 350 ms.
    pub destroy_duration: Duration,
    /// Scale the piece shrinks toward. Default: 0.25 on every axis.
    pub destroy_target_scale: Vec3,
    /// Scale curve for the fade. Default: [`CurveKind::EaseIn`].
    pub destroy_curve: CurveKind,
}

impl Default for PieceConfig {
    fn default() -> Self {
        Self {
            destroy_duration: Duration::from_millis(350),
            destroy_target_scale: Vec3::ONE * 0.25,
            destroy_curve: CurveKind::EaseIn,
        }
    }
}

impl PieceConfig {
    /// Check the fade duration and target.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("piece destroy duration", self.destroy_duration)?;
        finite_vec("destroy target scale", self.destroy_target_scale)
    }
}

// ── RoundConfig ────────────────────────────────────────────────────

/// How many trees make a round and how far apart they stand.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundConfig {
    /// Fewest trees per round (inclusive). Default: 3.
    pub min_trees: u32,
    /// Most trees per round (inclusive). Default: 5.
    pub max_trees: u32,
    /// Step between consecutive trees, applied to both the sideways and
    /// the depth axis. Default: 3.0.
    pub new_tree_distance: f32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            min_trees: 3,
            max_trees: 5,
            new_tree_distance: 3.0,
        }
    }
}

impl RoundConfig {
    /// Check the tree range and spacing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        inclusive_range("trees per round", self.min_trees, self.max_trees)?;
        finite("new tree distance", self.new_tree_distance)
    }
}

// ── ViewConfig ─────────────────────────────────────────────────────

/// Camera framing.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewConfig {
    /// Camera position relative to the tree it frames. The camera starts
    /// here. Default: (0, 6, -10).
    pub camera_offset: Vec3,
    /// Length of the move to a new tree, after its growth. Default: 800 ms.
    pub transition_duration: Duration,
    /// Curve for the move. Default: [`CurveKind::EaseInOut`].
    pub curve: CurveKind,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            camera_offset: Vec3::new(0.0, 6.0, -10.0),
            transition_duration: Duration::from_millis(800),
            curve: CurveKind::EaseInOut,
        }
    }
}

impl ViewConfig {
    /// Check the offset and transition duration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite_vec("camera offset", self.camera_offset)?;
        positive("view transition duration", self.transition_duration)
    }
}

// ── PoolConfig ─────────────────────────────────────────────────────

/// Standing inventory built on first use of each pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Pieces built up front. Default: 16.
    pub min_pieces: usize,
    /// Trees built up front. Default: 2.
    pub min_trees: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_pieces: 16,
            min_trees: 2,
        }
    }
}

// ── GameConfig ─────────────────────────────────────────────────────

/// Everything [`Game::new`](crate::Game::new) needs.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Tree sizing and animation.
    pub tree: TreeConfig,
    /// Piece fade.
    pub piece: PieceConfig,
    /// Round length and tree spacing.
    pub round: RoundConfig,
    /// Camera framing.
    pub view: ViewConfig,
    /// Pool inventories.
    pub pool: PoolConfig,
    /// How long the "Round Finished" banner stays up. Default: 1 s.
    pub banner_duration: Duration,
    /// Seed for the default random source. Default: 0.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tree: TreeConfig::default(),
            piece: PieceConfig::default(),
            round: RoundConfig::default(),
            view: ViewConfig::default(),
            pool: PoolConfig::default(),
            banner_duration: Duration::from_secs(1),
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Check every section. Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tree.validate()?;
        self.piece.validate()?;
        self.round.validate()?;
        self.view.validate()?;
        positive("banner duration", self.banner_duration)
    }
}
