//! Pieces: the pooled units a tree is stacked from.

use grove_core::math::lerp_unclamped;
use grove_core::{Curve, Vec3};
use grove_pool::{Handle, Poolable};
use grove_task::TaskSlot;

use crate::config::PieceConfig;
use crate::tree::TreeHandle;

/// Handle to a pooled [`Piece`].
pub type PieceHandle = Handle<Piece>;

/// Which material the renderer should draw a piece with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Material {
    /// Opaque stack material.
    #[default]
    Default,
    /// Transparent-capable material used while fading out.
    Fade,
}

/// Everything a renderer needs to draw one piece.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieceVisual {
    /// Local scale.
    pub scale: Vec3,
    /// Opacity in [0, 1].
    pub alpha: f32,
    /// Material selector.
    pub material: Material,
    /// Rotation about the vertical axis in quarter turns (0..=3).
    pub yaw_quarter_turns: u8,
    /// Height in the stack, in piece units from the trunk base.
    pub height: f32,
}

impl PieceVisual {
    /// Yaw in degrees.
    pub fn yaw_degrees(&self) -> f32 {
        f32::from(self.yaw_quarter_turns) * 90.0
    }
}

impl Default for PieceVisual {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            alpha: 1.0,
            material: Material::Default,
            yaw_quarter_turns: 0,
            height: 0.0,
        }
    }
}

/// One stackable piece.
///
/// A piece belongs to at most one tree. Removing it from the tree
/// detaches it and starts its fade; the fade's completion returns it to
/// the pool, and the next acquire restores its resting appearance.
#[derive(Debug)]
pub struct Piece {
    rest: PieceVisual,
    visual: PieceVisual,
    parent: Option<TreeHandle>,
    pub(crate) fade: TaskSlot,
}

impl Piece {
    /// Current appearance.
    pub fn visual(&self) -> &PieceVisual {
        &self.visual
    }

    /// The tree this piece is stacked in, if any. Fading pieces have none.
    pub fn parent(&self) -> Option<TreeHandle> {
        self.parent
    }

    /// Whether the fade-out is running.
    pub fn is_fading(&self) -> bool {
        self.fade.is_active()
    }

    pub(crate) fn attach(&mut self, tree: TreeHandle, height: f32, yaw_quarter_turns: u8) {
        self.parent = Some(tree);
        self.visual.scale = Vec3::ONE;
        self.visual.height = height;
        self.visual.yaw_quarter_turns = yaw_quarter_turns % 4;
    }

    /// Detach from the tree and switch to the fade material.
    pub(crate) fn begin_fade(&mut self) {
        self.parent = None;
        self.visual.material = Material::Fade;
    }

    pub(crate) fn apply_fade(&mut self, t: f32, config: &PieceConfig) {
        let shrink = config.destroy_curve.evaluate(t);
        self.visual.scale = Vec3::ONE.lerp_unclamped(config.destroy_target_scale, shrink);
        self.visual.alpha = lerp_unclamped(1.0, 0.0, t.clamp(0.0, 1.0));
    }
}

impl Poolable for Piece {
    type Prototype = PieceVisual;

    fn instantiate(rest: &PieceVisual) -> Self {
        Self {
            rest: *rest,
            visual: *rest,
            parent: None,
            fade: TaskSlot::new(),
        }
    }

    fn on_acquire(&mut self) {
        self.visual = self.rest;
        self.fade = TaskSlot::new();
    }

    fn on_release(&mut self) {
        self.parent = None;
        self.fade = TaskSlot::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_pool::Pool;

    #[test]
    fn fade_reaches_target_and_transparency() {
        let cfg = PieceConfig::default();
        let mut piece = Piece::instantiate(&PieceVisual::default());
        piece.begin_fade();
        piece.apply_fade(1.0, &cfg);
        assert_eq!(piece.visual().alpha, 0.0);
        assert_eq!(piece.visual().scale, cfg.destroy_target_scale);
        assert_eq!(piece.visual().material, Material::Fade);
    }

    #[test]
    fn reacquire_restores_resting_appearance() {
        let mut pool: Pool<Piece> = Pool::new(PieceVisual::default(), 1);
        let h = pool.acquire();
        {
            let piece = pool.get_mut(h).unwrap();
            piece.begin_fade();
            piece.apply_fade(0.5, &PieceConfig::default());
        }
        pool.release(h).unwrap();
        let h = pool.acquire();
        let piece = pool.get(h).unwrap();
        assert_eq!(*piece.visual(), PieceVisual::default());
        assert_eq!(piece.parent(), None);
    }

    #[test]
    fn yaw_is_a_multiple_of_ninety() {
        let mut piece = Piece::instantiate(&PieceVisual::default());
        let mut trees: Pool<crate::tree::Tree> = Pool::new((), 0);
        let tree = trees.acquire();
        piece.attach(tree, 2.0, 3);
        assert_eq!(piece.visual().yaw_degrees(), 270.0);
        assert_eq!(piece.visual().height, 2.0);
        assert_eq!(piece.parent(), Some(tree));
    }
}
