//! Minimal 3D vector used for tree and camera positions.

use std::ops::{Add, Mul, Neg, Sub};

/// A position or offset in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    /// Left/right.
    pub x: f32,
    /// Up/down.
    pub y: f32,
    /// Depth.
    pub z: f32,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    /// Unit vector along `y`.
    pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    /// All components one.
    pub const ONE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

    /// Construct a vector from its components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Linear interpolation without clamping `t`.
    ///
    /// Overshooting curves feed values outside [0, 1] through here, so
    /// the result may land beyond either endpoint.
    pub fn lerp_unclamped(self, to: Vec3, t: f32) -> Vec3 {
        self + (to - self) * t
    }

    /// Whether all components are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

/// Scalar linear interpolation without clamping `t`.
pub fn lerp_unclamped(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
