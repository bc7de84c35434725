//! Easing curves.
//!
//! A [`Curve`] maps normalized progress `t` in [0, 1] to an interpolation
//! factor. Input is clamped; output is not, so overshooting curves such
//! as [`ease_out_back`] deliberately return values above 1 near the end.
//! Every curve maps 0 to 0 and 1 to 1, which keeps the final `t = 1`
//! progress call of a task landing exactly on the target state.

/// Easing function signature: maps `t` in [0, 1] to an interpolation factor.
pub type EasingFn = fn(f32) -> f32;

/// Anything that can shape a progress value.
pub trait Curve {
    /// Evaluate the curve at `t`.
    fn evaluate(&self, t: f32) -> f32;
}

impl Curve for EasingFn {
    fn evaluate(&self, t: f32) -> f32 {
        self(t)
    }
}

/// Overshoot amount for the back curves (the common 10% overshoot).
const BACK_OVERSHOOT: f32 = 1.701_58;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in (slow start).
#[inline]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out (slow start and end).
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Ease-out that overshoots the target and settles back.
#[inline]
pub fn ease_out_back(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let c3 = BACK_OVERSHOOT + 1.0;
    let u = t - 1.0;
    1.0 + c3 * u.powi(3) + BACK_OVERSHOOT * u.powi(2)
}

/// Scale-in that bounces past full size twice before settling.
#[inline]
pub fn pop_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t == 0.0 || t == 1.0 {
        return t;
    }
    let period = 2.0 * std::f32::consts::PI / 3.0;
    2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * period).sin() + 1.0
}

/// Named curve selector, as stored in configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CurveKind {
    /// [`linear`].
    #[default]
    Linear,
    /// [`ease_in`].
    EaseIn,
    /// [`ease_out`].
    EaseOut,
    /// [`ease_in_out`].
    EaseInOut,
    /// [`ease_out_back`].
    EaseOutBack,
    /// [`pop_out`].
    PopOut,
}

impl CurveKind {
    /// Every selector, in declaration order.
    pub const ALL: [CurveKind; 6] = [
        CurveKind::Linear,
        CurveKind::EaseIn,
        CurveKind::EaseOut,
        CurveKind::EaseInOut,
        CurveKind::EaseOutBack,
        CurveKind::PopOut,
    ];

    /// The easing function this selector names.
    pub fn easing(self) -> EasingFn {
        match self {
            CurveKind::Linear => linear,
            CurveKind::EaseIn => ease_in,
            CurveKind::EaseOut => ease_out,
            CurveKind::EaseInOut => ease_in_out,
            CurveKind::EaseOutBack => ease_out_back,
            CurveKind::PopOut => pop_out,
        }
    }
}

impl Curve for CurveKind {
    fn evaluate(&self, t: f32) -> f32 {
        (self.easing())(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn every_curve_pins_its_endpoints() {
        for kind in CurveKind::ALL {
            assert!(kind.evaluate(0.0).abs() < 1e-5, "{kind:?} at 0");
            assert!((kind.evaluate(1.0) - 1.0).abs() < 1e-5, "{kind:?} at 1");
        }
    }

    #[test]
    fn back_curve_overshoots() {
        let peak = (1..100)
            .map(|i| ease_out_back(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.05, "peak {peak}");
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(linear(-3.0), 0.0);
        assert_eq!(linear(4.0), 1.0);
        assert!((CurveKind::EaseOutBack.evaluate(2.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn fn_pointer_is_a_curve() {
        let f: EasingFn = ease_in;
        assert!((f.evaluate(0.5) - 0.25).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn monotone_curves_do_not_decrease(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let monotone = [
                CurveKind::Linear,
                CurveKind::EaseIn,
                CurveKind::EaseOut,
                CurveKind::EaseInOut,
            ];
            for kind in monotone {
                prop_assert!(kind.evaluate(lo) <= kind.evaluate(hi) + 1e-6);
            }
        }
    }
}
