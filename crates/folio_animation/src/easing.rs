//! Easing curves
//!
//! All curves map normalized progress 0.0 - 1.0 onto eased progress and hit
//! both endpoints exactly.

use crate::spring::SpringCurve;

/// Easing applied to an entrance transition
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    Linear,
    /// Fast start, slow end
    #[default]
    EaseOutCubic,
    /// Slow start, slow end
    EaseInOutCubic,
    /// Spring-shaped curve sampled over its own duration
    Spring(SpringCurve),
}

impl Easing {
    /// Spring easing that settles within `duration_ms`
    pub fn spring(duration_ms: u32, bounce: f32) -> Self {
        Easing::Spring(SpringCurve::with_bounce(duration_ms, bounce))
    }

    /// Apply the curve to normalized progress
    pub fn apply(&self, t: f32) -> f32 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::Spring(curve) => curve.sample(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_exact() {
        let curves = [
            Easing::Linear,
            Easing::EaseOutCubic,
            Easing::EaseInOutCubic,
            Easing::spring(500, 0.1),
        ];

        for easing in curves {
            assert_eq!(easing.apply(0.0), 0.0, "{:?}", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?}", easing);
            assert_eq!(easing.apply(f32::NAN), 0.0, "{:?}", easing);
        }
    }

    #[test]
    fn test_ease_out_is_front_loaded() {
        assert!(Easing::EaseOutCubic.apply(0.5) > 0.5);
        assert!((Easing::EaseInOutCubic.apply(0.5) - 0.5).abs() < 1e-6);
    }
}
