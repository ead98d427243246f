//! Entrance motion values
//!
//! A reveal animates two properties: opacity and vertical translation. The
//! resting ("settled") keyframe is fully opaque with no offset; an entrance
//! starts from a configured keyframe and eases toward it.

use folio_animation::Easing;

use crate::visibility::Threshold;

/// Visual properties driven by a reveal
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionKeyframe {
    /// Opacity (0.0 - 1.0)
    pub opacity: f32,
    /// Vertical offset from the layout position (px, positive = lower)
    pub translate_y: f32,
}

impl MotionKeyframe {
    /// Final resting state: fully visible, no offset
    pub const SETTLED: MotionKeyframe = MotionKeyframe {
        opacity: 1.0,
        translate_y: 0.0,
    };

    /// Transparent and pushed down by `px`
    pub fn rise(px: f32) -> Self {
        Self {
            opacity: 0.0,
            translate_y: px,
        }
    }

    /// Transparent without offset
    pub fn hidden() -> Self {
        Self::rise(0.0)
    }

    /// Interpolate toward `to`
    ///
    /// `t` may leave 0..1 when a spring overshoots; translation follows it,
    /// opacity stays clamped.
    pub fn lerp(&self, to: &MotionKeyframe, t: f32) -> Self {
        Self {
            opacity: (self.opacity + (to.opacity - self.opacity) * t).clamp(0.0, 1.0),
            translate_y: self.translate_y + (to.translate_y - self.translate_y) * t,
        }
    }

    /// Snap to the resting state
    pub fn settle(&mut self) {
        *self = Self::SETTLED;
    }

    pub fn is_settled(&self) -> bool {
        *self == Self::SETTLED
    }
}

impl Default for MotionKeyframe {
    fn default() -> Self {
        Self::SETTLED
    }
}

/// What starts a group's entrance
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RevealTrigger {
    /// First frame after registration
    OnMount,
    /// First time the item's visible fraction reaches the threshold
    InView(Threshold),
}

impl RevealTrigger {
    /// Threshold recorded on items of this trigger kind
    pub fn threshold(&self) -> Threshold {
        match self {
            RevealTrigger::OnMount => Threshold::IMMEDIATE,
            RevealTrigger::InView(threshold) => *threshold,
        }
    }
}

impl Default for RevealTrigger {
    fn default() -> Self {
        RevealTrigger::InView(Threshold::default())
    }
}

/// Entrance transition of a single item
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealTransition {
    /// Starting keyframe, also shown while the item is pending or delayed
    ///
    /// Content waiting for its trigger rests here (transparent, offset),
    /// never at the settled keyframe.
    pub from: MotionKeyframe,
    pub duration_ms: u32,
    pub easing: Easing,
}

impl RevealTransition {
    pub fn new(from: MotionKeyframe, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from,
            duration_ms,
            easing,
        }
    }

    /// Rise by `px` while fading in
    pub fn rise(px: f32, duration_ms: u32, easing: Easing) -> Self {
        Self::new(MotionKeyframe::rise(px), duration_ms, easing)
    }

    /// Opacity-only fade
    pub fn fade(duration_ms: u32, easing: Easing) -> Self {
        Self::new(MotionKeyframe::hidden(), duration_ms, easing)
    }

    /// Values at normalized progress (0.0 - 1.0)
    pub fn value_at(&self, progress: f32) -> MotionKeyframe {
        if progress >= 1.0 {
            return MotionKeyframe::SETTLED;
        }
        self.from.lerp(&MotionKeyframe::SETTLED, self.easing.apply(progress))
    }
}

impl Default for RevealTransition {
    fn default() -> Self {
        Self::rise(24.0, 300, Easing::EaseOutCubic)
    }
}
