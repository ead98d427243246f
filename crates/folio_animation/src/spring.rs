//! Spring timing curves
//!
//! Closed-form damped harmonic oscillator used as an easing curve over a
//! fixed duration. The curve moves from 0 toward 1 and is pinned to exactly
//! 1 once the duration has elapsed, so a transition always lands on its
//! resting value.

use std::f32::consts::PI;

/// Configuration for a spring
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    /// Create a new spring configuration
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Spring that visually settles within `duration_ms`
    ///
    /// `bounce` of 0 is critically damped; larger values lower the damping
    /// ratio (`1 - bounce`) and allow a small overshoot. Clamped to 0..=0.9.
    pub fn from_bounce(duration_ms: u32, bounce: f32) -> Self {
        let bounce = if bounce.is_finite() {
            bounce.clamp(0.0, 0.9)
        } else {
            0.0
        };
        let duration_s = (duration_ms.max(1) as f32) / 1000.0;
        let omega = 2.0 * PI / duration_s;
        let mass = 1.0;
        let stiffness = omega * omega * mass;
        let damping = 2.0 * (1.0 - bounce) * (stiffness * mass).sqrt();
        Self::new(stiffness, damping, mass)
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Damping ratio (1.0 = critically damped)
    pub fn damping_ratio(&self) -> f32 {
        let critical = self.critical_damping();
        if critical > 0.0 {
            self.damping / critical
        } else {
            1.0
        }
    }

    /// Undamped angular frequency (rad/s)
    pub fn natural_frequency(&self) -> f32 {
        if self.mass > 0.0 {
            (self.stiffness / self.mass).max(0.0).sqrt()
        } else {
            0.0
        }
    }

    /// Displacement toward the target after `t` seconds, starting at rest
    ///
    /// Returns 0.0 at `t = 0` and approaches 1.0 as `t` grows. Damping ratios
    /// at or above 1 use the critically damped solution.
    pub fn displacement(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }

        let omega = self.natural_frequency();
        if omega <= 0.0 {
            return 1.0;
        }

        let zeta = self.damping_ratio().max(0.0);

        if zeta >= 1.0 - 1e-3 {
            return 1.0 - (-omega * t).exp() * (1.0 + omega * t);
        }

        let omega_d = omega * (1.0 - zeta * zeta).sqrt();
        let decay = (-zeta * omega * t).exp();
        1.0 - decay * ((omega_d * t).cos() + (zeta * omega / omega_d) * (omega_d * t).sin())
    }
}

/// A spring sampled over a fixed duration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringCurve {
    pub config: SpringConfig,
    pub duration_ms: u32,
}

impl SpringCurve {
    pub fn new(config: SpringConfig, duration_ms: u32) -> Self {
        Self {
            config,
            duration_ms,
        }
    }

    /// Curve tuned to settle within `duration_ms` with the given bounce
    pub fn with_bounce(duration_ms: u32, bounce: f32) -> Self {
        Self::new(SpringConfig::from_bounce(duration_ms, bounce), duration_ms)
    }

    /// Sample the curve at normalized progress `t` (0.0 - 1.0)
    pub fn sample(&self, t: f32) -> f32 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 || self.duration_ms == 0 {
            return 1.0;
        }
        let seconds = t * self.duration_ms as f32 / 1000.0;
        self.config.displacement(seconds)
    }
}
