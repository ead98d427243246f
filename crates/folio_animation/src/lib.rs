//! Folio Animation Primitives
//!
//! Timing building blocks for entrance reveals.
//!
//! # Features
//!
//! - **Stagger Sequencing**: per-item start offsets for grouped siblings
//! - **Easing Curves**: cubic curves plus a fixed-duration spring curve
//! - **Spring Timing**: closed-form damped oscillator with bounce control

pub mod easing;
pub mod spring;
pub mod stagger;

pub use easing::Easing;
pub use spring::{SpringConfig, SpringCurve};
pub use stagger::{compute_offsets, StaggerConfig, StaggerDirection};
