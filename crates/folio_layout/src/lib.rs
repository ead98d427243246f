//! Folio Reveal Engine
//!
//! Viewport-triggered, staggered entrance animations.
//!
//! # Architecture
//!
//! ```text
//!   items ──► StaggerConfig ──► offsets
//!                                  │
//!                                  ▼
//!   VisibilityGate ──(one-shot)──► RevealController ──► MotionKeyframe per item
//!         ▲                              ▲
//!   viewport + bounds               frame ticks
//! ```
//!
//! - [`visibility`]: one registry of one-shot observations keyed by item
//! - [`reveal`]: per-group `Pending → Animating → Settled` state machine
//! - [`motion`]: opacity / translation keyframes and transitions

pub mod motion;
pub mod reveal;
pub mod visibility;

pub use motion::{MotionKeyframe, RevealTransition, RevealTrigger};
pub use reveal::{
    RevealConfig, RevealController, RevealEvent, RevealRecord, RevealState, VisibilityRecord,
};
pub use visibility::{ObserverId, Threshold, VisibilityCallback, VisibilityEntry, VisibilityGate};
