//! Folio Core
//!
//! Foundational types shared by the reveal engine and the page composer:
//!
//! - **Geometry**: points, sizes and rects with viewport intersection math
//! - **Items**: stable item identity and the immutable [`AnimatableItem`]

pub mod geometry;
pub mod item;

pub use geometry::{Point, Rect, Size};
pub use item::{AnimatableItem, ItemId, ItemIdGenerator, Payload};
