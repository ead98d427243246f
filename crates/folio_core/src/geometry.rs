//! Geometry primitives
//!
//! Points, sizes and rectangles in page coordinates (CSS pixels, y grows
//! downward). Intersection helpers back the viewport visibility checks.

use serde::{Deserialize, Serialize};

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn area(&self) -> f32 {
        self.size.area()
    }

    /// Check if a point lies inside the rect (edges inclusive)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.right()
            && point.y >= self.origin.y
            && point.y <= self.bottom()
    }

    /// Check if this rect intersects with another
    ///
    /// Returns true if the two rects overlap with a non-empty area.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.origin.x < other.right()
            && self.right() > other.origin.x
            && self.origin.y < other.bottom()
            && self.bottom() > other.origin.y
    }

    /// Fraction of this rect's area that lies inside `viewport` (0.0 - 1.0)
    ///
    /// A degenerate (zero-area) rect counts as fully visible when its origin
    /// lies inside the viewport and invisible otherwise. A rect whose extents
    /// lie inside the viewport yields exactly 1.0.
    pub fn visible_fraction(&self, viewport: &Rect) -> f32 {
        if self.area() <= 0.0 {
            return if viewport.contains(self.origin) { 1.0 } else { 0.0 };
        }
        if !self.intersects(viewport) {
            return 0.0;
        }

        // Per axis, so a fully covered axis contributes exactly 1.0
        let horizontal = axis_fraction(self.x(), self.right(), viewport.x(), viewport.right());
        let vertical = axis_fraction(self.y(), self.bottom(), viewport.y(), viewport.bottom());
        (horizontal * vertical).clamp(0.0, 1.0)
    }
}

fn axis_fraction(start: f32, end: f32, view_start: f32, view_end: f32) -> f32 {
    if start >= view_start && end <= view_end {
        return 1.0;
    }
    let length = end - start;
    let covered = (end.min(view_end) - start.max(view_start)).clamp(0.0, length);
    covered / length
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert_eq!(b.visible_fraction(&a), 0.25);
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(0.0, 100.0, 100.0, 100.0);

        assert!(!a.intersects(&b));
        assert_eq!(b.visible_fraction(&a), 0.0);
    }

    #[test]
    fn test_visible_fraction() {
        let viewport = Rect::new(0.0, 0.0, 1280.0, 800.0);

        // Fully inside
        let card = Rect::new(100.0, 100.0, 300.0, 200.0);
        assert_eq!(card.visible_fraction(&viewport), 1.0);

        // Top half inside
        let card = Rect::new(100.0, 700.0, 300.0, 200.0);
        assert!((card.visible_fraction(&viewport) - 0.5).abs() < 1e-6);

        // Below the fold
        let card = Rect::new(100.0, 900.0, 300.0, 200.0);
        assert_eq!(card.visible_fraction(&viewport), 0.0);
    }

    #[test]
    fn test_visible_fraction_degenerate_rect() {
        let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);

        assert_eq!(Rect::new(10.0, 10.0, 0.0, 0.0).visible_fraction(&viewport), 1.0);
        assert_eq!(Rect::new(10.0, 200.0, 0.0, 0.0).visible_fraction(&viewport), 0.0);
    }

    #[test]
    fn test_fully_inside_is_exactly_one() {
        // x + width - x is not exactly width in f32 for these values
        let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let card = Rect::new(674.6667, 100.0, 301.33334, 320.0);
        assert_eq!(card.visible_fraction(&viewport), 1.0);

        // Covered horizontally, half covered vertically
        let card = Rect::new(674.6667, 640.0, 301.33334, 320.0);
        assert_eq!(card.visible_fraction(&viewport), 0.5);
    }
}
