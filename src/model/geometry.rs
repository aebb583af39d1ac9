//! Pixel geometry primitives shared by the widget core and its hosts.
//!
//! All coordinates are host pixels with the origin at the top-left of the
//! viewport and `y` growing downwards.

/// A point in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Viewport or widget extent in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Size {
    /// Create a new size.
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in host pixels.
///
/// Containment is half-open: the left and top edges are inside, the right
/// and bottom edges are not. Adjacent rectangles therefore never share a
/// pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PxRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width (never negative).
    pub width: i32,
    /// Height (never negative).
    pub height: i32,
}

impl PxRect {
    /// Create a rectangle. Negative extents are clamped to zero.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// One past the right-most column.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// One past the bottom-most row.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Whether the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Half-open containment test.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// The same rectangle moved by `(dx, dy)`.
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let rect = PxRect::new(10, 20, 5, 5);
        assert!(rect.contains(Point::new(10, 20)));
        assert!(rect.contains(Point::new(14, 24)));
        assert!(!rect.contains(Point::new(15, 24)));
        assert!(!rect.contains(Point::new(14, 25)));
        assert!(!rect.contains(Point::new(9, 20)));
    }

    #[test]
    fn negative_extent_is_clamped() {
        let rect = PxRect::new(0, 0, -4, 3);
        assert_eq!(rect.width, 0);
        assert!(rect.is_empty());
        assert!(!rect.contains(Point::new(0, 0)));
    }

    #[test]
    fn translate_keeps_extent() {
        let rect = PxRect::new(1, 2, 3, 4).translate(10, -2);
        assert_eq!(rect, PxRect::new(11, 0, 3, 4));
    }
}
