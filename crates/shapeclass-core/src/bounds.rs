//! Point and Bounds - Integer coordinates and rectangles
//!
//! Unlike [`crate::PixelGrid`], these are small `Copy` types. Bounds are
//! inclusive on both corners, so a single pixel has a 1x1 box whose two
//! corners coincide.

/// A pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// An inclusive rectangle `left_top ..= right_bottom`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    /// Minimum x and y
    pub left_top: Point,
    /// Maximum x and y
    pub right_bottom: Point,
}

impl Bounds {
    /// Create bounds from two corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            left_top: Point::new(a.x.min(b.x), a.y.min(b.y)),
            right_bottom: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Bounds covering a single pixel.
    pub const fn from_point(p: Point) -> Self {
        Self {
            left_top: p,
            right_bottom: p,
        }
    }

    /// Grow the bounds so they include `p`.
    pub fn extend(&mut self, p: Point) {
        self.left_top.x = self.left_top.x.min(p.x);
        self.left_top.y = self.left_top.y.min(p.y);
        self.right_bottom.x = self.right_bottom.x.max(p.x);
        self.right_bottom.y = self.right_bottom.y.max(p.y);
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.right_bottom.x - self.left_top.x + 1
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.right_bottom.y - self.left_top.y + 1
    }

    #[inline]
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Check if a point is inside the bounds
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left_top.x
            && p.x <= self.right_bottom.x
            && p.y >= self.left_top.y
            && p.y <= self.right_bottom.y
    }
}
