//! Screen-space primitives for hit testing.
//!
//! Everything here is pure data and arithmetic; coordinates come from
//! whatever surface hosts the board (pixels, terminal cells) and only need
//! to share one unit within a gesture.

/// A position on the board surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An axis-aligned rectangle on the board surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Whether `point` falls inside this region.
    ///
    /// Edges are half-open: the left and top edges are inside, the right
    /// and bottom edges belong to the neighbor. Adjacent column regions
    /// therefore never both claim a point.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}
