use serde::{Deserialize, Serialize};

/// A position on the drawing canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Straight-line distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        distance(self.x, self.y, other.x, other.y)
    }
}

/// Euclidean distance between `(x1, y1)` and `(x2, y2)`.
#[inline]
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x1 - x2).hypot(y1 - y2)
}
