//! Annotation points
//!
//! All points store coordinates in surface space (full-resolution pixels of
//! the rendered output, margin included).

/// A user-chosen point of interest
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Position in surface space
    pub x: f32,
    pub y: f32,
    /// 1-based insertion number, used as the label text
    pub index: u32,
}

/// Insertion-ordered point list with stack discipline
///
/// Points can only be pushed at the tail and popped from the tail, so
/// `index` values stay strictly increasing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointStack {
    points: Vec<Point>,
}

impl PointStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point, numbering it after the current count
    pub fn push(&mut self, x: f32, y: f32) -> Point {
        let point = Point {
            x,
            y,
            index: self.points.len() as u32 + 1,
        };
        self.points.push(point);
        point
    }

    /// Remove the most recently added point
    pub fn pop(&mut self) -> Option<Point> {
        self.points.pop()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }
}
