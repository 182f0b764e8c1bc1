//! Surface dimensions and border-edge assignment

use super::point::Point;

/// Size of the rendered surface in surface-space units
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Surface size for an image of `width`x`height` framed by `margin` on every side
    pub fn around_image(width: u32, height: u32, margin: f32) -> Self {
        Self {
            width: width as f32 + 2.0 * margin,
            height: height as f32 + 2.0 * margin,
        }
    }

    /// Whether a surface-space point lies inside the band `[margin, dimension - margin]`
    /// on both axes (inclusive)
    pub fn contains_inner(&self, x: f32, y: f32, margin: f32) -> bool {
        x >= margin && x <= self.width - margin && y >= margin && y <= self.height - margin
    }
}

/// One of the four border edges
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    /// Evaluation order for edge assignment; earlier entries win ties
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom];

    /// Distance from a surface-space point to this edge
    pub fn distance(self, size: SurfaceSize, x: f32, y: f32) -> f32 {
        match self {
            Edge::Left => x,
            Edge::Top => y,
            Edge::Right => size.width - x,
            Edge::Bottom => size.height - y,
        }
    }

    /// The edge closest to a point. Equal distances resolve in `ALL` order.
    pub fn nearest(size: SurfaceSize, x: f32, y: f32) -> Edge {
        let mut best = Edge::Left;
        let mut best_distance = Edge::Left.distance(size, x, y);
        for edge in &Edge::ALL[1..] {
            let distance = edge.distance(size, x, y);
            if distance < best_distance {
                best = *edge;
                best_distance = distance;
            }
        }
        best
    }

    /// Whether labels on this edge are spread vertically
    pub fn is_vertical(self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }

    /// Coordinate of a point along this edge, used to order the edge's labels
    pub fn sort_key(self, point: &Point) -> f32 {
        if self.is_vertical() { point.y } else { point.x }
    }
}

/// Points grouped by the edge their label is attached to
///
/// Each group is sorted along its edge (`y` for left/right, `x` for
/// top/bottom). Recomputed on every paint.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeSlots {
    pub left: Vec<Point>,
    pub top: Vec<Point>,
    pub right: Vec<Point>,
    pub bottom: Vec<Point>,
}

impl EdgeSlots {
    /// Assign every point to its nearest edge and sort each group
    pub fn assign(size: SurfaceSize, points: &[Point]) -> Self {
        let mut slots = Self::default();
        for point in points {
            slots
                .get_mut(Edge::nearest(size, point.x, point.y))
                .push(*point);
        }
        for edge in Edge::ALL {
            // Stable, so points sharing a coordinate keep insertion order
            slots
                .get_mut(edge)
                .sort_by(|a, b| edge.sort_key(a).total_cmp(&edge.sort_key(b)));
        }
        slots
    }

    pub fn get(&self, edge: Edge) -> &[Point] {
        match edge {
            Edge::Left => &self.left,
            Edge::Top => &self.top,
            Edge::Right => &self.right,
            Edge::Bottom => &self.bottom,
        }
    }

    fn get_mut(&mut self, edge: Edge) -> &mut Vec<Point> {
        match edge {
            Edge::Left => &mut self.left,
            Edge::Top => &mut self.top,
            Edge::Right => &mut self.right,
            Edge::Bottom => &mut self.bottom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f32, y: f32, index: u32) -> Point {
        Point { x, y, index }
    }

    #[test]
    fn test_center_of_square_goes_left() {
        let size = SurfaceSize::new(200.0, 200.0);
        assert_eq!(Edge::nearest(size, 100.0, 100.0), Edge::Left);
    }

    #[test]
    fn test_tie_order_after_left() {
        let size = SurfaceSize::new(200.0, 200.0);
        // top == right, both closer than left/bottom
        assert_eq!(Edge::nearest(size, 150.0, 50.0), Edge::Top);
        // right == bottom
        assert_eq!(Edge::nearest(size, 150.0, 150.0), Edge::Right);
        // left == bottom
        assert_eq!(Edge::nearest(size, 50.0, 150.0), Edge::Left);
    }

    #[test]
    fn test_nearest_each_edge() {
        let size = SurfaceSize::new(440.0, 380.0);
        assert_eq!(Edge::nearest(size, 44.0, 190.0), Edge::Left);
        assert_eq!(Edge::nearest(size, 220.0, 45.0), Edge::Top);
        assert_eq!(Edge::nearest(size, 400.0, 190.0), Edge::Right);
        assert_eq!(Edge::nearest(size, 220.0, 340.0), Edge::Bottom);
    }

    #[test]
    fn test_assign_sorts_along_edge() {
        let size = SurfaceSize::new(400.0, 400.0);
        let points = [
            pt(50.0, 300.0, 1),
            pt(50.0, 100.0, 2),
            pt(300.0, 45.0, 3),
            pt(120.0, 45.0, 4),
        ];
        let slots = EdgeSlots::assign(size, &points);
        let left: Vec<u32> = slots.left.iter().map(|p| p.index).collect();
        let top: Vec<u32> = slots.top.iter().map(|p| p.index).collect();
        assert_eq!(left, vec![2, 1]);
        assert_eq!(top, vec![4, 3]);
        assert!(slots.right.is_empty());
        assert!(slots.bottom.is_empty());
        let total: usize = Edge::ALL.iter().map(|edge| slots.get(*edge).len()).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_contains_inner_is_inclusive() {
        let size = SurfaceSize::new(640.0, 480.0);
        assert!(size.contains_inner(40.0, 40.0, 40.0));
        assert!(size.contains_inner(600.0, 440.0, 40.0));
        assert!(!size.contains_inner(39.0, 100.0, 40.0));
        assert!(!size.contains_inner(100.0, 441.0, 40.0));
    }

    #[test]
    fn test_around_image() {
        let size = SurfaceSize::around_image(360, 300, 40.0);
        assert_eq!(size, SurfaceSize::new(440.0, 380.0));
    }
}
