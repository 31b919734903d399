// src/geometry.rs

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Edges shorter than this are dropped from a polygon's boundary loop.
pub const MIN_EDGE_LENGTH: f64 = 1e-9;

/// A point in the plan view, in host length units (feet).
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ORIGIN: Point2 = Point2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(&self, other: &Point2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn sub(&self, other: &Point2) -> Point2 {
        Point2::new(self.x - other.x, self.y - other.y)
    }

    pub fn add(&self, other: &Point2) -> Point2 {
        Point2::new(self.x + other.x, self.y + other.y)
    }

    /// z component of the 2D cross product.
    pub fn cross(&self, other: &Point2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn distance_to(&self, other: &Point2) -> f64 {
        let d = self.sub(other);
        d.dot(&d).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Lifts the point into 3D on the z = 0 plane.
    pub fn extend(&self) -> DVec3 {
        DVec3::new(self.x, self.y, 0.0)
    }

    /// Drops the z component.
    pub fn from_xy(v: DVec3) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<DVec2> for Point2 {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point2> for DVec2 {
    fn from(p: Point2) -> Self {
        DVec2::new(p.x, p.y)
    }
}

/// One obstruction edge or one sample ray.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }
}

/// Boundary of a coverage area. The first point is the camera origin and the
/// loop closes implicitly from the last point back to the first.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    points: Vec<Point2>,
}

impl Polygon {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { points: Vec::with_capacity(capacity) }
    }

    pub fn from_points(points: &[Point2]) -> Self {
        Self { points: points.to_vec() }
    }

    pub fn push(&mut self, point: Point2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<Point2> {
        self.points
    }

    /// Boundary edges in order, including the closing edge back to the first
    /// point. Zero-length edges are skipped so the result can be turned into a
    /// host curve loop directly.
    pub fn edges(&self) -> Vec<Segment> {
        let n = self.points.len();
        if n < 2 {
            return Vec::new();
        }
        (0..n)
            .map(|i| Segment::new(self.points[i], self.points[(i + 1) % n]))
            .filter(|edge| edge.length() > MIN_EDGE_LENGTH)
            .collect()
    }

    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += self.points[i].x * self.points[j].y;
            area -= self.points[j].x * self.points[i].y;
        }
        area.abs() / 2.0
    }

    /// True when the polygon cannot be materialized as a region: fewer than
    /// three boundary edges or no enclosed area.
    pub fn is_degenerate(&self) -> bool {
        self.edges().len() < 3 || self.area() <= MIN_EDGE_LENGTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ])
    }

    #[test]
    fn area_ignores_winding() {
        let square = unit_square();
        let mut reversed = square.clone().into_points();
        reversed.reverse();
        assert!((square.area() - 1.0).abs() < 1e-12);
        assert!((Polygon::from_points(&reversed).area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn edges_close_the_loop() {
        let edges = unit_square().edges();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3].start, Point2::new(0.0, 1.0));
        assert_eq!(edges[3].end, Point2::new(0.0, 0.0));
    }

    #[test]
    fn edges_skip_repeated_points() {
        let polygon = Polygon::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 2.0),
        ]);
        assert_eq!(polygon.edges().len(), 3);
        assert!(!polygon.is_degenerate());
    }

    #[test]
    fn origin_only_polygon_is_degenerate() {
        let polygon = Polygon::from_points(&[Point2::ORIGIN]);
        assert!(polygon.edges().is_empty());
        assert!(polygon.is_degenerate());
        assert_eq!(polygon.area(), 0.0);
    }

    #[test]
    fn collinear_points_are_degenerate() {
        let polygon = Polygon::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ]);
        assert!(polygon.is_degenerate());
    }
}
