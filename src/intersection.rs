// src/intersection.rs

use crate::geometry::{Point2, Segment};

/// Below this |determinant| two lines are treated as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-9;

/// Slack allowed when checking that an intersection lies on both segments.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

#[inline(always)]
fn det(a: &Point2, b: &Point2) -> f64 {
    a.x * b.y - a.y * b.x
}

#[inline(always)]
fn within_bounds(p: &Point2, q: &Point2, r: &Point2, tolerance: f64) -> bool {
    p.x.min(r.x) - tolerance <= q.x
        && q.x <= p.x.max(r.x) + tolerance
        && p.y.min(r.y) - tolerance <= q.y
        && q.y <= p.y.max(r.y) + tolerance
}

/// Intersection of the infinite lines through `a` and `b`.
pub fn line_intersection(a: &Segment, b: &Segment) -> Option<Point2> {
    let (p1, p2, p3, p4) = (&a.start, &a.end, &b.start, &b.end);

    let dir_a = p1.sub(p2);
    let dir_b = p3.sub(p4);
    let div = det(&dir_a, &dir_b);
    if div.abs() < PARALLEL_EPSILON {
        return None;
    }

    let d = Point2::new(det(p1, p2), det(p3, p4));
    let x = det(&d, &Point2::new(dir_a.x, dir_b.x)) / div;
    let y = det(&d, &Point2::new(dir_a.y, dir_b.y)) / div;
    Some(Point2::new(x, y))
}

/// Intersection of two segments that properly cross each other.
///
/// Touching endpoints and collinear overlaps do not count. Zero-length segments
/// never intersect anything.
pub fn segment_intersection(a: &Segment, b: &Segment, tolerance: f64) -> Option<Point2> {
    let (p1, p2, p3, p4) = (&a.start, &a.end, &b.start, &b.end);

    let d1 = det(&p3.sub(p1), &p2.sub(p1));
    let d2 = det(&p4.sub(p1), &p2.sub(p1));
    let d3 = det(&p1.sub(p3), &p4.sub(p3));
    let d4 = det(&p2.sub(p3), &p4.sub(p3));

    if !(d1 * d2 < 0.0 && d3 * d4 < 0.0) {
        return None;
    }

    line_intersection(a, b).filter(|hit| {
        within_bounds(p1, hit, p2, tolerance) && within_bounds(p3, hit, p4, tolerance)
    })
}

/// The hit on `ray` nearest to `ray.start` among all `obstructions`.
///
/// When two hits are exactly equally far, the one from the earlier obstruction
/// is returned.
pub fn find_closest_intersection(ray: &Segment, obstructions: &[Segment]) -> Option<Point2> {
    let mut closest = None;
    let mut min_distance = f64::INFINITY;

    for obstruction in obstructions {
        if let Some(hit) = segment_intersection(ray, obstruction, DEFAULT_TOLERANCE) {
            let distance = hit.distance_to(&ray.start);
            if distance < min_distance {
                min_distance = distance;
                closest = Some(hit);
            }
        }
    }
    closest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::new(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    fn assert_close(p: Point2, x: f64, y: f64) {
        assert!((p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9, "{p:?} != ({x}, {y})");
    }

    #[test]
    fn crossing_diagonals() {
        let hit = segment_intersection(&seg(0.0, 0.0, 2.0, 2.0), &seg(0.0, 2.0, 2.0, 0.0), DEFAULT_TOLERANCE);
        assert_close(hit.unwrap(), 1.0, 1.0);
    }

    #[test]
    fn infinite_lines_meet_outside_segments() {
        let a = seg(0.0, 0.0, 1.0, 0.0);
        let b = seg(5.0, -1.0, 5.0, 1.0);
        assert_close(line_intersection(&a, &b).unwrap(), 5.0, 0.0);
        assert!(segment_intersection(&a, &b, DEFAULT_TOLERANCE).is_none());
    }

    #[test]
    fn parallel_lines_have_no_intersection() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        let b = seg(0.0, 1.0, 10.0, 1.0);
        assert!(line_intersection(&a, &b).is_none());
        assert!(segment_intersection(&a, &b, DEFAULT_TOLERANCE).is_none());
    }

    #[test]
    fn collinear_overlap_is_not_a_crossing() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        let b = seg(5.0, 0.0, 15.0, 0.0);
        assert!(segment_intersection(&a, &b, DEFAULT_TOLERANCE).is_none());
    }

    #[test]
    fn touching_endpoint_is_not_a_crossing() {
        let a = seg(0.0, 0.0, 0.0, -10.0);
        let b = seg(0.0, -10.0, 5.0, -10.0);
        assert!(segment_intersection(&a, &b, DEFAULT_TOLERANCE).is_none());
    }

    #[test]
    fn zero_length_obstruction_is_ignored() {
        let ray = seg(0.0, 0.0, 0.0, -10.0);
        let dot = seg(0.0, -5.0, 0.0, -5.0);
        assert!(segment_intersection(&ray, &dot, DEFAULT_TOLERANCE).is_none());
        assert!(find_closest_intersection(&ray, &[dot]).is_none());
    }

    #[test]
    fn closest_of_several_walls() {
        let ray = seg(0.0, 0.0, 0.0, -10.0);
        let walls = [
            seg(-1.0, -8.0, 1.0, -8.0),
            seg(-1.0, -3.0, 1.0, -3.0),
            seg(-1.0, -6.0, 1.0, -6.0),
        ];
        assert_close(find_closest_intersection(&ray, &walls).unwrap(), 0.0, -3.0);
    }

    #[test]
    fn no_obstructions_no_hit() {
        assert!(find_closest_intersection(&seg(0.0, 0.0, 1.0, 1.0), &[]).is_none());
    }

    #[test]
    fn equal_distance_keeps_first_found() {
        let ray = seg(0.0, 0.0, 0.0, -10.0);
        let first = seg(-1.0, -4.0, 1.0, -4.0);
        let second = seg(1.0, -4.0, -1.0, -4.0);
        let hit = find_closest_intersection(&ray, &[first, second]).unwrap();
        assert_close(hit, 0.0, -4.0);
    }
}
