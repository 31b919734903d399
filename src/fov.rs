// src/fov.rs

use glam::DVec3;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{FovError, Result};
use crate::geometry::{Point2, Polygon, Segment};
use crate::intersection::find_closest_intersection;
use crate::rotation::rotate_z;

/// Widest cone accepted; one full turn of whole-degree rays.
pub const MAX_FOV_ANGLE_DEGREES: f64 = 360.0;

/// One camera's sampling request. Camera "forward" is -Y before rotation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FovParameters {
    pub origin: Point2,
    pub angle_degrees: f64,
    pub rotation_degrees: f64,
    pub max_distance: f64,
}

impl FovParameters {
    pub fn new(origin: Point2, angle_degrees: f64, rotation_degrees: f64, max_distance: f64) -> Self {
        Self { origin, angle_degrees, rotation_degrees, max_distance }
    }

    fn validate(&self) -> Result<()> {
        if !self.origin.is_finite() {
            return Err(FovError::NonFinite("camera origin"));
        }
        if !self.angle_degrees.is_finite() {
            return Err(FovError::NonFinite("FOV angle"));
        }
        if !self.rotation_degrees.is_finite() {
            return Err(FovError::NonFinite("rotation angle"));
        }
        if !self.max_distance.is_finite() {
            return Err(FovError::NonFinite("max distance"));
        }
        if self.angle_degrees > MAX_FOV_ANGLE_DEGREES {
            return Err(FovError::InvalidParameter {
                name: "angle_degrees",
                reason: format!("must not exceed {MAX_FOV_ANGLE_DEGREES}, got {}", self.angle_degrees),
            });
        }
        Ok(())
    }

    /// Number of whole-degree rays; fractional degrees are truncated.
    pub fn sample_count(&self) -> usize {
        if self.angle_degrees <= 0.0 || self.max_distance <= 0.0 {
            0
        } else {
            self.angle_degrees.trunc() as usize
        }
    }

    /// Unobstructed ray for `step`, counted from the left edge of the cone.
    pub fn ray(&self, step: usize) -> Segment {
        let angle = (-self.angle_degrees / 2.0 + step as f64 + self.rotation_degrees).to_radians();
        let direction = DVec3::new(angle.sin(), -angle.cos(), 0.0).normalize();
        let end = self.origin.extend() + direction * self.max_distance;
        Segment::new(self.origin, Point2::from_xy(end))
    }
}

/// The two outermost rays of the cone, as `(left, right)` end points.
pub fn fov_endpoints(
    origin: Point2,
    fov_angle_degrees: f64,
    max_distance: f64,
    rotation_degrees: f64,
) -> (Point2, Point2) {
    let half = (fov_angle_degrees / 2.0).to_radians();
    let base_left = DVec3::new(-half.sin(), -half.cos(), 0.0);
    let base_right = DVec3::new(half.sin(), -half.cos(), 0.0);

    let left = rotate_z(base_left, rotation_degrees);
    let right = rotate_z(base_right, rotation_degrees);

    let o = origin.extend();
    (
        Point2::from_xy(o + left * max_distance),
        Point2::from_xy(o + right * max_distance),
    )
}

/// Casts one ray per whole degree of the cone and clips each at the nearest
/// obstruction. The result starts at the origin and has
/// `floor(angle_degrees) + 1` points when `max_distance > 0`; a non-positive
/// angle or distance yields the origin alone. Angles above
/// [`MAX_FOV_ANGLE_DEGREES`] are rejected.
pub fn simulate_fov(params: &FovParameters, obstructions: &[Segment]) -> Result<Polygon> {
    params.validate()?;
    if obstructions.iter().any(|s| !s.is_finite()) {
        return Err(FovError::NonFinite("obstruction segment"));
    }

    let samples = params.sample_count();
    if samples == 0 {
        warn!(
            "empty field of view (angle {}, distance {}); returning origin only",
            params.angle_degrees, params.max_distance
        );
    }

    let mut polygon = Polygon::with_capacity(samples + 1);
    polygon.push(params.origin);

    let mut clipped = 0usize;
    for step in 0..samples {
        let ray = params.ray(step);
        let point = match find_closest_intersection(&ray, obstructions) {
            Some(hit) => {
                clipped += 1;
                hit
            }
            None => ray.end,
        };
        polygon.push(point);
    }

    debug!(
        "simulated fov at ({:.3}, {:.3}): {} rays, {} clipped by {} obstructions",
        params.origin.x,
        params.origin.y,
        samples,
        clipped,
        obstructions.len()
    );
    Ok(polygon)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(angle: f64, rotation: f64, distance: f64) -> FovParameters {
        FovParameters::new(Point2::ORIGIN, angle, rotation, distance)
    }

    fn assert_close(p: Point2, x: f64, y: f64) {
        assert!((p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9, "{p:?} != ({x}, {y})");
    }

    #[test]
    fn open_floor_ninety_degrees() {
        let polygon = simulate_fov(&params(90.0, 0.0, 10.0), &[]).unwrap();
        assert_eq!(polygon.len(), 91);
        assert_eq!(polygon.points()[0], Point2::ORIGIN);
        // step 45 is straight ahead
        assert_close(polygon.points()[46], 0.0, -10.0);
        for p in &polygon.points()[1..] {
            assert!((p.distance_to(&Point2::ORIGIN) - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn wall_in_front_clips_the_middle_ray() {
        let wall = Segment::new(Point2::new(-5.0, -5.0), Point2::new(5.0, -5.0));
        let polygon = simulate_fov(&params(90.0, 0.0, 10.0), &[wall]).unwrap();
        assert_eq!(polygon.len(), 91);
        assert_close(polygon.points()[46], 0.0, -5.0);
    }

    #[test]
    fn fractional_angle_is_truncated() {
        let polygon = simulate_fov(&params(55.9, 0.0, 1.0), &[]).unwrap();
        assert_eq!(polygon.len(), 56);
    }

    #[test]
    fn rotation_turns_the_cone() {
        // 90 degrees counter-clockwise from -Y faces +X
        let polygon = simulate_fov(&params(2.0, 90.0, 4.0), &[]).unwrap();
        assert_close(polygon.points()[2], 4.0, 0.0);
    }

    #[test]
    fn degenerate_inputs_return_origin_only() {
        for p in [params(0.0, 0.0, 10.0), params(-30.0, 0.0, 10.0), params(90.0, 0.0, 0.0), params(90.0, 0.0, -1.0)] {
            let polygon = simulate_fov(&p, &[]).unwrap();
            assert_eq!(polygon.points(), &[Point2::ORIGIN]);
        }
    }

    #[test]
    fn nan_inputs_are_rejected() {
        assert!(matches!(
            simulate_fov(&params(f64::NAN, 0.0, 10.0), &[]),
            Err(FovError::NonFinite(_))
        ));
        let bad_origin = FovParameters::new(Point2::new(f64::INFINITY, 0.0), 90.0, 0.0, 10.0);
        assert!(simulate_fov(&bad_origin, &[]).is_err());
        let bad_wall = Segment::new(Point2::new(f64::NAN, 0.0), Point2::new(1.0, 1.0));
        assert!(simulate_fov(&params(90.0, 0.0, 10.0), &[bad_wall]).is_err());
    }

    #[test]
    fn angle_wider_than_a_full_turn_is_rejected() {
        for angle in [360.5, 1e9, 1e19] {
            assert!(matches!(
                simulate_fov(&params(angle, 0.0, 10.0), &[]),
                Err(FovError::InvalidParameter { name: "angle_degrees", .. })
            ));
        }
        assert_eq!(simulate_fov(&params(360.0, 0.0, 10.0), &[]).unwrap().len(), 361);
    }

    #[test]
    fn endpoints_bound_the_sampled_rays() {
        let (left, right) = fov_endpoints(Point2::ORIGIN, 90.0, 10.0, 0.0);
        let h = 10.0 * std::f64::consts::FRAC_1_SQRT_2;
        assert_close(left, -h, -h);
        assert_close(right, h, -h);
        // the first sampled ray coincides with the left edge of the cone
        assert_close(params(90.0, 0.0, 10.0).ray(0).end, left.x, left.y);
    }

    #[test]
    fn endpoints_follow_rotation() {
        let (left, right) = fov_endpoints(Point2::new(1.0, 1.0), 0.0, 2.0, 180.0);
        assert_close(left, 1.0, 3.0);
        assert_close(right, 1.0, 3.0);
    }
}
