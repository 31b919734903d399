// src/rotation.rs

use glam::{DMat3, DVec3};

/// Plan-view rotation axis.
pub const Z_AXIS: DVec3 = DVec3::Z;

/// Rotates `vector` about `axis` by `angle_degrees` (Rodrigues' formula).
///
/// The axis is normalized first, so any non-zero length describes the same
/// rotation. A zero axis leaves the vector as it is.
pub fn rotate(vector: DVec3, angle_degrees: f64, axis: DVec3) -> DVec3 {
    let axis = axis.normalize_or_zero();
    if axis == DVec3::ZERO {
        return vector;
    }
    rotation_matrix(angle_degrees, axis) * vector
}

/// Rotation about the plan-view axis (counter-clockwise seen from +Z).
pub fn rotate_z(vector: DVec3, angle_degrees: f64) -> DVec3 {
    rotate(vector, angle_degrees, Z_AXIS)
}

/// `R = cos(t)*I + sin(t)*[u]x + (1 - cos(t))*(u (x) u)` for a unit axis `u`.
fn rotation_matrix(angle_degrees: f64, u: DVec3) -> DMat3 {
    let (sin_t, cos_t) = angle_degrees.to_radians().sin_cos();
    let one_minus_cos = 1.0 - cos_t;

    let cross = DMat3::from_cols(
        DVec3::new(0.0, u.z, -u.y),
        DVec3::new(-u.z, 0.0, u.x),
        DVec3::new(u.y, -u.x, 0.0),
    );
    let outer = DMat3::from_cols(u * u.x, u * u.y, u * u.z);

    DMat3::IDENTITY * cos_t + cross * sin_t + outer * one_minus_cos
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn quarter_turn_about_z() {
        let v = rotate_z(DVec3::X, 90.0);
        assert!(v.abs_diff_eq(DVec3::Y, EPS), "{v:?}");
    }

    #[test]
    fn z_component_is_untouched_by_plan_rotation() {
        let v = rotate_z(DVec3::new(1.0, 2.0, 3.0), 37.0);
        assert!((v.z - 3.0).abs() < EPS);
        assert!((v.truncate().length() - 5f64.sqrt()).abs() < EPS);
    }

    #[test]
    fn axis_length_does_not_scale_the_result() {
        let v = DVec3::new(0.3, -0.7, 0.0);
        let unit = rotate(v, 45.0, DVec3::Z);
        let half = rotate(v, 45.0, DVec3::new(0.0, 0.0, 0.5));
        assert!(unit.abs_diff_eq(half, EPS));
        assert!((half.length() - v.length()).abs() < EPS);
    }

    #[test]
    fn zero_axis_is_identity() {
        let v = DVec3::new(1.0, 1.0, 1.0);
        assert_eq!(rotate(v, 30.0, DVec3::ZERO), v);
    }

    #[test]
    fn matches_glam_axis_angle() {
        let axis = DVec3::new(1.0, 2.0, -0.5).normalize();
        let v = DVec3::new(-3.0, 0.25, 4.0);
        let expected = DMat3::from_axis_angle(axis, 71f64.to_radians()) * v;
        assert!(rotate(v, 71.0, axis).abs_diff_eq(expected, 1e-10));
    }
}
