pub mod bezier;
pub mod intersect_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance for turn angles, in radians.
pub const ANGLE_TOLERANCE: f64 = 1e-9;

/// Rotates a vector by +90° (counter-clockwise).
#[must_use]
pub fn perp(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

/// Rotates a vector counter-clockwise by `angle` radians.
#[must_use]
pub fn rotate(v: &Vector2, angle: f64) -> Vector2 {
    nalgebra::Rotation2::new(angle) * v
}

/// Returns the angle of a vector in `(-π, π]`.
#[must_use]
pub fn angle_of(v: &Vector2) -> f64 {
    v.y.atan2(v.x)
}

/// Scales a vector to the given length. Returns `None` for a zero vector.
#[must_use]
pub fn with_length(v: &Vector2, len: f64) -> Option<Vector2> {
    let norm = v.norm();
    if norm < TOLERANCE {
        return None;
    }
    Some(v * (len / norm))
}

/// Signed turn from direction `from` to direction `to`, in `(-π, π]`.
///
/// Positive means a counter-clockwise (left) turn.
#[must_use]
pub fn turn_angle(from: &Vector2, to: &Vector2) -> f64 {
    angle_of(&rotate(to, -angle_of(from)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn perp_is_ccw() {
        let v = perp(&Vector2::new(1.0, 0.0));
        assert_abs_diff_eq!(v.x, 0.0);
        assert_abs_diff_eq!(v.y, 1.0);
    }

    #[test]
    fn turn_angle_sign() {
        let east = Vector2::new(1.0, 0.0);
        let north = Vector2::new(0.0, 1.0);
        assert_abs_diff_eq!(turn_angle(&east, &north), FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(turn_angle(&north, &east), -FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(turn_angle(&east, &east), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn with_length_rejects_zero() {
        assert!(with_length(&Vector2::zeros(), 2.0).is_none());
        let v = with_length(&Vector2::new(3.0, 4.0), 10.0);
        assert!(v.is_some_and(|v| (v.norm() - 10.0).abs() < 1e-12));
    }
}
