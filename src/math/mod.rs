pub mod angle;
pub mod arc_2d;
pub mod distance_2d;
pub mod intersect_2d;
pub mod point_matcher;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Default distance under which two points or slopes are considered equal.
pub const TOLERANCE: f64 = 1e-7;

/// Default angular tolerance, in degrees.
pub const ANGLE_TOLERANCE: f64 = 1e-4;

/// Default distance under which two path endpoints are joined into one node
/// by chain discovery, fillets and combine.
pub const POINT_MATCHING_DISTANCE: f64 = 0.005;

/// Rounds `n` to the nearest multiple of `accuracy`.
#[must_use]
pub fn round(n: f64, accuracy: f64) -> f64 {
    if n.fract() == 0.0 || accuracy <= 0.0 {
        return n;
    }
    let inverse = 1.0 / accuracy;
    (n * inverse).round() / inverse
}

/// Returns the point at `radius` from the origin along `angle` degrees.
#[must_use]
pub fn point_from_polar(angle: f64, radius: f64) -> Vector2 {
    let (sin, cos) = angle.to_radians().sin_cos();
    Vector2::new(radius * cos, radius * sin)
}

/// Rotates `point` counter-clockwise by `angle` degrees around `pivot`.
#[must_use]
pub fn rotate_point(point: &Point2, angle: f64, pivot: &Point2) -> Point2 {
    let rotation = nalgebra::Rotation2::new(angle.to_radians());
    *pivot + rotation * (*point - *pivot)
}

/// Returns the midpoint between two points.
#[must_use]
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    nalgebra::center(a, b)
}

/// Returns `true` when both coordinates are finite.
#[must_use]
pub fn is_finite(point: &Point2) -> bool {
    point.x.is_finite() && point.y.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_accuracy() {
        assert!((round(1.234_567_89, 0.001) - 1.235).abs() < 1e-12);
        assert!((round(5.0, 0.001) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn polar_quarter_turn() {
        let v = point_from_polar(90.0, 2.0);
        assert!(v.x.abs() < 1e-12);
        assert!((v.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn rotate_around_pivot() {
        let p = rotate_point(&Point2::new(2.0, 1.0), 90.0, &Point2::new(1.0, 1.0));
        assert!((p.x - 1.0).abs() < 1e-12);
        assert!((p.y - 2.0).abs() < 1e-12);
    }
}
