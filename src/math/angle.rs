//! Angle helpers. All angles are in degrees, counter-clockwise from +X.

use super::Point2;

/// Folds an angle into `[0, 360)`.
#[must_use]
pub fn no_revolutions(angle: f64) -> f64 {
    let revolutions = (angle / 360.0).floor();
    if revolutions == 0.0 {
        return angle;
    }
    let folded = angle - 360.0 * revolutions;
    // Round-off may land exactly on 360 for tiny negative inputs.
    if folded >= 360.0 {
        folded - 360.0
    } else {
        folded
    }
}

/// Angle of `point` as seen from `origin`, in `[0, 360)`.
#[must_use]
pub fn of_point_in_degrees(origin: &Point2, point: &Point2) -> f64 {
    let d = point - origin;
    no_revolutions(d.y.atan2(d.x).to_degrees())
}

/// Angle of the direction `origin -> end`, in `[0, 360)`.
#[must_use]
pub fn of_line_in_degrees(origin: &Point2, end: &Point2) -> f64 {
    of_point_in_degrees(origin, end)
}

/// Mirrors an angle across the Y axis (`mirror_x`) and/or the X axis (`mirror_y`).
#[must_use]
pub fn mirror(angle: f64, mirror_x: bool, mirror_y: bool) -> f64 {
    let mut a = angle;
    if mirror_y {
        a = 360.0 - a;
    }
    if mirror_x {
        a = if a < 180.0 { 180.0 } else { 540.0 } - a;
    }
    a
}

/// Returns `true` when `value` lies between `a` and `b` (in either order).
///
/// With `exclusive`, values within `tolerance` of either limit are rejected;
/// otherwise they are accepted.
#[must_use]
pub fn is_between(value: f64, a: f64, b: f64, exclusive: bool, tolerance: f64) -> bool {
    let low = a.min(b);
    let high = a.max(b);
    if exclusive {
        low + tolerance < value && value < high - tolerance
    } else {
        low - tolerance <= value && value <= high + tolerance
    }
}

/// Returns `true` when `angle` lies within the counter-clockwise span that
/// starts at `start` and sweeps `span` degrees.
#[must_use]
pub fn is_within_span(angle: f64, start: f64, span: f64, exclusive: bool, tolerance: f64) -> bool {
    let start = no_revolutions(start);
    let end = start + span;
    let angle = no_revolutions(angle);
    [angle, angle + 360.0, angle - 360.0]
        .iter()
        .any(|&a| is_between(a, start, end, exclusive, tolerance))
}

/// Returns `true` when two angles denote the same direction within `tolerance` degrees.
#[must_use]
pub fn is_angle_equal(a: f64, b: f64, tolerance: f64) -> bool {
    let d = no_revolutions(a - b);
    d <= tolerance || 360.0 - d <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_negative_and_large_angles() {
        assert!((no_revolutions(-90.0) - 270.0).abs() < 1e-12);
        assert!((no_revolutions(450.0) - 90.0).abs() < 1e-12);
        assert!(no_revolutions(360.0).abs() < 1e-12);
        assert!((no_revolutions(45.0) - 45.0).abs() < 1e-12);
    }

    #[test]
    fn point_angle_quadrants() {
        let o = Point2::origin();
        assert!((of_point_in_degrees(&o, &Point2::new(0.0, 1.0)) - 90.0).abs() < 1e-12);
        assert!((of_point_in_degrees(&o, &Point2::new(0.0, -1.0)) - 270.0).abs() < 1e-12);
        assert!((of_point_in_degrees(&o, &Point2::new(-1.0, 0.0)) - 180.0).abs() < 1e-12);
    }

    #[test]
    fn span_wraps_through_zero() {
        // 300 -> 60 (through 0)
        assert!(is_within_span(10.0, 300.0, 120.0, false, 0.0));
        assert!(is_within_span(350.0, 300.0, 120.0, false, 0.0));
        assert!(!is_within_span(180.0, 300.0, 120.0, false, 0.0));
    }

    #[test]
    fn exclusive_rejects_limits() {
        assert!(is_within_span(90.0, 90.0, 90.0, false, 1e-9));
        assert!(!is_within_span(90.0, 90.0, 90.0, true, 1e-9));
    }

    #[test]
    fn angle_equality_across_zero() {
        assert!(is_angle_equal(359.99999, 0.0, 1e-4));
        assert!(is_angle_equal(-90.0, 270.0, 1e-9));
        assert!(!is_angle_equal(10.0, 11.0, 1e-4));
    }

    #[test]
    fn mirror_both_axes_is_half_turn() {
        assert!((no_revolutions(mirror(30.0, true, true)) - 210.0).abs() < 1e-12);
    }
}
