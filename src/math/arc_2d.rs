//! Circle fitting helpers used by the bezier approximator and fillets.

use super::{angle, point_from_polar, Point2, TOLERANCE};

/// Center and radius of the circle passing through three points.
///
/// Returns `None` when the points are collinear (or coincident), since no
/// finite circle passes through them.
#[must_use]
pub fn circle_from_three_points(a: &Point2, b: &Point2, c: &Point2) -> Option<(Point2, f64)> {
    let ab = b - a;
    let ac = c - a;
    let cross = ab.x * ac.y - ab.y * ac.x;
    let scale = ab.norm() * ac.norm();
    if scale < TOLERANCE * TOLERANCE || cross.abs() <= scale * 1e-12 {
        return None;
    }

    let ab_sq = ab.norm_squared();
    let ac_sq = ac.norm_squared();
    let ux = (ac.y * ab_sq - ab.y * ac_sq) / (2.0 * cross);
    let uy = (ab.x * ac_sq - ac.x * ab_sq) / (2.0 * cross);

    let center = Point2::new(a.x + ux, a.y + uy);
    let radius = nalgebra::distance(&center, a);
    Some((center, radius))
}

/// Start and end angles (degrees, counter-clockwise) of the arc through
/// `a`, `b`, `c` on the circle centered at `center`, chosen so the arc
/// passes through `b`.
#[must_use]
pub fn arc_angles_through(center: &Point2, a: &Point2, b: &Point2, c: &Point2) -> (f64, f64) {
    let start = angle::of_point_in_degrees(center, a);
    let middle = angle::of_point_in_degrees(center, b);
    let end = angle::of_point_in_degrees(center, c);
    let span = angle::no_revolutions(end - start);
    if angle::is_within_span(middle, start, span, false, 0.0) {
        (start, end)
    } else {
        (end, start)
    }
}

/// Point on the circle `(center, radius)` at `angle` degrees.
#[must_use]
pub fn point_on_circle(center: &Point2, radius: f64, angle: f64) -> Point2 {
    *center + point_from_polar(angle, radius)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn unit_circle_from_three_points() {
        let (c, r) = circle_from_three_points(
            &Point2::new(1.0, 0.0),
            &Point2::new(0.0, 1.0),
            &Point2::new(-1.0, 0.0),
        )
        .unwrap();
        assert!(c.x.abs() < TOL, "cx={}", c.x);
        assert!(c.y.abs() < TOL, "cy={}", c.y);
        assert!((r - 1.0).abs() < TOL, "r={r}");
    }

    #[test]
    fn collinear_points_have_no_circle() {
        let result = circle_from_three_points(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 1.0),
            &Point2::new(2.0, 2.0),
        );
        assert!(result.is_none());
    }

    #[test]
    fn angles_follow_middle_point() {
        let center = Point2::origin();
        // Through the bottom: (1,0) -> (0,-1) -> (-1,0) is clockwise, so the
        // counter-clockwise arc runs from 180 to 360.
        let (start, end) = arc_angles_through(
            &center,
            &Point2::new(1.0, 0.0),
            &Point2::new(0.0, -1.0),
            &Point2::new(-1.0, 0.0),
        );
        assert!((start - 180.0).abs() < TOL, "start={start}");
        assert!(end.abs() < TOL, "end={end}");
    }

    #[test]
    fn point_on_circle_at_angle() {
        let p = point_on_circle(&Point2::new(1.0, 1.0), 2.0, 180.0);
        assert!((p.x + 1.0).abs() < TOL);
        assert!((p.y - 1.0).abs() < TOL);
    }
}
