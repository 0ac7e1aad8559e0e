use super::{angle, arc_2d::point_on_circle, Point2};

/// Returns the closest point to `p` on the segment `a -> b`.
#[must_use]
pub fn closest_point_on_segment(p: &Point2, a: &Point2, b: &Point2) -> Point2 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return *a;
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    *a + d * t
}

/// Returns the minimum distance from `p` to the segment `a -> b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    nalgebra::distance(p, &closest_point_on_segment(p, a, b))
}

/// Returns the minimum distance from `p` to the full circle `(center, radius)`.
#[must_use]
pub fn point_to_circle_dist(p: &Point2, center: &Point2, radius: f64) -> f64 {
    (nalgebra::distance(p, center) - radius).abs()
}

/// Returns the minimum distance from `p` to a circular arc.
///
/// The arc is defined by `center`, `radius`, `start_angle` and a
/// counter-clockwise `span`, both in degrees.
///
/// If the point's angle (relative to center) falls within the arc range,
/// the distance is `||point - center| - radius|`.
/// Otherwise, the distance is the minimum of the distances to the two arc endpoints.
#[must_use]
pub fn point_to_arc_dist(p: &Point2, center: &Point2, radius: f64, start_angle: f64, span: f64) -> f64 {
    let a = angle::of_point_in_degrees(center, p);
    if angle::is_within_span(a, start_angle, span, false, 0.0) {
        return point_to_circle_dist(p, center, radius);
    }

    // Point is outside the arc's angular range. Check distance to endpoints.
    let start = point_on_circle(center, radius, start_angle);
    let end = point_on_circle(center, radius, start_angle + span);
    nalgebra::distance(p, &start).min(nalgebra::distance(p, &end))
}
