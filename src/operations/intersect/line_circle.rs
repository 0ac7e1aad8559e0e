use crate::geometry::Line;
use crate::math::{angle, rotate_point, Point2};

use super::IntersectionOptions;

/// Angles (degrees) on the circle `(center, radius)` where `line` meets it.
///
/// The line is moved so the circle sits at the origin and rotated to the
/// horizontal; its height then decides between no hit, a tangent, or up to
/// two crossings inside the segment's x range. Returns `None` when nothing
/// lies within the segment.
pub(super) fn intersect(line: &Line, center: &Point2, radius: f64, options: &IntersectionOptions) -> Option<Vec<f64>> {
    let tol = options.tolerance;
    let line_angle = {
        let a = angle::of_line_in_degrees(&line.origin, &line.end);
        if a >= 180.0 {
            a - 360.0
        } else {
            a
        }
    };
    let zero = Point2::origin();
    let origin = rotate_point(&Point2::from(line.origin - *center), -line_angle, &zero);
    let end = rotate_point(&Point2::from(line.end - *center), -line_angle, &zero);
    let un_rotate = |a: f64| angle::no_revolutions(a + line_angle);

    let y = origin.y;
    let y_abs = y.abs();
    if y_abs > radius + tol {
        return None;
    }

    let mut angles = Vec::with_capacity(2);
    if (y_abs - radius).abs() <= tol {
        if options.exclude_tangents {
            return None;
        }
        if angle::is_between(0.0, origin.x, end.x, false, tol) {
            angles.push(un_rotate(if y > 0.0 { 90.0 } else { 270.0 }));
        }
    } else {
        let radians = (y / radius).asin();
        let degrees = radians.to_degrees();
        let x = radians.cos() * radius;
        for (px, a) in [(-x, 180.0 - degrees), (x, degrees)] {
            if angle::is_between(px, origin.x, end.x, options.exclude_tangents, tol) {
                angles.push(un_rotate(a));
            }
        }
    }

    if angles.is_empty() {
        None
    } else {
        Some(angles)
    }
}
