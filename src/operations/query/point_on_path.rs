use crate::geometry::{Arc, Line, Path, PathKind};
use crate::math::{angle, distance_2d, Point2, TOLERANCE};
use crate::operations::bezier::BezierToArcs;

/// Returns whether `point` lies within the coordinate range of `line`.
///
/// Each axis along which the line has extent is checked separately; the
/// point is assumed to lie on the infinite line. A zero-length line contains
/// nothing.
#[must_use]
pub fn is_between_points(point: &Point2, line: &Line, exclusive: bool, tolerance: f64) -> bool {
    let mut flat_axis = false;
    for axis in 0..2 {
        let (o, e) = (line.origin[axis], line.end[axis]);
        if (o - e).abs() <= tolerance {
            if flat_axis {
                return false;
            }
            flat_axis = true;
            continue;
        }
        if !angle::is_between(point[axis], o, e, exclusive, tolerance) {
            return false;
        }
    }
    true
}

/// Returns whether `angle` (degrees) lies within the sweep of `arc`.
#[must_use]
pub fn is_between_arc_angles(angle: f64, arc: &Arc, exclusive: bool) -> bool {
    arc.contains_angle(angle, exclusive, TOLERANCE)
}

/// Distance from `point` to the nearest point of `path`.
#[must_use]
pub fn path_distance(point: &Point2, path: &Path) -> f64 {
    match &path.kind {
        PathKind::Line(l) => distance_2d::point_to_segment_dist(point, &l.origin, &l.end),
        PathKind::Circle(c) => distance_2d::point_to_circle_dist(point, &c.origin, c.radius()),
        PathKind::Arc(a) => distance_2d::point_to_arc_dist(point, &a.origin, a.radius(), a.start_angle, a.span()),
        PathKind::Bezier(b) => BezierToArcs::default()
            .pieces(b)
            .iter()
            .map(|piece| path_distance(point, &piece.path))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Returns whether `point` lies on `path` within `within` distance.
///
/// With `exclusive`, points at either end of an open path are rejected.
#[must_use]
pub fn is_point_on_path(point: &Point2, path: &Path, within: f64, exclusive: bool) -> bool {
    if path_distance(point, path) > within.max(TOLERANCE) {
        return false;
    }
    if exclusive {
        if let Some((start, end)) = path.endpoints() {
            let tol = within.max(TOLERANCE);
            if nalgebra::distance(point, &start) <= tol || nalgebra::distance(point, &end) <= tol {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn between_points_on_diagonal() {
        let l = Line::new(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0));
        assert!(is_between_points(&Point2::new(1.0, 1.0), &l, true, TOLERANCE));
        assert!(!is_between_points(&Point2::new(2.0, 2.0), &l, true, TOLERANCE));
        assert!(is_between_points(&Point2::new(2.0, 2.0), &l, false, TOLERANCE));
        assert!(!is_between_points(&Point2::new(3.0, 3.0), &l, false, TOLERANCE));
    }

    #[test]
    fn zero_length_line_contains_nothing() {
        let l = Line::new(Point2::new(1.0, 1.0), Point2::new(1.0, 1.0));
        assert!(!is_between_points(&Point2::new(1.0, 1.0), &l, false, TOLERANCE));
    }

    #[test]
    fn arc_angle_membership() {
        let a = Arc::new(Point2::origin(), 1.0, 350.0, 10.0).unwrap();
        assert!(is_between_arc_angles(0.0, &a, true));
        assert!(is_between_arc_angles(10.0, &a, false));
        assert!(!is_between_arc_angles(10.0, &a, true));
        assert!(!is_between_arc_angles(180.0, &a, false));
    }

    #[test]
    fn point_on_each_kind() {
        let line = Path::line(Point2::origin(), Point2::new(4.0, 0.0));
        assert!(is_point_on_path(&Point2::new(2.0, 0.0), &line, 0.0, false));
        assert!(!is_point_on_path(&Point2::new(2.0, 0.1), &line, 0.0, false));
        assert!(!is_point_on_path(&Point2::new(4.0, 0.0), &line, 0.0, true));

        let circle = Path::circle(Point2::origin(), 2.0).unwrap();
        assert!(is_point_on_path(&Point2::new(0.0, -2.0), &circle, 0.0, true));

        let arc = Path::arc(Point2::origin(), 2.0, 0.0, 90.0).unwrap();
        assert!(is_point_on_path(&Point2::new(0.0, 2.0), &arc, 1e-9, false));
        assert!(!is_point_on_path(&Point2::new(0.0, -2.0), &arc, 1e-9, false));
    }
}
