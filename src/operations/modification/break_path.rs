use crate::geometry::{Arc, Path, PathKind};
use crate::math::{angle, Point2, ANGLE_TOLERANCE, TOLERANCE};
use crate::operations::query::{is_between_points, path_distance};

/// How far off a path a break point may sit.
const ON_PATH_DISTANCE: f64 = 1e-5;

/// Breaks `path` at `point`.
///
/// The path is cropped in place to end at `point` and the remainder is
/// returned. A circle opens into a full arc starting and ending at `point`,
/// so nothing is returned for it. Points off the path or at an end of it
/// leave the path untouched and return `None`. Beziers are not broken.
pub fn break_at_point(path: &mut Path, point: &Point2) -> Option<Path> {
    if path_distance(point, path) > ON_PATH_DISTANCE {
        return None;
    }
    if let PathKind::Circle(circle) = &path.kind {
        let at = angle::of_point_in_degrees(&circle.origin, point);
        let opened = Arc::new(circle.origin, circle.radius(), at, at + 360.0).ok()?;
        path.kind = PathKind::Arc(opened);
        return None;
    }
    let layer = path.layer.clone();
    let rest = match &mut path.kind {
        PathKind::Line(line) => {
            if !is_between_points(point, line, true, TOLERANCE) {
                return None;
            }
            let rest = Path::line(*point, line.end);
            line.end = *point;
            rest
        }
        PathKind::Arc(arc) => {
            let at = angle::of_point_in_degrees(&arc.origin, point);
            if !arc.contains_angle(at, true, ANGLE_TOLERANCE) {
                return None;
            }
            let mut rest = *arc;
            rest.start_angle = at;
            arc.end_angle = at;
            Path::from(rest)
        }
        PathKind::Circle(_) | PathKind::Bezier(_) => return None,
    };
    Some(Path { layer, ..rest })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Curve;

    #[test]
    fn line_splits_in_two() {
        let mut path = Path::line(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)).with_layer("cut");
        let rest = break_at_point(&mut path, &Point2::new(4.0, 0.0)).unwrap();
        assert_eq!(path.endpoints(), Some((Point2::new(0.0, 0.0), Point2::new(4.0, 0.0))));
        assert_eq!(rest.endpoints(), Some((Point2::new(4.0, 0.0), Point2::new(10.0, 0.0))));
        assert_eq!(rest.layer.as_deref(), Some("cut"));
    }

    #[test]
    fn endpoints_and_strays_are_ignored() {
        let mut path = Path::line(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        let before = path.clone();
        assert!(break_at_point(&mut path, &Point2::new(10.0, 0.0)).is_none());
        assert!(break_at_point(&mut path, &Point2::new(5.0, 1.0)).is_none());
        assert_eq!(path, before);
    }

    #[test]
    fn arc_splits_across_zero_degrees() {
        let mut path = Path::arc(Point2::origin(), 1.0, 270.0, 90.0).unwrap();
        let rest = break_at_point(&mut path, &Point2::new(1.0, 0.0)).unwrap();
        let (PathKind::Arc(first), PathKind::Arc(second)) = (&path.kind, &rest.kind) else {
            panic!("arcs expected")
        };
        assert!((first.span() - 90.0).abs() < 1e-9);
        assert!((second.span() - 90.0).abs() < 1e-9);
        assert!((path.curve().length() + rest.curve().length() - std::f64::consts::PI).abs() < 1e-9);
    }

    #[test]
    fn circle_opens_into_arc() {
        let mut path = Path::circle(Point2::origin(), 2.0).unwrap();
        assert!(break_at_point(&mut path, &Point2::new(0.0, 2.0)).is_none());
        let PathKind::Arc(arc) = path.kind else { panic!("arc expected") };
        assert!((arc.start_angle - 90.0).abs() < 1e-9);
        assert!((arc.span() - 360.0).abs() < 1e-9);
    }
}
