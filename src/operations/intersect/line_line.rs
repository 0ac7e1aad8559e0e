use crate::geometry::Line;
use crate::operations::query::{
    is_between_points, is_line_overlapping, is_slope_equal, is_slope_parallel, line_slope,
    slope_intersection_point,
};

use super::{Intersection, IntersectionOptions, PathRelation};

/// Intersects two line segments.
///
/// Parallel segments never cross; collinear ones that share more than a
/// point are reported as overlapping.
pub(super) fn intersect(a: &Line, b: &Line, options: &IntersectionOptions) -> PathRelation {
    let sa = line_slope(a);
    let sb = line_slope(b);
    if is_slope_parallel(&sa, &sb) {
        if is_slope_equal(&sa, &sb) && is_line_overlapping(a, b, options.exclude_tangents) {
            return PathRelation::Overlapping;
        }
        return PathRelation::Disjoint;
    }

    let Some(point) = slope_intersection_point(a, b) else {
        return PathRelation::Disjoint;
    };
    let tol = options.tolerance;
    if is_between_points(&point, a, options.exclude_tangents, tol)
        && is_between_points(&point, b, options.exclude_tangents, tol)
    {
        PathRelation::Crossing(Intersection {
            points: vec![point],
            ..Intersection::default()
        })
    } else {
        PathRelation::Disjoint
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    fn line(ax: f64, ay: f64, bx: f64, by: f64) -> Line {
        Line::new(Point2::new(ax, ay), Point2::new(bx, by))
    }

    #[test]
    fn crossing_inside_both_segments() {
        let r = intersect(&line(0.0, 0.0, 10.0, 0.0), &line(5.0, -5.0, 5.0, 5.0), &IntersectionOptions::default());
        let PathRelation::Crossing(i) = r else { panic!("expected crossing, got {r:?}") };
        assert_eq!(i.points.len(), 1);
        assert!((i.points[0].x - 5.0).abs() < 1e-12);
        assert!(i.points[0].y.abs() < 1e-12);
    }

    #[test]
    fn crossing_outside_segment_is_disjoint() {
        let r = intersect(&line(0.0, 0.0, 4.0, 0.0), &line(5.0, -5.0, 5.0, 5.0), &IntersectionOptions::default());
        assert!(matches!(r, PathRelation::Disjoint));
    }

    #[test]
    fn shared_endpoint_respects_exclude_tangents() {
        let a = line(0.0, 0.0, 1.0, 0.0);
        let b = line(1.0, 0.0, 1.0, 1.0);
        assert!(matches!(intersect(&a, &b, &IntersectionOptions::default()), PathRelation::Crossing(_)));
        let opts = IntersectionOptions {
            exclude_tangents: true,
            ..IntersectionOptions::default()
        };
        assert!(matches!(intersect(&a, &b, &opts), PathRelation::Disjoint));
    }

    #[test]
    fn collinear_overlap_detected() {
        let r = intersect(&line(0.0, 0.0, 2.0, 0.0), &line(1.0, 0.0, 3.0, 0.0), &IntersectionOptions::default());
        assert!(matches!(r, PathRelation::Overlapping));
        let r = intersect(&line(0.0, 0.0, 2.0, 0.0), &line(0.0, 1.0, 2.0, 1.0), &IntersectionOptions::default());
        assert!(matches!(r, PathRelation::Disjoint));
    }
}
