//! Pairwise path intersection.
//!
//! Every unordered pair of path kinds has one canonical solver; the reversed
//! pair swaps its inputs and then swaps the angle fields of the result.
//! Arcs are solved as their full circles and filtered by sweep afterwards.

mod circle_circle;
mod line_circle;
mod line_line;

use crate::geometry::{Arc, BezierSeed, Path, PathKind};
use crate::math::{arc_2d::point_on_circle, Point2, Vector2, TOLERANCE};
use crate::operations::bezier::BezierToArcs;
use crate::operations::query::{is_arc_overlapping, is_between_arc_angles, is_point_equal};
use crate::operations::transform::moved_path;

use circle_circle::CircleCircle;

/// Options for [`Intersect`].
#[derive(Debug, Clone, Copy)]
pub struct IntersectionOptions {
    /// Reject touching points: shared endpoints, tangent contacts, and
    /// crossings exactly at an arc's end.
    pub exclude_tangents: bool,
    /// Distance under which values are treated as equal.
    pub tolerance: f64,
}

impl Default for IntersectionOptions {
    fn default() -> Self {
        Self {
            exclude_tangents: false,
            tolerance: TOLERANCE,
        }
    }
}

/// Points where two paths cross.
///
/// For circles and arcs, `angles_a`/`angles_b` hold the angle (degrees) of
/// each point on that path, index-aligned with `points`. They are empty for
/// lines and beziers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Intersection {
    pub points: Vec<Point2>,
    pub angles_a: Vec<f64>,
    pub angles_b: Vec<f64>,
}

impl Intersection {
    fn swapped(self) -> Self {
        Self {
            points: self.points,
            angles_a: self.angles_b,
            angles_b: self.angles_a,
        }
    }
}

/// How two paths relate.
#[derive(Debug, Clone, PartialEq)]
pub enum PathRelation {
    Disjoint,
    Crossing(Intersection),
    /// The paths share a stretch of curve (collinear lines, arcs on the same
    /// circle), so there is no finite set of crossing points.
    Overlapping,
}

impl PathRelation {
    /// The crossing, if any.
    #[must_use]
    pub fn into_intersection(self) -> Option<Intersection> {
        match self {
            Self::Crossing(i) => Some(i),
            Self::Disjoint | Self::Overlapping => None,
        }
    }

    /// Returns whether the paths overlap.
    #[must_use]
    pub fn is_overlapping(&self) -> bool {
        matches!(self, Self::Overlapping)
    }
}

/// Computes how two paths intersect.
pub struct Intersect {
    options: IntersectionOptions,
}

impl Intersect {
    /// Creates a new `Intersect` query.
    #[must_use]
    pub fn new(options: IntersectionOptions) -> Self {
        Self { options }
    }

    /// Intersects two paths given in the same coordinate space.
    #[must_use]
    pub fn execute(&self, a: &Path, b: &Path) -> PathRelation {
        match (&a.kind, &b.kind) {
            (PathKind::Bezier(seed), _) => self.bezier(seed, b, false),
            (_, PathKind::Bezier(seed)) => self.bezier(seed, a, true),
            (PathKind::Line(la), PathKind::Line(lb)) => line_line::intersect(la, lb, &self.options),
            (PathKind::Line(_), _) => self.line_round(a, b),
            (_, PathKind::Line(_)) => match self.line_round(b, a) {
                PathRelation::Crossing(i) => PathRelation::Crossing(i.swapped()),
                other => other,
            },
            _ => self.round_round(a, b),
        }
    }

    /// Intersects two paths that live at different offsets.
    #[must_use]
    pub fn execute_at(&self, a: &Path, offset_a: &Vector2, b: &Path, offset_b: &Vector2) -> PathRelation {
        self.execute(&moved_path(a, offset_a), &moved_path(b, offset_b))
    }

    fn line_round(&self, line: &Path, round: &Path) -> PathRelation {
        let (PathKind::Line(l), Some((center, radius, arc))) = (&line.kind, circle_of(round)) else {
            return PathRelation::Disjoint;
        };
        let Some(angles) = line_circle::intersect(l, &center, radius, &self.options) else {
            return PathRelation::Disjoint;
        };
        let angles: Vec<f64> = angles
            .into_iter()
            .filter(|a| arc.is_none_or(|arc| is_between_arc_angles(*a, &arc, self.options.exclude_tangents)))
            .collect();
        if angles.is_empty() {
            return PathRelation::Disjoint;
        }
        PathRelation::Crossing(Intersection {
            points: angles.iter().map(|a| point_on_circle(&center, radius, *a)).collect(),
            angles_a: Vec::new(),
            angles_b: angles,
        })
    }

    fn round_round(&self, a: &Path, b: &Path) -> PathRelation {
        let (Some((ca, ra, arc_a)), Some((cb, rb, arc_b))) = (circle_of(a), circle_of(b)) else {
            return PathRelation::Disjoint;
        };
        match circle_circle::intersect(&ca, ra, &cb, rb, &self.options) {
            CircleCircle::Disjoint => PathRelation::Disjoint,
            CircleCircle::Coincident => match (arc_a, arc_b) {
                (Some(x), Some(y)) => {
                    if is_arc_overlapping(&x, &y, self.options.exclude_tangents) {
                        PathRelation::Overlapping
                    } else {
                        PathRelation::Disjoint
                    }
                }
                _ => PathRelation::Overlapping,
            },
            CircleCircle::Angles(angles_a, angles_b) => {
                let ex = self.options.exclude_tangents;
                let keep = |arc: Option<Arc>, angle: f64| arc.is_none_or(|arc| is_between_arc_angles(angle, &arc, ex));
                let mut out = Intersection::default();
                for (aa, ab) in angles_a.into_iter().zip(angles_b) {
                    if keep(arc_a, aa) && keep(arc_b, ab) {
                        out.points.push(point_on_circle(&ca, ra, aa));
                        out.angles_a.push(aa);
                        out.angles_b.push(ab);
                    }
                }
                if out.points.is_empty() {
                    PathRelation::Disjoint
                } else {
                    PathRelation::Crossing(out)
                }
            }
        }
    }

    fn bezier(&self, seed: &BezierSeed, other: &Path, seed_is_b: bool) -> PathRelation {
        let mut points: Vec<Point2> = Vec::new();
        for piece in BezierToArcs::default().pieces(seed) {
            let relation = if seed_is_b {
                self.execute(other, &piece.path)
            } else {
                self.execute(&piece.path, other)
            };
            if let PathRelation::Crossing(i) = relation {
                for p in i.points {
                    if !points.iter().any(|q| is_point_equal(q, &p, self.options.tolerance.max(1e-6))) {
                        points.push(p);
                    }
                }
            }
        }
        if points.is_empty() {
            PathRelation::Disjoint
        } else {
            PathRelation::Crossing(Intersection {
                points,
                ..Intersection::default()
            })
        }
    }
}

/// Center, radius and (for arcs) the arc of a round path.
fn circle_of(path: &Path) -> Option<(Point2, f64, Option<Arc>)> {
    match &path.kind {
        PathKind::Circle(c) => Some((c.origin, c.radius(), None)),
        PathKind::Arc(a) => Some((a.origin, a.radius(), Some(*a))),
        PathKind::Line(_) | PathKind::Bezier(_) => None,
    }
}

/// Convenience wrapper returning only crossings.
#[must_use]
pub fn intersection(a: &Path, b: &Path, options: &IntersectionOptions) -> Option<Intersection> {
    Intersect::new(*options).execute(a, b).into_intersection()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sorted(mut pts: Vec<Point2>) -> Vec<Point2> {
        pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        pts
    }

    #[test]
    fn symmetric_point_sets() {
        let pairs = [
            (
                Path::line(Point2::new(-3.0, 0.5), Point2::new(3.0, 0.5)),
                Path::circle(Point2::origin(), 2.0).unwrap(),
            ),
            (
                Path::arc(Point2::origin(), 2.0, 0.0, 180.0).unwrap(),
                Path::circle(Point2::new(1.0, 1.0), 2.0).unwrap(),
            ),
            (
                Path::line(Point2::new(0.0, 0.0), Point2::new(4.0, 4.0)),
                Path::line(Point2::new(0.0, 4.0), Point2::new(4.0, 0.0)),
            ),
        ];
        let opts = IntersectionOptions::default();
        for (a, b) in &pairs {
            let ab = intersection(a, b, &opts).unwrap();
            let ba = intersection(b, a, &opts).unwrap();
            let (pa, pb) = (sorted(ab.points.clone()), sorted(ba.points.clone()));
            assert_eq!(pa.len(), pb.len());
            for (p, q) in pa.iter().zip(&pb) {
                assert!(nalgebra::distance(p, q) < 1e-9);
            }
            assert_eq!(ab.angles_a.len(), ba.angles_b.len());
            assert_eq!(ab.angles_b.len(), ba.angles_a.len());
            for (i, p) in ab.points.iter().enumerate() {
                let j = ba.points.iter().position(|q| nalgebra::distance(p, q) < 1e-9).unwrap();
                if !ab.angles_a.is_empty() {
                    assert!(crate::math::angle::is_angle_equal(ab.angles_a[i], ba.angles_b[j], 1e-9));
                }
                if !ab.angles_b.is_empty() {
                    assert!(crate::math::angle::is_angle_equal(ab.angles_b[i], ba.angles_a[j], 1e-9));
                }
            }
        }
    }

    #[test]
    fn arc_filters_circle_hits() {
        let line = Path::line(Point2::new(-3.0, 0.0), Point2::new(3.0, 0.0));
        let upper = Path::arc(Point2::origin(), 2.0, 10.0, 170.0).unwrap();
        assert!(intersection(&line, &upper, &IntersectionOptions::default()).is_none());
        let right = Path::arc(Point2::origin(), 2.0, 270.0, 90.0).unwrap();
        let hit = intersection(&line, &right, &IntersectionOptions::default()).unwrap();
        assert_eq!(hit.points.len(), 1);
        assert!((hit.points[0].x - 2.0).abs() < 1e-9);
        assert!(hit.angles_a.is_empty());
        assert_eq!(hit.angles_b.len(), 1);
    }

    #[test]
    fn arcs_on_same_circle_overlap() {
        let a = Path::arc(Point2::origin(), 1.0, 0.0, 90.0).unwrap();
        let b = Path::arc(Point2::origin(), 1.0, 45.0, 135.0).unwrap();
        let c = Path::arc(Point2::origin(), 1.0, 180.0, 270.0).unwrap();
        let op = Intersect::new(IntersectionOptions::default());
        assert!(op.execute(&a, &b).is_overlapping());
        assert_eq!(op.execute(&a, &c), PathRelation::Disjoint);
        assert!(op.execute(&a, &Path::circle(Point2::origin(), 1.0).unwrap()).is_overlapping());
    }

    #[test]
    fn offsets_are_applied() {
        let a = Path::line(Point2::new(0.0, -1.0), Point2::new(0.0, 1.0));
        let b = Path::line(Point2::new(-1.0, 0.0), Point2::new(1.0, 0.0));
        let op = Intersect::new(IntersectionOptions::default());
        let r = op.execute_at(&a, &Vector2::new(5.0, 0.0), &b, &Vector2::new(5.0, 0.0));
        let i = r.into_intersection().unwrap();
        assert!((i.points[0].x - 5.0).abs() < 1e-12);
        assert!(op
            .execute_at(&a, &Vector2::new(5.0, 0.0), &b, &Vector2::zeros())
            .into_intersection()
            .is_none());
    }

    #[test]
    fn bezier_crosses_line() {
        let seed = BezierSeed::quadratic(Point2::new(0.0, 0.0), Point2::new(1.0, 2.0), Point2::new(2.0, 0.0));
        let line = Path::line(Point2::new(-1.0, 0.5), Point2::new(3.0, 0.5));
        let hit = intersection(&Path::from(seed), &line, &IntersectionOptions::default()).unwrap();
        assert_eq!(hit.points.len(), 2);
        for p in hit.points {
            assert!((p.y - 0.5).abs() < 1e-9);
        }
    }
}
