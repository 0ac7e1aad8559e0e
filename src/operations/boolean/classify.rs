use tracing::trace;

use crate::geometry::Path;
use crate::math::{point_from_polar, Point2, Vector2};
use crate::model::{Model, Route};
use crate::operations::intersect::{Intersect, IntersectionOptions, PathRelation};
use crate::operations::query::{path_distance, path_extents_at, Atlas, Extents};
use crate::operations::transform::moved_path;

/// Distance under which a point counts as lying on a path.
const BOUNDARY_DISTANCE: f64 = 1e-6;

/// Minimum clearance between a ray and any path endpoint it passes.
const VERTEX_CLEARANCE: f64 = 1e-5;

/// Cosine between ray and radius under which a round hit counts as grazing.
const GRAZING_COSINE: f64 = 1e-3;

/// Far points tried on a ring around the model after the corner candidate.
const RING_CANDIDATES: u32 = 12;

/// Classification of a point relative to a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClassification {
    Inside,
    Outside,
    OnBoundary,
}

/// Options for [`PointContainment`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainmentOptions<'a> {
    /// Ray target tried before any automatic candidate.
    pub far_point: Option<Point2>,
    /// Pre-measured path extents of the model, keyed by route.
    pub atlas: Option<&'a Atlas>,
    /// Extra region every automatic far point must stay clear of.
    pub bounds: Option<Extents>,
}

/// A path in absolute coordinates, with the route and offset it came from.
#[derive(Debug, Clone)]
pub(super) struct PlacedPath {
    pub route: Route,
    pub offset: Vector2,
    pub path: Path,
    pub extents: Extents,
}

/// Moves every path of `model` to absolute coordinates.
pub(super) fn place_paths(model: &Model, atlas: Option<&Atlas>) -> Vec<PlacedPath> {
    model
        .walk_paths(false)
        .into_iter()
        .map(|walked| {
            let extents = atlas
                .and_then(|a| a.path(&walked.route).copied())
                .unwrap_or_else(|| path_extents_at(walked.path, &walked.offset));
            PlacedPath {
                path: moved_path(walked.path, &walked.offset),
                route: walked.route,
                offset: walked.offset,
                extents,
            }
        })
        .collect()
}

enum RayCastResult {
    Clear(PointClassification),
    Degenerate,
}

/// Inside/outside tests against one model, prepared for repeated queries.
///
/// Classification casts a segment from the point to a far point outside the
/// model and counts crossings: odd is inside, even is outside. A ray that
/// passes near a path endpoint, grazes a round path, or runs along a path is
/// degenerate and the next far point is tried. The candidates are the
/// caller's far point, a point beyond the high corner of the bounds, then a
/// ring of irregularly spaced points around them.
#[derive(Debug, Clone)]
pub struct PointContainment {
    paths: Vec<PlacedPath>,
    extents: Option<Extents>,
    far_points: Vec<Point2>,
}

impl PointContainment {
    /// Prepares `model` for containment queries.
    #[must_use]
    pub fn new(model: &Model, options: &ContainmentOptions<'_>) -> Self {
        Self::from_placed(place_paths(model, options.atlas), options.bounds, options.far_point)
    }

    pub(super) fn from_placed(paths: Vec<PlacedPath>, bounds: Option<Extents>, far_point: Option<Point2>) -> Self {
        let extents = paths.iter().map(|p| p.extents).reduce(|a, b| a.union(&b));
        let region = match (extents, bounds) {
            (Some(e), Some(b)) => Some(e.union(&b)),
            (e, b) => e.or(b),
        };
        let far_points = region.map_or_else(Vec::new, |r| far_point_candidates(&r, far_point));
        Self {
            paths,
            extents,
            far_points,
        }
    }

    /// Classifies `point` against the model.
    #[must_use]
    pub fn classify(&self, point: &Point2) -> PointClassification {
        let Some(extents) = self.extents else {
            return PointClassification::Outside;
        };
        if !extents.contains_point(point, BOUNDARY_DISTANCE) {
            return PointClassification::Outside;
        }
        let on_boundary = self.paths.iter().any(|placed| {
            placed.extents.contains_point(point, BOUNDARY_DISTANCE)
                && path_distance(point, &placed.path) <= BOUNDARY_DISTANCE
        });
        if on_boundary {
            return PointClassification::OnBoundary;
        }

        for far in &self.far_points {
            if let RayCastResult::Clear(classification) = self.ray_cast(point, far) {
                return classification;
            }
        }

        // Every ray was degenerate; count with touching hits dropped.
        trace!(x = point.x, y = point.y, "all far points degenerate");
        self.far_points
            .last()
            .map_or(PointClassification::Outside, |far| self.parity_excluding_tangents(point, far))
    }

    fn candidates<'p>(&'p self, ray: &'p Extents) -> impl Iterator<Item = &'p PlacedPath> + 'p {
        self.paths
            .iter()
            .filter(move |placed| placed.extents.overlaps(ray, VERTEX_CLEARANCE))
    }

    fn ray_cast(&self, point: &Point2, far: &Point2) -> RayCastResult {
        let ray = Path::line(*point, *far);
        let ray_extents = Extents::new(*point, *far);
        let direction = (*far - *point).normalize();
        let intersect = Intersect::new(IntersectionOptions::default());
        let mut crossings = 0usize;

        for placed in self.candidates(&ray_extents) {
            // Passing through a vertex counts once or twice depending on round-off.
            if let Some((start, end)) = placed.path.endpoints() {
                if path_distance(&start, &ray) < VERTEX_CLEARANCE || path_distance(&end, &ray) < VERTEX_CLEARANCE {
                    return RayCastResult::Degenerate;
                }
            }
            match intersect.execute(&ray, &placed.path) {
                PathRelation::Disjoint => {}
                PathRelation::Overlapping => return RayCastResult::Degenerate,
                PathRelation::Crossing(hit) => {
                    if hit.points.iter().any(|p| is_grazing(p, &direction, &placed.path)) {
                        return RayCastResult::Degenerate;
                    }
                    crossings += hit.points.len();
                }
            }
        }

        if crossings % 2 == 1 {
            RayCastResult::Clear(PointClassification::Inside)
        } else {
            RayCastResult::Clear(PointClassification::Outside)
        }
    }

    fn parity_excluding_tangents(&self, point: &Point2, far: &Point2) -> PointClassification {
        let ray = Path::line(*point, *far);
        let ray_extents = Extents::new(*point, *far);
        let intersect = Intersect::new(IntersectionOptions {
            exclude_tangents: true,
            ..IntersectionOptions::default()
        });
        let crossings: usize = self
            .candidates(&ray_extents)
            .filter_map(|placed| intersect.execute(&ray, &placed.path).into_intersection())
            .map(|hit| hit.points.len())
            .sum();
        if crossings % 2 == 1 {
            PointClassification::Inside
        } else {
            PointClassification::Outside
        }
    }
}

/// Whether the ray meets a round path almost perpendicular to its radius.
fn is_grazing(hit: &Point2, direction: &Vector2, path: &Path) -> bool {
    let Some(center) = path.center() else {
        return false;
    };
    let radial = *hit - center;
    let length = radial.norm();
    length > 0.0 && (direction.dot(&radial) / length).abs() < GRAZING_COSINE
}

fn far_point_candidates(region: &Extents, explicit: Option<Point2>) -> Vec<Point2> {
    let margin = (region.diagonal() * 0.1).max(1.0);
    let center = region.center();
    let radius = region.diagonal() / 2.0 + margin;

    let mut out = Vec::with_capacity(2 + RING_CANDIDATES as usize);
    out.extend(explicit);
    out.push(region.high + Vector2::new(margin, margin * 0.618));
    out.extend((0..RING_CANDIDATES).map(|k| center + point_from_polar(23.0 + 47.3 * f64::from(k), radius)));
    out
}

/// Returns whether `point` is strictly inside the closed shapes of `model`.
///
/// Points on a path count as outside.
#[must_use]
pub fn is_point_inside_model(point: &Point2, model: &Model, options: &ContainmentOptions<'_>) -> bool {
    PointContainment::new(model, options).classify(point) == PointClassification::Inside
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square(size: f64) -> Model {
        let c = [
            Point2::new(0.0, 0.0),
            Point2::new(size, 0.0),
            Point2::new(size, size),
            Point2::new(0.0, size),
        ];
        let mut model = Model::new();
        for i in 0..4 {
            model.add_path(i.to_string(), Path::line(c[i], c[(i + 1) % 4])).unwrap();
        }
        model
    }

    #[test]
    fn square_inside_outside_boundary() {
        let containment = PointContainment::new(&square(10.0), &ContainmentOptions::default());
        assert_eq!(containment.classify(&Point2::new(3.0, 4.0)), PointClassification::Inside);
        assert_eq!(containment.classify(&Point2::new(12.0, 4.0)), PointClassification::Outside);
        assert_eq!(containment.classify(&Point2::new(10.0, 4.0)), PointClassification::OnBoundary);
    }

    #[test]
    fn ray_through_vertex_is_retried() {
        // Aimed straight at the (10, 10) corner.
        let options = ContainmentOptions {
            far_point: Some(Point2::new(20.0, 20.0)),
            ..ContainmentOptions::default()
        };
        assert!(is_point_inside_model(&Point2::new(5.0, 5.0), &square(10.0), &options));
    }

    #[test]
    fn circle_with_hole() {
        let mut model = Model::new();
        model.add_path("outer", Path::circle(Point2::origin(), 10.0).unwrap()).unwrap();
        model.add_path("inner", Path::circle(Point2::origin(), 4.0).unwrap()).unwrap();
        let options = ContainmentOptions::default();
        assert!(is_point_inside_model(&Point2::new(7.0, 0.0), &model, &options));
        assert!(!is_point_inside_model(&Point2::new(1.0, 1.0), &model, &options));
        assert!(!is_point_inside_model(&Point2::new(11.0, 0.0), &model, &options));
    }

    #[test]
    fn nested_offsets_are_applied() {
        let inner = square(2.0).with_origin(Point2::new(50.0, 50.0));
        let mut model = Model::new();
        model.add_model("sq", inner).unwrap();
        let atlas = Atlas::measure(&model);
        let options = ContainmentOptions {
            atlas: Some(&atlas),
            ..ContainmentOptions::default()
        };
        assert!(is_point_inside_model(&Point2::new(51.0, 51.0), &model, &options));
        assert!(!is_point_inside_model(&Point2::new(1.0, 1.0), &model, &options));
    }

    #[test]
    fn empty_model_contains_nothing() {
        let containment = PointContainment::new(&Model::new(), &ContainmentOptions::default());
        assert_eq!(containment.classify(&Point2::origin()), PointClassification::Outside);
    }
}
