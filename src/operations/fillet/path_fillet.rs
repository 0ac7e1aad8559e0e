use crate::error::Result;
use crate::geometry::{Arc, Path, PathKind};
use crate::math::intersect_2d::{circle_circle_points, line_circle_points, line_line_intersect_2d};
use crate::math::{angle, Point2, Vector2, ANGLE_TOLERANCE, TOLERANCE};

use super::{away_direction, check_radius, corner_arc, crop, cross, find_joint, FilletOptions};

/// Offset of a path towards the fillet center.
#[derive(Debug, Clone, Copy)]
enum Guide {
    Line { point: Point2, direction: Vector2 },
    Circle { center: Point2, radius: f64 },
}

/// Rounds the joint between two lines or arcs with a tangent arc.
///
/// Each path is offset by the radius towards the inside of the corner; the
/// offsets cross at the fillet center, and the feet of the perpendiculars
/// from there are the tangent points. Both paths are cropped to their
/// tangent points only when the whole fillet fits.
pub struct Fillet {
    radius: f64,
    options: FilletOptions,
}

impl Fillet {
    /// Creates a new `Fillet` operation.
    #[must_use]
    pub fn new(radius: f64, options: FilletOptions) -> Self {
        Self { radius, options }
    }

    /// Fillets the joint of `a` and `b`, cropping both in place.
    ///
    /// Returns `Ok(None)`, leaving both paths untouched, when the paths do
    /// not share exactly one endpoint, meet tangentially, or are too short
    /// or too tightly curved for the radius.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not strictly positive.
    pub fn execute(&self, a: &mut Path, b: &mut Path) -> Result<Option<Arc>> {
        check_radius(self.radius)?;
        let r = self.radius;
        let Some(joint) = find_joint(a, b, self.options.point_matching_distance) else {
            return Ok(None);
        };
        let (Some(da), Some(db)) = (away_direction(a, joint.a_at_start), away_direction(b, joint.b_at_start)) else {
            return Ok(None);
        };
        let turn = cross(&da, &db);
        if turn.abs() < TOLERANCE {
            return Ok(None);
        }
        let left = |v: &Vector2| Vector2::new(-v.y, v.x);
        let right = |v: &Vector2| Vector2::new(v.y, -v.x);
        let (na, nb) = if turn > 0.0 {
            (left(&da), right(&db))
        } else {
            (right(&da), left(&db))
        };

        let (Some(ga), Some(gb)) = (guide(a, &joint.point, &na, &da, r), guide(b, &joint.point, &nb, &db, r)) else {
            return Ok(None);
        };
        let Some(center) = crossings(&ga, &gb).into_iter().min_by(|p, q| {
            nalgebra::distance(p, &joint.point).total_cmp(&nalgebra::distance(q, &joint.point))
        }) else {
            return Ok(None);
        };
        let (Some(ta), Some(tb)) = (tangent_point(a, &center), tangent_point(b, &center)) else {
            return Ok(None);
        };
        if !fits(a, joint.a_at_start, &ta) || !fits(b, joint.b_at_start, &tb) {
            return Ok(None);
        }

        let arc = corner_arc(&center, r, &ta, &tb, &joint.point)?;
        crop(a, joint.a_at_start, &ta);
        crop(b, joint.b_at_start, &tb);
        Ok(Some(arc))
    }
}

fn guide(path: &Path, joint: &Point2, normal: &Vector2, direction: &Vector2, r: f64) -> Option<Guide> {
    match &path.kind {
        PathKind::Line(_) => Some(Guide::Line {
            point: *joint + *normal * r,
            direction: *direction,
        }),
        PathKind::Arc(arc) => {
            let inward = (arc.origin - *joint).dot(normal) > 0.0;
            let radius = if inward { arc.radius() - r } else { arc.radius() + r };
            (radius > TOLERANCE).then_some(Guide::Circle {
                center: arc.origin,
                radius,
            })
        }
        PathKind::Circle(_) | PathKind::Bezier(_) => None,
    }
}

fn crossings(a: &Guide, b: &Guide) -> Vec<Point2> {
    match (a, b) {
        (Guide::Line { point: p1, direction: d1 }, Guide::Line { point: p2, direction: d2 }) => {
            line_line_intersect_2d(p1, d1, p2, d2)
                .map(|(t, _)| vec![*p1 + *d1 * t])
                .unwrap_or_default()
        }
        (Guide::Line { point, direction }, Guide::Circle { center, radius })
        | (Guide::Circle { center, radius }, Guide::Line { point, direction }) => {
            line_circle_points(point, direction, center, *radius)
        }
        (Guide::Circle { center: c1, radius: r1 }, Guide::Circle { center: c2, radius: r2 }) => {
            circle_circle_points(c1, *r1, c2, *r2)
        }
    }
}

/// Foot of the perpendicular from `center` onto the path's line or circle.
fn tangent_point(path: &Path, center: &Point2) -> Option<Point2> {
    match &path.kind {
        PathKind::Line(l) => {
            let d = l.direction().try_normalize(f64::EPSILON)?;
            Some(l.origin + d * (*center - l.origin).dot(&d))
        }
        PathKind::Arc(a) => {
            let radial = (*center - a.origin).try_normalize(f64::EPSILON)?;
            Some(a.origin + radial * a.radius())
        }
        PathKind::Circle(_) | PathKind::Bezier(_) => None,
    }
}

/// Whether `point` lies on `path` short of its far end, measured from the
/// joint end.
fn fits(path: &Path, at_start: bool, point: &Point2) -> bool {
    match &path.kind {
        PathKind::Line(l) => {
            let (near, far) = if at_start { (l.origin, l.end) } else { (l.end, l.origin) };
            let dir = far - near;
            let len = dir.norm();
            if len < TOLERANCE {
                return false;
            }
            let s = (*point - near).dot(&dir) / len;
            s >= -TOLERANCE && s < len - TOLERANCE
        }
        PathKind::Arc(a) => {
            let at = angle::of_point_in_degrees(&a.origin, point);
            let mut delta = if at_start {
                angle::no_revolutions(at - a.start_angle)
            } else {
                angle::no_revolutions(a.end_angle - at)
            };
            if delta > 360.0 - ANGLE_TOLERANCE {
                delta = 0.0;
            }
            delta < a.span() - ANGLE_TOLERANCE
        }
        PathKind::Circle(_) | PathKind::Bezier(_) => false,
    }
}
