use crate::error::Result;
use crate::geometry::{Arc, Path, PathKind};
use crate::math::TOLERANCE;

use super::{away_direction, check_radius, corner_arc, crop, find_joint, FilletOptions};

/// Relief arc at the corner of two lines, for tools that cannot cut a sharp
/// inside corner.
///
/// The circle passes through the corner with its center on the bisector,
/// so the arc bulges past the corner. Each line is cropped where it meets
/// the circle, `2r·cos(θ/2)` from the corner.
pub struct Dogbone {
    radius: f64,
    options: FilletOptions,
}

impl Dogbone {
    /// Creates a new `Dogbone` operation.
    #[must_use]
    pub fn new(radius: f64, options: FilletOptions) -> Self {
        Self { radius, options }
    }

    /// Cuts a dogbone into the joint of lines `a` and `b`, cropping both.
    ///
    /// Returns `Ok(None)`, leaving both paths untouched, for non-lines,
    /// unjoined or collinear lines, and lines too short for the radius.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not strictly positive.
    pub fn execute(&self, a: &mut Path, b: &mut Path) -> Result<Option<Arc>> {
        check_radius(self.radius)?;
        let (PathKind::Line(la), PathKind::Line(lb)) = (&a.kind, &b.kind) else {
            return Ok(None);
        };
        let (len_a, len_b) = (la.direction().norm(), lb.direction().norm());
        let Some(joint) = find_joint(a, b, self.options.point_matching_distance) else {
            return Ok(None);
        };
        let (Some(da), Some(db)) = (away_direction(a, joint.a_at_start), away_direction(b, joint.b_at_start)) else {
            return Ok(None);
        };
        let theta = da.dot(&db).clamp(-1.0, 1.0).acos();
        if theta < 1e-6 || std::f64::consts::PI - theta < 1e-6 {
            return Ok(None);
        }

        let r = self.radius;
        let cut = 2.0 * r * (theta / 2.0).cos();
        if cut >= len_a - TOLERANCE || cut >= len_b - TOLERANCE {
            return Ok(None);
        }
        let Some(bisector) = (da + db).try_normalize(f64::EPSILON) else {
            return Ok(None);
        };
        let center = joint.point + bisector * r;
        let ta = joint.point + da * cut;
        let tb = joint.point + db * cut;

        let arc = corner_arc(&center, r, &ta, &tb, &joint.point)?;
        crop(a, joint.a_at_start, &ta);
        crop(b, joint.b_at_start, &tb);
        Ok(Some(arc))
    }
}
