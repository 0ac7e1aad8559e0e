//! Tangent arcs at path joints: fillets, dogbones and whole-chain rounding.

mod chain_corners;
mod dogbone;
mod path_fillet;

pub use chain_corners::{ChainCorners, CornerStyle};
pub use dogbone::Dogbone;
pub use path_fillet::Fillet;

use crate::error::{OperationError, Result};
use crate::geometry::{Arc, Path, PathKind};
use crate::math::{angle, point_from_polar, Point2, Vector2, POINT_MATCHING_DISTANCE};

/// Options shared by [`Fillet`] and [`Dogbone`].
#[derive(Debug, Clone, Copy)]
pub struct FilletOptions {
    /// Endpoints closer than this count as the shared joint.
    pub point_matching_distance: f64,
}

impl Default for FilletOptions {
    fn default() -> Self {
        Self {
            point_matching_distance: POINT_MATCHING_DISTANCE,
        }
    }
}

/// The endpoint two paths share.
#[derive(Debug, Clone, Copy)]
struct Joint {
    point: Point2,
    a_at_start: bool,
    b_at_start: bool,
}

/// Finds the single endpoint `a` and `b` have in common.
fn find_joint(a: &Path, b: &Path, distance: f64) -> Option<Joint> {
    let (a0, a1) = a.endpoints()?;
    let (b0, b1) = b.endpoints()?;
    let mut found = None;
    for (pa, a_at_start) in [(a0, true), (a1, false)] {
        for (pb, b_at_start) in [(b0, true), (b1, false)] {
            if nalgebra::distance(&pa, &pb) <= distance {
                if found.is_some() {
                    return None;
                }
                found = Some(Joint {
                    point: pa,
                    a_at_start,
                    b_at_start,
                });
            }
        }
    }
    found
}

/// Unit tangent leaving the joint along `path`.
fn away_direction(path: &Path, at_start: bool) -> Option<Vector2> {
    let v = match &path.kind {
        PathKind::Line(l) => {
            if at_start {
                l.end - l.origin
            } else {
                l.origin - l.end
            }
        }
        PathKind::Arc(a) => {
            if at_start {
                point_from_polar(a.start_angle + 90.0, 1.0)
            } else {
                point_from_polar(a.end_angle - 90.0, 1.0)
            }
        }
        PathKind::Circle(_) | PathKind::Bezier(_) => return None,
    };
    v.try_normalize(f64::EPSILON)
}

/// Moves the joint end of `path` to `point`.
fn crop(path: &mut Path, at_start: bool, point: &Point2) {
    match &mut path.kind {
        PathKind::Line(l) => {
            if at_start {
                l.origin = *point;
            } else {
                l.end = *point;
            }
        }
        PathKind::Arc(a) => {
            let at = angle::of_point_in_degrees(&a.origin, point);
            if at_start {
                a.start_angle = at;
            } else {
                a.end_angle = at;
            }
        }
        PathKind::Circle(_) | PathKind::Bezier(_) => {}
    }
}

/// The arc of `(center, radius)` from `ta` to `tb` that passes the joint's
/// side of the circle.
fn corner_arc(center: &Point2, radius: f64, ta: &Point2, tb: &Point2, joint: &Point2) -> Result<Arc> {
    let a1 = angle::of_point_in_degrees(center, ta);
    let a2 = angle::of_point_in_degrees(center, tb);
    let aj = angle::of_point_in_degrees(center, joint);
    let (start, end) = if angle::is_within_span(aj, a1, angle::no_revolutions(a2 - a1), false, 0.0) {
        (a1, a2)
    } else {
        (a2, a1)
    };
    Arc::new(*center, radius, start, end)
}

fn check_radius(radius: f64) -> Result<()> {
    if radius > 0.0 && radius.is_finite() {
        Ok(())
    } else {
        Err(OperationError::InvalidInput(format!("corner radius must be positive, got {radius}")).into())
    }
}

fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}
