//! Tolerance-aware equality predicates.

use crate::geometry::{Arc, Line, Path, PathKind};
use crate::math::{angle, Point2, ANGLE_TOLERANCE};

use super::point_on_path::{is_between_arc_angles, is_between_points};
use super::slope::{is_slope_equal, line_slope};

pub use crate::math::angle::is_angle_equal;

/// Distance between two points.
#[must_use]
pub fn point_distance(a: &Point2, b: &Point2) -> f64 {
    nalgebra::distance(a, b)
}

/// Returns whether two points are within `tolerance` of each other.
#[must_use]
pub fn is_point_equal(a: &Point2, b: &Point2, tolerance: f64) -> bool {
    point_distance(a, b) <= tolerance
}

/// Returns whether two paths describe the same geometry.
///
/// Lines match in either direction. Layer tags are not compared.
#[must_use]
pub fn is_path_equal(a: &Path, b: &Path, tolerance: f64) -> bool {
    let eq = |p: &Point2, q: &Point2| is_point_equal(p, q, tolerance);
    match (&a.kind, &b.kind) {
        (PathKind::Line(x), PathKind::Line(y)) => {
            (eq(&x.origin, &y.origin) && eq(&x.end, &y.end)) || (eq(&x.origin, &y.end) && eq(&x.end, &y.origin))
        }
        (PathKind::Circle(x), PathKind::Circle(y)) => {
            eq(&x.origin, &y.origin) && (x.radius() - y.radius()).abs() <= tolerance
        }
        (PathKind::Arc(x), PathKind::Arc(y)) => {
            eq(&x.origin, &y.origin)
                && (x.radius() - y.radius()).abs() <= tolerance
                && is_angle_equal(x.start_angle, y.start_angle, ANGLE_TOLERANCE)
                && is_angle_equal(x.end_angle, y.end_angle, ANGLE_TOLERANCE)
        }
        (PathKind::Bezier(x), PathKind::Bezier(y)) => {
            eq(&x.origin, &y.origin)
                && eq(&x.end, &y.end)
                && x.controls().len() == y.controls().len()
                && x.controls().iter().zip(y.controls()).all(|(p, q)| eq(p, q))
        }
        _ => false,
    }
}

/// Returns whether two lines lie on the same infinite line and share more
/// than a point.
///
/// With `exclude_tangents`, lines that merely touch end to end do not count.
/// Identical lines always overlap.
#[must_use]
pub fn is_line_overlapping(a: &Line, b: &Line, exclude_tangents: bool) -> bool {
    if !is_slope_equal(&line_slope(a), &line_slope(b)) {
        return false;
    }
    let tol = crate::math::TOLERANCE;
    let check = |x: &Line, y: &Line| {
        is_between_points(&x.origin, y, exclude_tangents, tol) || is_between_points(&x.end, y, exclude_tangents, tol)
    };
    check(a, b) || check(b, a) || is_path_equal(&Path::from(*a), &Path::from(*b), tol)
}

/// Returns whether two arcs on the same circle share part of their sweep.
#[must_use]
pub fn is_arc_overlapping(a: &Arc, b: &Arc, exclude_tangents: bool) -> bool {
    let tol = crate::math::TOLERANCE;
    if !is_point_equal(&a.origin, &b.origin, tol) || (a.radius() - b.radius()).abs() > tol {
        return false;
    }
    let check = |x: &Arc, y: &Arc| {
        is_between_arc_angles(y.start_angle, x, exclude_tangents) || is_between_arc_angles(y.end_angle, x, exclude_tangents)
    };
    check(a, b)
        || check(b, a)
        || (angle::is_angle_equal(a.start_angle, b.start_angle, ANGLE_TOLERANCE)
            && angle::is_angle_equal(a.end_angle, b.end_angle, ANGLE_TOLERANCE))
}
