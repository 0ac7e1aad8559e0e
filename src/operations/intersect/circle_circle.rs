use crate::math::{angle, Point2};

use super::IntersectionOptions;

/// Raw relation between two full circles.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum CircleCircle {
    Disjoint,
    /// Same center and radius.
    Coincident,
    /// Index-aligned angles (degrees) on the first and second circle.
    Angles(Vec<f64>, Vec<f64>),
}

/// Angle opposite side `a` in the triangle with sides `a`, `b`, `c`.
fn solve_triangle_sss(a: f64, b: f64, c: f64) -> f64 {
    ((b * b + c * c - a * a) / (2.0 * b * c)).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Intersects two circles.
///
/// The first circle is moved to the origin and the second rotated onto the
/// positive x axis at distance `x`; the triangle `(r1, r2, x)` then gives the
/// crossing angles, mirrored across the axis.
pub(super) fn intersect(c1: &Point2, r1: f64, c2: &Point2, r2: f64, options: &IntersectionOptions) -> CircleCircle {
    let tol = options.tolerance;
    let distance = nalgebra::distance(c1, c2);
    if distance <= tol.max(1e-4) && (r1 - r2).abs() <= tol {
        return CircleCircle::Coincident;
    }

    let c2_angle = angle::of_point_in_degrees(c1, c2);
    let un_rotate = |a: f64| angle::no_revolutions(a + c2_angle);
    let x = distance;

    // Too far apart.
    if x - r2 - r1 > tol {
        return CircleCircle::Disjoint;
    }
    // Second circle strictly inside the first.
    if x + r2 < r1 - tol {
        return CircleCircle::Disjoint;
    }
    // First circle strictly inside the second.
    if x - r2 < -r1 - tol {
        return CircleCircle::Disjoint;
    }

    let tangent = |a: f64, b: f64| {
        if options.exclude_tangents {
            CircleCircle::Disjoint
        } else {
            CircleCircle::Angles(vec![un_rotate(a)], vec![un_rotate(b)])
        }
    };
    if (x - r2 + r1).abs() <= tol {
        return tangent(180.0, 180.0);
    }
    if (x - r2 - r1).abs() <= tol {
        return tangent(0.0, 180.0);
    }
    if (x + r2 - r1).abs() <= tol {
        return tangent(0.0, 0.0);
    }

    let a1 = solve_triangle_sss(r2, r1, x);
    let a2 = 180.0 - solve_triangle_sss(r1, x, r2);
    let both = |a: f64| vec![un_rotate(a), un_rotate(angle::mirror(a, false, true))];
    CircleCircle::Angles(both(a1), both(a2))
}
