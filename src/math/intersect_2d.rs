//! Intersections of unbounded lines and full circles.
//!
//! These ignore segment and sweep limits; callers filter the results
//! against the actual paths.

use super::{Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(p1: &Point2, d1: &Vector2, p2: &Point2, d2: &Vector2) -> Option<(f64, f64)> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() < TOLERANCE {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    let u = (dx * d1.y - dy * d1.x) / cross;
    Some((t, u))
}

/// Points where the line `p + t * d` meets the circle `(center, radius)`.
#[must_use]
pub fn line_circle_points(p: &Point2, d: &Vector2, center: &Point2, radius: f64) -> Vec<Point2> {
    let a = d.norm_squared();
    if a < TOLERANCE * TOLERANCE || radius < TOLERANCE {
        return Vec::new();
    }

    // Substitute the parametric line into the circle equation:
    // |p + t*d - c|² = r²
    let f = *p - *center;
    let b = 2.0 * f.dot(d);
    let c = f.norm_squared() - radius * radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < -TOLERANCE {
        return Vec::new();
    }
    let disc_sqrt = discriminant.max(0.0).sqrt();
    if disc_sqrt < TOLERANCE {
        return vec![*p + *d * (-b / (2.0 * a))];
    }
    [(-b - disc_sqrt) / (2.0 * a), (-b + disc_sqrt) / (2.0 * a)]
        .into_iter()
        .map(|t| *p + *d * t)
        .collect()
}

/// Points where two full circles meet. Concentric circles yield nothing.
#[must_use]
pub fn circle_circle_points(c1: &Point2, r1: f64, c2: &Point2, r2: f64) -> Vec<Point2> {
    if r1 < TOLERANCE || r2 < TOLERANCE {
        return Vec::new();
    }
    let delta = *c2 - *c1;
    let dist_sq = delta.norm_squared();
    let dist = dist_sq.sqrt();
    if dist < TOLERANCE {
        return Vec::new();
    }
    if dist > r1 + r2 + TOLERANCE || dist < (r1 - r2).abs() - TOLERANCE {
        return Vec::new();
    }

    // Distance from c1 along c1→c2 to the radical line.
    let a = (r1 * r1 - r2 * r2 + dist_sq) / (2.0 * dist);
    let h = (r1 * r1 - a * a).max(0.0).sqrt();
    let unit = delta / dist;
    let mid = *c1 + unit * a;
    let perp = Vector2::new(-unit.y, unit.x);
    if h < TOLERANCE {
        vec![mid]
    } else {
        vec![mid + perp * h, mid - perp * h]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn line_line_perpendicular() {
        let (t, u) = line_line_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &Point2::new(0.5, -1.0),
            &Vector2::new(0.0, 1.0),
        )
        .unwrap();
        assert!((t - 0.5).abs() < TOLERANCE);
        assert!((u - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn line_line_parallel_returns_none() {
        assert!(line_line_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &Point2::new(0.0, 1.0),
            &Vector2::new(2.0, 0.0),
        )
        .is_none());
    }

    #[test]
    fn line_circle_cases() {
        let center = Point2::origin();
        let d = Vector2::new(1.0, 0.0);
        assert_eq!(line_circle_points(&Point2::new(-5.0, 0.0), &d, &center, 1.0).len(), 2);
        let tangent = line_circle_points(&Point2::new(-5.0, 1.0), &d, &center, 1.0);
        assert_eq!(tangent.len(), 1);
        assert!(tangent[0].x.abs() < 1e-6);
        assert!(line_circle_points(&Point2::new(-5.0, 2.0), &d, &center, 1.0).is_empty());
    }

    #[test]
    fn circle_circle_cases() {
        let hits = circle_circle_points(&Point2::origin(), 1.0, &Point2::new(1.0, 0.0), 1.0);
        assert_eq!(hits.len(), 2);
        let h = 3.0_f64.sqrt() / 2.0;
        assert!(hits.iter().any(|p| (p.y - h).abs() < 1e-9));
        assert!(hits.iter().any(|p| (p.y + h).abs() < 1e-9));

        let tangent = circle_circle_points(&Point2::origin(), 1.0, &Point2::new(2.0, 0.0), 1.0);
        assert_eq!(tangent.len(), 1);
        assert!((tangent[0].x - 1.0).abs() < 1e-9);

        assert!(circle_circle_points(&Point2::origin(), 1.0, &Point2::new(5.0, 0.0), 1.0).is_empty());
        assert!(circle_circle_points(&Point2::origin(), 1.0, &Point2::origin(), 2.0).is_empty());
    }
}
