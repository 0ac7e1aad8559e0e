use super::Point2;

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns `Some(true)` for a clockwise polygon, `Some(false)` for
/// counter-clockwise, and `None` when the polygon has no area.
#[must_use]
pub fn is_clockwise(points: &[Point2]) -> Option<bool> {
    let area = signed_area_2d(points);
    if area.abs() < f64::EPSILON {
        None
    } else {
        Some(area < 0.0)
    }
}

/// Even-odd point-in-polygon test against a closed polygon.
///
/// Points exactly on the boundary may land on either side.
#[must_use]
pub fn point_in_polygon(point: &Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = &polygon[i];
        let b = &polygon[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn signed_area_ccw_square() {
        assert!((signed_area_2d(&square()) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn clockwise_detection() {
        let mut pts = square();
        assert_eq!(is_clockwise(&pts), Some(false));
        pts.reverse();
        assert_eq!(is_clockwise(&pts), Some(true));
        assert_eq!(is_clockwise(&pts[..2]), None);
    }

    #[test]
    fn point_in_square() {
        let pts = square();
        assert!(point_in_polygon(&Point2::new(0.5, 0.5), &pts));
        assert!(!point_in_polygon(&Point2::new(1.5, 0.5), &pts));
        assert!(!point_in_polygon(&Point2::new(0.5, -0.1), &pts));
    }
}
