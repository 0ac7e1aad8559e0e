use crate::geometry::Line;
use crate::math::Point2;

/// Run below which a line is treated as vertical.
const VERTICAL_TOLERANCE: f64 = 1e-6;

/// Slope difference below which two lines are parallel.
const PARALLEL_TOLERANCE: f64 = 1e-5;

/// Slope-intercept form of a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slope {
    /// `false` for vertical lines, where `slope` and `y_intercept` are meaningless.
    pub has_slope: bool,
    pub slope: f64,
    pub y_intercept: f64,
    pub line: Line,
}

/// Computes the slope form of a line.
#[must_use]
pub fn line_slope(line: &Line) -> Slope {
    let dx = line.end.x - line.origin.x;
    if dx.abs() <= VERTICAL_TOLERANCE {
        return Slope {
            has_slope: false,
            slope: f64::INFINITY,
            y_intercept: f64::NAN,
            line: *line,
        };
    }
    let slope = (line.end.y - line.origin.y) / dx;
    Slope {
        has_slope: true,
        slope,
        y_intercept: line.origin.y - slope * line.origin.x,
        line: *line,
    }
}

/// Returns whether two slopes are parallel (both vertical, or equal slope).
#[must_use]
pub fn is_slope_parallel(a: &Slope, b: &Slope) -> bool {
    match (a.has_slope, b.has_slope) {
        (false, false) => true,
        (true, true) => (a.slope - b.slope).abs() <= PARALLEL_TOLERANCE,
        _ => false,
    }
}

/// Returns whether two slopes describe the same infinite line.
#[must_use]
pub fn is_slope_equal(a: &Slope, b: &Slope) -> bool {
    if !is_slope_parallel(a, b) {
        return false;
    }
    if a.has_slope {
        (a.y_intercept - b.y_intercept).abs() <= PARALLEL_TOLERANCE
    } else {
        (a.line.origin.x - b.line.origin.x).abs() <= PARALLEL_TOLERANCE
    }
}

/// Crossing point of the infinite lines through `a` and `b`.
///
/// Returns `None` for parallel lines.
#[must_use]
pub fn slope_intersection_point(a: &Line, b: &Line) -> Option<Point2> {
    let sa = line_slope(a);
    let sb = line_slope(b);
    if is_slope_parallel(&sa, &sb) {
        return None;
    }
    let point = if !sa.has_slope {
        vertical_intersection(a, &sb)
    } else if !sb.has_slope {
        vertical_intersection(b, &sa)
    } else {
        let x = (sb.y_intercept - sa.y_intercept) / (sa.slope - sb.slope);
        Point2::new(x, sa.slope * x + sa.y_intercept)
    };
    Some(point)
}

fn vertical_intersection(vertical: &Line, other: &Slope) -> Point2 {
    let x = vertical.origin.x;
    Point2::new(x, other.slope * x + other.y_intercept)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(ax: f64, ay: f64, bx: f64, by: f64) -> Line {
        Line::new(Point2::new(ax, ay), Point2::new(bx, by))
    }

    #[test]
    fn vertical_has_no_slope() {
        assert!(!line_slope(&line(1.0, 0.0, 1.0, 5.0)).has_slope);
        let s = line_slope(&line(0.0, 1.0, 2.0, 5.0));
        assert!((s.slope - 2.0).abs() < 1e-12);
        assert!((s.y_intercept - 1.0).abs() < 1e-12);
    }

    #[test]
    fn parallel_and_equal() {
        let a = line_slope(&line(0.0, 0.0, 1.0, 1.0));
        let b = line_slope(&line(0.0, 1.0, 1.0, 2.0));
        let c = line_slope(&line(2.0, 2.0, 3.0, 3.0));
        assert!(is_slope_parallel(&a, &b));
        assert!(!is_slope_equal(&a, &b));
        assert!(is_slope_equal(&a, &c));
    }

    #[test]
    fn crossing_with_vertical() {
        let p = slope_intersection_point(&line(5.0, -5.0, 5.0, 5.0), &line(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert!((p.x - 5.0).abs() < 1e-12 && (p.y - 5.0).abs() < 1e-12);
        assert!(slope_intersection_point(&line(0.0, 0.0, 1.0, 0.0), &line(0.0, 1.0, 1.0, 1.0)).is_none());
    }
}
