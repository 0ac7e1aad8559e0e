use crate::math::{midpoint, Point2, Vector2, TOLERANCE};

use super::Curve;

/// A straight segment from `origin` to `end`.
///
/// A zero-length line is permitted; it measures as an empty box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Start point.
    pub origin: Point2,
    /// End point.
    pub end: Point2,
}

impl Line {
    /// Creates a new line.
    #[must_use]
    pub fn new(origin: Point2, end: Point2) -> Self {
        Self { origin, end }
    }

    /// Returns the same segment traversed from `end` to `origin`.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.origin)
    }

    /// Vector from `origin` to `end`.
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        self.end - self.origin
    }

    /// Midpoint of the segment.
    #[must_use]
    pub fn middle(&self) -> Point2 {
        midpoint(&self.origin, &self.end)
    }

    /// Returns whether the segment has (near) zero length.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.direction().norm() < TOLERANCE
    }
}

impl Curve for Line {
    fn evaluate(&self, ratio: f64) -> Point2 {
        self.origin + self.direction() * ratio
    }

    fn tangent(&self, _ratio: f64) -> Vector2 {
        self.direction()
    }

    fn endpoints(&self) -> Option<(Point2, Point2)> {
        Some((self.origin, self.end))
    }

    fn length(&self) -> f64 {
        self.direction().norm()
    }

    fn is_closed(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_and_length() {
        let l = Line::new(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0));
        assert!((l.length() - 5.0).abs() < 1e-12);
        let p = l.evaluate(0.5);
        assert!((p.x - 1.5).abs() < 1e-12);
        assert!((p.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn reversed_swaps_ends() {
        let l = Line::new(Point2::new(1.0, 2.0), Point2::new(3.0, 4.0)).reversed();
        assert_eq!(l.origin, Point2::new(3.0, 4.0));
        assert_eq!(l.end, Point2::new(1.0, 2.0));
    }

    #[test]
    fn zero_length_is_degenerate() {
        let l = Line::new(Point2::new(1.0, 1.0), Point2::new(1.0, 1.0));
        assert!(l.is_degenerate());
        assert!(l.length().abs() < f64::EPSILON);
    }
}
