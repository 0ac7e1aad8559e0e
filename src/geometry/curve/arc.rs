use crate::error::Result;
use crate::math::{
    angle,
    arc_2d::{arc_angles_through, circle_from_three_points, point_on_circle},
    point_from_polar, round, Point2, Vector2,
};

use super::circle::validate_radius;
use super::Curve;

/// A circular arc swept counter-clockwise from `start_angle` to `end_angle`.
///
/// Angles are in degrees. An end angle numerically below the start angle
/// wraps through 360, so `Arc(300, 60)` sweeps 120 degrees. Endpoints are
/// always derived from center, radius and angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    /// Center point.
    pub origin: Point2,
    radius: f64,
    /// Start angle in degrees.
    pub start_angle: f64,
    /// End angle in degrees.
    pub end_angle: f64,
}

impl Arc {
    /// Creates a new arc.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not strictly positive or an angle
    /// is not finite.
    pub fn new(origin: Point2, radius: f64, start_angle: f64, end_angle: f64) -> Result<Self> {
        validate_radius(radius)?;
        if !start_angle.is_finite() || !end_angle.is_finite() {
            return Err(crate::error::GeometryError::NonFinite("arc angle").into());
        }
        Ok(Self {
            origin,
            radius,
            start_angle,
            end_angle,
        })
    }

    /// The arc through three points, passing through `middle`.
    ///
    /// Returns `None` when the points are collinear.
    #[must_use]
    pub fn from_three_points(start: &Point2, middle: &Point2, end: &Point2) -> Option<Self> {
        let (center, radius) = circle_from_three_points(start, middle, end)?;
        let (start_angle, end_angle) = arc_angles_through(&center, start, middle, end);
        Some(Self {
            origin: center,
            radius,
            start_angle,
            end_angle,
        })
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Replaces the radius.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not strictly positive.
    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        validate_radius(radius)?;
        self.radius = radius;
        Ok(())
    }

    /// End angle adjusted to be at or past the start angle.
    #[must_use]
    pub fn normalized_end_angle(&self) -> f64 {
        if self.end_angle < self.start_angle {
            let revolutions = ((self.start_angle - self.end_angle) / 360.0).ceil();
            revolutions * 360.0 + self.end_angle
        } else {
            self.end_angle
        }
    }

    /// Swept angle in degrees, in `[0, 360]`.
    #[must_use]
    pub fn span(&self) -> f64 {
        let span = self.normalized_end_angle() - self.start_angle;
        if round(span, 1e-7) > 360.0 {
            angle::no_revolutions(span)
        } else {
            span
        }
    }

    /// Point on the arc's circle at `angle` degrees.
    #[must_use]
    pub fn point_at_angle(&self, angle: f64) -> Point2 {
        point_on_circle(&self.origin, self.radius, angle)
    }

    /// Point at the start angle.
    #[must_use]
    pub fn start_point(&self) -> Point2 {
        self.point_at_angle(self.start_angle)
    }

    /// Point at the end angle.
    #[must_use]
    pub fn end_point(&self) -> Point2 {
        self.point_at_angle(self.end_angle)
    }

    /// Point halfway along the sweep.
    #[must_use]
    pub fn middle_point(&self) -> Point2 {
        self.evaluate(0.5)
    }

    /// Returns whether `angle` lies within the sweep.
    #[must_use]
    pub fn contains_angle(&self, angle: f64, exclusive: bool, tolerance: f64) -> bool {
        angle::is_within_span(angle, self.start_angle, self.span(), exclusive, tolerance)
    }
}

impl Curve for Arc {
    fn evaluate(&self, ratio: f64) -> Point2 {
        self.point_at_angle(self.start_angle + self.span() * ratio)
    }

    fn tangent(&self, ratio: f64) -> Vector2 {
        let a = self.start_angle + self.span() * ratio;
        point_from_polar(a + 90.0, self.radius * self.span().to_radians())
    }

    fn endpoints(&self) -> Option<(Point2, Point2)> {
        Some((self.start_point(), self.end_point()))
    }

    fn length(&self) -> f64 {
        self.radius * self.span().to_radians()
    }

    fn is_closed(&self) -> bool {
        (self.span() - 360.0).abs() < crate::math::ANGLE_TOLERANCE
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn span_wraps_through_zero() {
        let a = Arc::new(Point2::origin(), 1.0, 300.0, 60.0).unwrap();
        assert!((a.span() - 120.0).abs() < TOL, "span={}", a.span());
        assert!((a.normalized_end_angle() - 420.0).abs() < TOL);
    }

    #[test]
    fn full_and_empty_spans() {
        let full = Arc::new(Point2::origin(), 1.0, 0.0, 360.0).unwrap();
        assert!((full.span() - 360.0).abs() < TOL);
        assert!(full.is_closed());
        let empty = Arc::new(Point2::origin(), 1.0, 45.0, 45.0).unwrap();
        assert!(empty.span().abs() < TOL);
    }

    #[test]
    fn endpoints_come_from_angles() {
        let a = Arc::new(Point2::new(1.0, 1.0), 2.0, 0.0, 90.0).unwrap();
        let (s, e) = a.endpoints().unwrap();
        assert!((s.x - 3.0).abs() < TOL && (s.y - 1.0).abs() < TOL);
        assert!((e.x - 1.0).abs() < TOL && (e.y - 3.0).abs() < TOL);
        assert!((a.length() - std::f64::consts::PI).abs() < TOL);
    }

    #[test]
    fn from_three_points_passes_through_middle() {
        let a = Arc::from_three_points(
            &Point2::new(-1.0, 0.0),
            &Point2::new(0.0, 1.0),
            &Point2::new(1.0, 0.0),
        )
        .unwrap();
        assert!((a.radius() - 1.0).abs() < TOL);
        assert!((a.span() - 180.0).abs() < 1e-9);
        let m = a.middle_point();
        assert!(m.x.abs() < 1e-9 && (m.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_radius() {
        assert!(Arc::new(Point2::origin(), 0.0, 0.0, 90.0).is_err());
    }
}
