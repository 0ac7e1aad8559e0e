use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::{arc_2d::point_on_circle, point_from_polar, Point2, Vector2};

use super::Curve;

/// A full circle.
///
/// The radius is always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Center point.
    pub origin: Point2,
    radius: f64,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not strictly positive or not finite.
    pub fn new(origin: Point2, radius: f64) -> Result<Self> {
        validate_radius(radius)?;
        Ok(Self { origin, radius })
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

    /// Point on the circle at `angle` degrees.
    #[must_use]
    pub fn point_at_angle(&self, angle: f64) -> Point2 {
        point_on_circle(&self.origin, self.radius, angle)
    }
}

pub(super) fn validate_radius(radius: f64) -> Result<()> {
    if !radius.is_finite() {
        return Err(GeometryError::NonFinite("radius").into());
    }
    if radius <= 0.0 {
        return Err(GeometryError::NonPositiveRadius(radius).into());
    }
    Ok(())
}

impl Curve for Circle {
    fn evaluate(&self, ratio: f64) -> Point2 {
        self.point_at_angle(ratio * 360.0)
    }

    fn tangent(&self, ratio: f64) -> Vector2 {
        point_from_polar(ratio * 360.0 + 90.0, self.radius * TAU)
    }

    fn endpoints(&self) -> Option<(Point2, Point2)> {
        None
    }

    fn length(&self) -> f64 {
        TAU * self.radius
    }

    fn is_closed(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_radius() {
        assert!(Circle::new(Point2::origin(), 0.0).is_err());
        assert!(Circle::new(Point2::origin(), -1.0).is_err());
        assert!(Circle::new(Point2::origin(), f64::NAN).is_err());
    }

    #[test]
    fn circumference() {
        let c = Circle::new(Point2::new(2.0, 2.0), 1.5).unwrap_or_else(|e| panic!("{e}"));
        assert!((c.length() - 3.0 * std::f64::consts::PI).abs() < 1e-12);
        assert!(c.endpoints().is_none());
    }

    #[test]
    fn quarter_point() {
        let c = Circle::new(Point2::origin(), 2.0).unwrap_or_else(|e| panic!("{e}"));
        let p = c.evaluate(0.25);
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 2.0).abs() < 1e-12);
    }
}
