mod arc;
mod bezier;
mod circle;
mod line;

pub use arc::Arc;
pub use bezier::BezierSeed;
pub use circle::Circle;
pub use line::Line;

use crate::math::{Point2, Vector2};

/// Trait for planar curves that can be evaluated along their length.
///
/// `ratio` runs from `0.0` at the start of the curve to `1.0` at its end.
/// Circles start and end at angle 0.
pub trait Curve {
    /// Evaluates the curve at `ratio`.
    fn evaluate(&self, ratio: f64) -> Point2;

    /// Direction of travel at `ratio`, not normalized.
    fn tangent(&self, ratio: f64) -> Vector2;

    /// Start and end points, or `None` for curves without ends.
    fn endpoints(&self) -> Option<(Point2, Point2)>;

    /// Total length of the curve.
    fn length(&self) -> f64;

    /// Returns whether the curve returns to its start point.
    fn is_closed(&self) -> bool;
}
