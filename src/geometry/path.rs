use crate::error::Result;
use crate::math::{Point2, Vector2};

use super::curve::{Arc, BezierSeed, Circle, Curve, Line};

/// The four primitive path kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum PathKind {
    Line(Line),
    Circle(Circle),
    Arc(Arc),
    Bezier(BezierSeed),
}

/// A primitive path with an optional layer tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// The geometry.
    pub kind: PathKind,
    /// Opaque grouping label.
    pub layer: Option<String>,
}

impl Path {
    /// Wraps a path kind without a layer.
    #[must_use]
    pub fn new(kind: PathKind) -> Self {
        Self { kind, layer: None }
    }

    /// A line from `origin` to `end`.
    #[must_use]
    pub fn line(origin: Point2, end: Point2) -> Self {
        Line::new(origin, end).into()
    }

    /// A circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not strictly positive.
    pub fn circle(origin: Point2, radius: f64) -> Result<Self> {
        Ok(Circle::new(origin, radius)?.into())
    }

    /// An arc, angles in degrees.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not strictly positive.
    pub fn arc(origin: Point2, radius: f64, start_angle: f64, end_angle: f64) -> Result<Self> {
        Ok(Arc::new(origin, radius, start_angle, end_angle)?.into())
    }

    /// Sets the layer tag.
    #[must_use]
    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = Some(layer.into());
        self
    }

    /// Short name of the path kind.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            PathKind::Line(_) => "line",
            PathKind::Circle(_) => "circle",
            PathKind::Arc(_) => "arc",
            PathKind::Bezier(_) => "bezier",
        }
    }

    /// The path as a [`Curve`] trait object.
    #[must_use]
    pub fn curve(&self) -> &dyn Curve {
        match &self.kind {
            PathKind::Line(l) => l,
            PathKind::Circle(c) => c,
            PathKind::Arc(a) => a,
            PathKind::Bezier(b) => b,
        }
    }

    /// Start and end points. `None` for circles.
    #[must_use]
    pub fn endpoints(&self) -> Option<(Point2, Point2)> {
        self.curve().endpoints()
    }

    /// Point at `ratio` of the way along the path.
    #[must_use]
    pub fn point_at_ratio(&self, ratio: f64) -> Point2 {
        self.curve().evaluate(ratio)
    }

    /// Point halfway along the path.
    #[must_use]
    pub fn middle_point(&self) -> Point2 {
        self.point_at_ratio(0.5)
    }

    /// Direction of travel at `ratio`.
    #[must_use]
    pub fn tangent(&self, ratio: f64) -> Vector2 {
        self.curve().tangent(ratio)
    }

    /// Whether the path is a closed loop on its own.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.curve().is_closed()
    }

    /// Center of a circle or arc.
    #[must_use]
    pub fn center(&self) -> Option<Point2> {
        match &self.kind {
            PathKind::Circle(c) => Some(c.origin),
            PathKind::Arc(a) => Some(a.origin),
            PathKind::Line(_) | PathKind::Bezier(_) => None,
        }
    }
}

impl From<PathKind> for Path {
    fn from(kind: PathKind) -> Self {
        Self::new(kind)
    }
}

impl From<Line> for Path {
    fn from(line: Line) -> Self {
        Self::new(PathKind::Line(line))
    }
}

impl From<Circle> for Path {
    fn from(circle: Circle) -> Self {
        Self::new(PathKind::Circle(circle))
    }
}

impl From<Arc> for Path {
    fn from(arc: Arc) -> Self {
        Self::new(PathKind::Arc(arc))
    }
}

impl From<BezierSeed> for Path {
    fn from(seed: BezierSeed) -> Self {
        Self::new(PathKind::Bezier(seed))
    }
}
