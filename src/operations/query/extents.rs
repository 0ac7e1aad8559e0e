use crate::geometry::{Path, PathKind};
use crate::math::{Point2, Vector2};
use crate::model::Model;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    pub low: Point2,
    pub high: Point2,
}

impl Extents {
    /// Creates a box from two corners in any order.
    #[must_use]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            low: a.inf(&b),
            high: a.sup(&b),
        }
    }

    /// Smallest box holding every point, or `None` for no points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self::new(first, first), |acc, p| acc.including(p)))
    }

    /// Grows the box to include `p`.
    #[must_use]
    pub fn including(&self, p: &Point2) -> Self {
        Self {
            low: self.low.inf(p),
            high: self.high.sup(p),
        }
    }

    /// Union of two boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            low: self.low.inf(&other.low),
            high: self.high.sup(&other.high),
        }
    }

    /// The box shifted by `offset`.
    #[must_use]
    pub fn translated(&self, offset: &Vector2) -> Self {
        Self {
            low: self.low + *offset,
            high: self.high + *offset,
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.high.x - self.low.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.high.y - self.low.y
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        nalgebra::center(&self.low, &self.high)
    }

    /// Length of the diagonal.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        nalgebra::distance(&self.low, &self.high)
    }

    /// Returns whether `p` lies in the box grown by `tolerance`.
    #[must_use]
    pub fn contains_point(&self, p: &Point2, tolerance: f64) -> bool {
        p.x >= self.low.x - tolerance
            && p.x <= self.high.x + tolerance
            && p.y >= self.low.y - tolerance
            && p.y <= self.high.y + tolerance
    }

    /// Returns whether two boxes touch or overlap, within `tolerance`.
    #[must_use]
    pub fn overlaps(&self, other: &Self, tolerance: f64) -> bool {
        self.low.x <= other.high.x + tolerance
            && other.low.x <= self.high.x + tolerance
            && self.low.y <= other.high.y + tolerance
            && other.low.y <= self.high.y + tolerance
    }
}

/// Bounding box of a single path in its own coordinates.
///
/// Arcs are widened to every axis extreme their sweep passes through.
#[must_use]
pub fn path_extents(path: &Path) -> Extents {
    match &path.kind {
        PathKind::Line(l) => Extents::new(l.origin, l.end),
        PathKind::Circle(c) => {
            let r = Vector2::new(c.radius(), c.radius());
            Extents::new(c.origin - r, c.origin + r)
        }
        PathKind::Arc(a) => {
            let span = a.span();
            let mut ext = Extents::new(a.start_point(), a.end_point());
            for quadrant in [0.0, 90.0, 180.0, 270.0] {
                if crate::math::angle::is_within_span(quadrant, a.start_angle, span, false, 0.0) {
                    ext = ext.including(&a.point_at_angle(quadrant));
                }
            }
            ext
        }
        PathKind::Bezier(b) => {
            let (low, high) = b.bounds();
            Extents { low, high }
        }
    }
}

/// Bounding box of a path shifted by `offset`.
#[must_use]
pub fn path_extents_at(path: &Path, offset: &Vector2) -> Extents {
    path_extents(path).translated(offset)
}

/// Bounding box of every path in the tree, in the coordinates of `model`'s
/// parent (this model's origin is applied). `None` when there are no paths.
#[must_use]
pub fn model_extents(model: &Model) -> Option<Extents> {
    model
        .walk_paths(false)
        .iter()
        .map(|w| path_extents_at(w.path, &w.offset))
        .reduce(|a, b| a.union(&b))
}
