use crate::geometry::{Path, PathKind};
use crate::math::{rotate_point, Point2};
use crate::model::Model;

/// Rotates geometry counter-clockwise around a pivot, in place.
pub struct Rotate {
    angle: f64,
    pivot: Point2,
}

impl Rotate {
    /// Creates a new `Rotate` operation. `angle` is in degrees.
    #[must_use]
    pub fn new(angle: f64, pivot: Point2) -> Self {
        Self { angle, pivot }
    }

    /// Rotates a path around the pivot.
    pub fn apply_path(&self, path: &mut Path) {
        rotate_path(path, self.angle, &self.pivot);
    }

    /// Rotates a model's contents.
    ///
    /// The pivot is given in the same space as `model.origin`. Model origins
    /// stay where they are; leaf geometry moves.
    pub fn execute(&self, model: &mut Model) {
        rotate_model(model, self.angle, &self.pivot);
    }
}

fn rotate_path(path: &mut Path, angle: f64, pivot: &Point2) {
    match &mut path.kind {
        PathKind::Line(l) => {
            l.origin = rotate_point(&l.origin, angle, pivot);
            l.end = rotate_point(&l.end, angle, pivot);
        }
        PathKind::Circle(c) => c.origin = rotate_point(&c.origin, angle, pivot),
        PathKind::Arc(a) => {
            a.origin = rotate_point(&a.origin, angle, pivot);
            a.start_angle += angle;
            a.end_angle += angle;
        }
        PathKind::Bezier(b) => {
            b.origin = rotate_point(&b.origin, angle, pivot);
            b.end = rotate_point(&b.end, angle, pivot);
            for c in b.controls_mut() {
                *c = rotate_point(c, angle, pivot);
            }
        }
    }
}

fn rotate_model(model: &mut Model, angle: f64, pivot: &Point2) {
    let local = Point2::from(*pivot - model.origin);
    for path in model.paths.values_mut() {
        rotate_path(path, angle, &local);
    }
    for child in model.models.values_mut() {
        rotate_model(child, angle, &local);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::query::is_path_equal;

    #[test]
    fn rotate_then_back_restores_path() {
        let original = Path::arc(Point2::new(3.0, 1.0), 2.0, 10.0, 80.0).unwrap();
        let mut p = original.clone();
        Rotate::new(37.0, Point2::new(-1.0, 2.0)).apply_path(&mut p);
        Rotate::new(-37.0, Point2::new(-1.0, 2.0)).apply_path(&mut p);
        assert!(is_path_equal(&p, &original, 1e-9));
    }

    #[test]
    fn nested_model_rotates_around_parent_space_pivot() {
        let mut child = Model::new().with_origin(Point2::new(2.0, 0.0));
        child.add_path("l", Path::line(Point2::origin(), Point2::new(1.0, 0.0))).unwrap();
        let mut root = Model::new();
        root.add_model("child", child).unwrap();
        Rotate::new(90.0, Point2::origin()).execute(&mut root);
        let flat = crate::operations::transform::flattened(&root);
        let (a, b) = flat.paths.values().next().unwrap().endpoints().unwrap();
        assert!(a.x.abs() < 1e-12 && (a.y - 2.0).abs() < 1e-12, "a={a}");
        assert!(b.x.abs() < 1e-12 && (b.y - 3.0).abs() < 1e-12, "b={b}");
    }
}
