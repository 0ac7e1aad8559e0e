use crate::geometry::{Arc, BezierSeed, Circle, Line, Path, PathKind};
use crate::math::{angle, Point2};
use crate::model::Model;

/// Mirrors geometry across the axes through `(0, 0)`, returning new values.
///
/// `mirror_x` negates x coordinates (reflects across the Y axis);
/// `mirror_y` negates y coordinates.
pub struct Mirror {
    mirror_x: bool,
    mirror_y: bool,
}

impl Mirror {
    /// Creates a new `Mirror` operation.
    #[must_use]
    pub fn new(mirror_x: bool, mirror_y: bool) -> Self {
        Self { mirror_x, mirror_y }
    }

    fn point(&self, p: &Point2) -> Point2 {
        Point2::new(
            if self.mirror_x { -p.x } else { p.x },
            if self.mirror_y { -p.y } else { p.y },
        )
    }

    /// Returns a mirrored copy of `path`.
    #[must_use]
    pub fn path(&self, path: &Path) -> Path {
        let kind = match &path.kind {
            PathKind::Line(l) => PathKind::Line(Line::new(self.point(&l.origin), self.point(&l.end))),
            PathKind::Circle(c) => {
                let mut m: Circle = *c;
                m.origin = self.point(&c.origin);
                PathKind::Circle(m)
            }
            PathKind::Arc(a) => PathKind::Arc(self.arc(a)),
            PathKind::Bezier(b) => {
                let mut m: BezierSeed = b.clone();
                m.origin = self.point(&b.origin);
                m.end = self.point(&b.end);
                for c in m.controls_mut() {
                    *c = self.point(c);
                }
                PathKind::Bezier(m)
            }
        };
        Path {
            kind,
            layer: path.layer.clone(),
        }
    }

    fn arc(&self, a: &Arc) -> Arc {
        let start = angle::mirror(a.start_angle, self.mirror_x, self.mirror_y);
        let end = angle::mirror(a.normalized_end_angle(), self.mirror_x, self.mirror_y);
        let mut m = *a;
        m.origin = self.point(&a.origin);
        // A single reflection reverses the sweep direction.
        if self.mirror_x == self.mirror_y {
            m.start_angle = start;
            m.end_angle = end;
        } else {
            m.start_angle = end;
            m.end_angle = start;
        }
        m
    }

    /// Returns a mirrored copy of a model tree, origins included.
    #[must_use]
    pub fn model(&self, model: &Model) -> Model {
        Model {
            origin: self.point(&model.origin),
            paths: model
                .paths
                .iter()
                .map(|(id, p)| (id.clone(), self.path(p)))
                .collect(),
            models: model
                .models
                .iter()
                .map(|(id, m)| (id.clone(), self.model(m)))
                .collect(),
            units: model.units,
            layer: model.layer.clone(),
            notes: model.notes.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::query::{is_path_equal, path_extents};
    use approx::assert_abs_diff_eq;

    #[test]
    fn mirror_twice_is_identity() {
        let arc = Path::arc(Point2::new(2.0, 1.0), 3.0, 20.0, 200.0).unwrap();
        for (x, y) in [(true, false), (false, true), (true, true)] {
            let m = Mirror::new(x, y);
            assert!(is_path_equal(&m.path(&m.path(&arc)), &arc, 1e-9), "x={x} y={y}");
        }
    }

    #[test]
    fn mirrored_arc_covers_reflected_region() {
        // Upper-right quarter mirrored across Y becomes the upper-left quarter.
        let arc = Path::arc(Point2::origin(), 1.0, 0.0, 90.0).unwrap();
        let m = Mirror::new(true, false).path(&arc);
        let ext = path_extents(&m);
        assert_abs_diff_eq!(ext.low.x, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ext.high.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ext.high.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn mirror_model_is_a_new_tree() {
        let mut model = Model::new().with_origin(Point2::new(1.0, 2.0));
        model.add_path("l", Path::line(Point2::origin(), Point2::new(1.0, 1.0))).unwrap();
        let m = Mirror::new(false, true).model(&model);
        assert_eq!(m.origin, Point2::new(1.0, -2.0));
        assert_eq!(model.origin, Point2::new(1.0, 2.0));
        assert_eq!(m.paths["l"].endpoints().unwrap().1, Point2::new(1.0, -1.0));
    }
}
