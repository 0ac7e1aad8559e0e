use crate::geometry::{Path, PathKind};
use crate::math::Vector2;
use crate::model::Model;

/// Moves geometry by a displacement vector, in place.
pub struct Translate {
    displacement: Vector2,
}

impl Translate {
    /// Creates a new `Translate` operation.
    #[must_use]
    pub fn new(displacement: Vector2) -> Self {
        Self { displacement }
    }

    /// Moves a model by shifting its origin. Children follow.
    pub fn execute(&self, model: &mut Model) {
        model.origin += self.displacement;
    }

    /// Moves every point of a path.
    pub fn apply_path(&self, path: &mut Path) {
        let d = self.displacement;
        match &mut path.kind {
            PathKind::Line(l) => {
                l.origin += d;
                l.end += d;
            }
            PathKind::Circle(c) => c.origin += d,
            PathKind::Arc(a) => a.origin += d,
            PathKind::Bezier(b) => {
                b.origin += d;
                b.end += d;
                for c in b.controls_mut() {
                    *c += d;
                }
            }
        }
    }
}

/// Returns a copy of `path` moved by `displacement`.
#[must_use]
pub fn moved_path(path: &Path, displacement: &Vector2) -> Path {
    let mut out = path.clone();
    Translate::new(*displacement).apply_path(&mut out);
    out
}

/// Flattens a model tree into a single model whose paths carry absolute
/// coordinates. Path ids are their routes.
#[must_use]
pub fn flattened(model: &Model) -> Model {
    let mut out = Model::new();
    for walked in model.walk_paths(false) {
        let mut path = moved_path(walked.path, &walked.offset);
        path.layer = walked.layer.map(str::to_owned);
        out.set_path(walked.route.to_string(), path);
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    #[test]
    fn moves_line_and_model() {
        let mut p = Path::line(Point2::origin(), Point2::new(1.0, 0.0));
        Translate::new(Vector2::new(2.0, 3.0)).apply_path(&mut p);
        assert_eq!(p.endpoints(), Some((Point2::new(2.0, 3.0), Point2::new(3.0, 3.0))));

        let mut m = Model::new().with_origin(Point2::new(1.0, 1.0));
        Translate::new(Vector2::new(-1.0, 0.0)).execute(&mut m);
        assert_eq!(m.origin, Point2::new(0.0, 1.0));
    }

    #[test]
    fn flatten_applies_offsets() {
        let mut child = Model::new().with_origin(Point2::new(5.0, 5.0));
        child.add_path("c", Path::circle(Point2::origin(), 1.0).unwrap()).unwrap();
        let mut root = Model::new();
        root.add_model("child", child).unwrap();
        let flat = flattened(&root);
        let p = flat.paths.get("models/child/paths/c").unwrap();
        assert_eq!(p.center(), Some(Point2::new(5.0, 5.0)));
    }
}
