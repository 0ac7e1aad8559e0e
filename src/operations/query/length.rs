use crate::geometry::Path;
use crate::model::Model;

/// Length of a path.
///
/// Lines measure their Euclidean length, circles `2πr`, arcs `2πr` scaled by
/// the sweep, and beziers are integrated numerically.
#[must_use]
pub fn path_length(path: &Path) -> f64 {
    path.curve().length()
}

/// Sum of the lengths of every path in the tree.
#[must_use]
pub fn model_path_length(model: &Model) -> f64 {
    model.walk_paths(false).iter().map(|w| path_length(w.path)).sum()
}
