use crate::geometry::Path;
use crate::math::Vector2;

use super::{Model, Route};

/// A path reached while walking a model tree.
#[derive(Debug, Clone)]
pub struct WalkedPath<'a> {
    /// Id of the path within its parent model.
    pub id: &'a str,
    /// The path, in its parent model's local coordinates.
    pub path: &'a Path,
    /// Route from the walked root to the path.
    pub route: Route,
    /// Sum of the origins of every model containing the path.
    pub offset: Vector2,
    /// The path's layer, or the nearest enclosing model layer.
    pub layer: Option<&'a str>,
}

/// A model reached while walking a model tree.
#[derive(Debug, Clone)]
pub struct WalkedModel<'a> {
    pub model: &'a Model,
    pub route: Route,
    /// Offset including this model's own origin.
    pub offset: Vector2,
    pub layer: Option<&'a str>,
}

impl Model {
    /// Collects every path in the tree, depth first.
    ///
    /// With `shallow`, only this model's own paths are visited.
    #[must_use]
    pub fn walk_paths(&self, shallow: bool) -> Vec<WalkedPath<'_>> {
        let mut out = Vec::new();
        let root = WalkedModel {
            model: self,
            route: Route::root(),
            offset: self.origin.coords,
            layer: self.layer.as_deref(),
        };
        collect_paths(&root, shallow, &mut out);
        out
    }

    /// Collects every descendant model, parents before children.
    #[must_use]
    pub fn walk_models(&self) -> Vec<WalkedModel<'_>> {
        let mut out = Vec::new();
        collect_models(self, &Route::root(), self.origin.coords, self.layer.as_deref(), &mut out);
        out
    }
}

fn collect_paths<'a>(node: &WalkedModel<'a>, shallow: bool, out: &mut Vec<WalkedPath<'a>>) {
    for (id, path) in &node.model.paths {
        out.push(WalkedPath {
            id,
            path,
            route: node.route.path(id),
            offset: node.offset,
            layer: path.layer.as_deref().or(node.layer),
        });
    }
    if shallow {
        return;
    }
    for (id, child) in &node.model.models {
        let walked = WalkedModel {
            model: child,
            route: node.route.model(id),
            offset: node.offset + child.origin.coords,
            layer: child.layer.as_deref().or(node.layer),
        };
        collect_paths(&walked, false, out);
    }
}

fn collect_models<'a>(
    model: &'a Model,
    route: &Route,
    offset: Vector2,
    layer: Option<&'a str>,
    out: &mut Vec<WalkedModel<'a>>,
) {
    for (id, child) in &model.models {
        let walked = WalkedModel {
            model: child,
            route: route.model(id),
            offset: offset + child.origin.coords,
            layer: child.layer.as_deref().or(layer),
        };
        let (child_route, child_offset, child_layer) = (walked.route.clone(), walked.offset, walked.layer);
        out.push(walked);
        collect_models(child, &child_route, child_offset, child_layer, out);
    }
}
