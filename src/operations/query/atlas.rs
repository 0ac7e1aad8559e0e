use std::collections::HashMap;

use crate::model::{Model, Route};

use super::extents::{path_extents_at, Extents};

/// Cached absolute extents of every path and model in a tree, keyed by route.
///
/// Measure once and reuse across repeated containment tests or pairwise
/// intersection passes. The cache is a snapshot; it is not updated when the
/// tree changes.
#[derive(Debug, Clone, Default)]
pub struct Atlas {
    paths: HashMap<Route, Extents>,
    models: HashMap<Route, Extents>,
}

impl Atlas {
    /// Measures every path and model in `model`.
    #[must_use]
    pub fn measure(model: &Model) -> Self {
        let mut atlas = Self::default();
        for walked in model.walk_paths(false) {
            let ext = path_extents_at(walked.path, &walked.offset);
            atlas.paths.insert(walked.route.clone(), ext);

            // Grow every enclosing model, root included.
            let mut route = Route::root();
            atlas.grow_model(&route, &ext);
            if let Some((parent, _)) = walked.route.split_last() {
                for step in parent.steps() {
                    if let crate::model::RouteStep::Model(id) = step {
                        route = route.model(id);
                        atlas.grow_model(&route, &ext);
                    }
                }
            }
        }
        atlas
    }

    fn grow_model(&mut self, route: &Route, ext: &Extents) {
        self.models
            .entry(route.clone())
            .and_modify(|e| *e = e.union(ext))
            .or_insert(*ext);
    }

    /// Extents of the path at `route`.
    #[must_use]
    pub fn path(&self, route: &Route) -> Option<&Extents> {
        self.paths.get(route)
    }

    /// Extents of the model at `route`. Empty models have none.
    #[must_use]
    pub fn model(&self, route: &Route) -> Option<&Extents> {
        self.models.get(route)
    }

    /// Extents of the whole measured tree.
    #[must_use]
    pub fn extents(&self) -> Option<&Extents> {
        self.model(&Route::root())
    }

    /// Number of measured paths.
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }
}
