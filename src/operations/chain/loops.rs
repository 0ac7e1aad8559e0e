use tracing::debug;

use crate::error::Result;
use crate::model::{Model, Route};

use super::find::FindChains;
use super::types::{Chain, FindChainsOptions};

/// A closed loop lifted out of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct Loop {
    /// The loop's paths in absolute coordinates, keyed `"0"`, `"1"`, ... in
    /// travel order.
    pub model: Model,
    /// Whether each path is travelled end to start, indexed by key.
    pub reversed: Vec<bool>,
    /// Where each path came from in the searched model, indexed by key.
    pub routes: Vec<Route>,
    /// Loops lying inside this one.
    pub children: Vec<Loop>,
}

impl Loop {
    fn from_chain(chain: Chain) -> Self {
        let model = chain.to_model();
        let reversed = chain.links.iter().map(|l| l.reversed).collect();
        let routes = chain.links.iter().map(|l| l.route.clone()).collect();
        let children = chain
            .contains
            .into_iter()
            .filter(|c| c.endless)
            .map(Loop::from_chain)
            .collect();
        Self {
            model,
            reversed,
            routes,
            children,
        }
    }

    fn collect_routes<'a>(&'a self, out: &mut Vec<&'a Route>) {
        out.extend(self.routes.iter());
        for child in &self.children {
            child.collect_routes(out);
        }
    }
}

/// Finds the closed loops of a model, nested by containment.
///
/// Open chains and loose paths are ignored.
pub struct FindLoops {
    options: FindChainsOptions,
}

impl FindLoops {
    /// Creates a new `FindLoops` query. Containment is always applied.
    #[must_use]
    pub fn new(options: FindChainsOptions) -> Self {
        Self {
            options: FindChainsOptions {
                contain: Some(options.contain.unwrap_or_default()),
                ..options
            },
        }
    }

    /// Returns the outermost loops; inner loops hang off their `children`.
    #[must_use]
    pub fn execute(&self, model: &Model) -> Vec<Loop> {
        let loops: Vec<Loop> = FindChains::new(self.options)
            .execute(model)
            .chains
            .into_iter()
            .filter(|c| c.endless)
            .map(Loop::from_chain)
            .collect();
        debug!(outer = loops.len(), "loops found");
        loops
    }

    /// Like [`execute`](Self::execute), and also removes the looped paths
    /// from `model`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::RouteNotFound`](crate::error::ModelError::RouteNotFound)
    /// if a looped path can no longer be removed.
    pub fn extract(&self, model: &mut Model) -> Result<Vec<Loop>> {
        let loops = self.execute(model);
        let mut routes = Vec::new();
        for l in &loops {
            l.collect_routes(&mut routes);
        }
        for route in routes {
            model.remove_at(route)?;
        }
        Ok(loops)
    }
}
