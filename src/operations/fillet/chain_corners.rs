use tracing::debug;

use crate::error::Result;
use crate::geometry::Path;
use crate::model::Model;
use crate::operations::chain::Chain;
use crate::operations::transform::moved_path;

use super::{Dogbone, Fillet, FilletOptions};

/// Which arc [`ChainCorners`] puts at each joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerStyle {
    Fillet,
    Dogbone,
}

/// Rounds every joint of a chain.
///
/// Joints run between consecutive links, plus the closing joint of an
/// endless chain. The chain's paths are cropped in the model they were
/// found in; joints that cannot take the radius are left sharp.
pub struct ChainCorners {
    style: CornerStyle,
    radius: f64,
    options: FilletOptions,
}

impl ChainCorners {
    /// Creates a new `ChainCorners` operation.
    #[must_use]
    pub fn new(style: CornerStyle, radius: f64, options: FilletOptions) -> Self {
        Self {
            style,
            radius,
            options,
        }
    }

    /// Rounds the joints of `chain`, which must have been found in `model`.
    ///
    /// Returns the new arcs in absolute coordinates, keyed by joint index,
    /// or `None` when no joint could be rounded.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not strictly positive or a link's
    /// route no longer resolves in `model`.
    pub fn execute(&self, model: &mut Model, chain: &Chain) -> Result<Option<Model>> {
        let n = chain.links.len();
        let joints = match (n, chain.endless) {
            (0 | 1, _) => 0,
            (_, true) => n,
            (_, false) => n - 1,
        };

        let mut arcs = Model::new();
        for i in 0..joints {
            let (la, lb) = (&chain.links[i], &chain.links[(i + 1) % n]);
            let mut pa = moved_path(model.path_at(&la.route)?, &la.offset);
            let mut pb = moved_path(model.path_at(&lb.route)?, &lb.offset);
            let arc = match self.style {
                CornerStyle::Fillet => Fillet::new(self.radius, self.options).execute(&mut pa, &mut pb)?,
                CornerStyle::Dogbone => Dogbone::new(self.radius, self.options).execute(&mut pa, &mut pb)?,
            };
            let Some(arc) = arc else {
                continue;
            };
            *model.path_at_mut(&la.route)? = moved_path(&pa, &-la.offset);
            *model.path_at_mut(&lb.route)? = moved_path(&pb, &-lb.offset);
            let mut path = Path::from(arc);
            path.layer.clone_from(&la.path.layer);
            arcs.set_path(i.to_string(), path);
        }
        debug!(joints, rounded = arcs.paths.len(), style = ?self.style, "chain corners");
        Ok((!arcs.paths.is_empty()).then_some(arcs))
    }
}
