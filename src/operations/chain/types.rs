use crate::geometry::Path;
use crate::math::{Point2, Vector2, POINT_MATCHING_DISTANCE};
use crate::model::Route;

/// Options for [`FindChains`](super::FindChains).
#[derive(Debug, Clone, Copy)]
pub struct FindChainsOptions {
    /// Endpoints closer than this are treated as joined.
    pub point_matching_distance: f64,
    /// Only look at the model's own paths, not its children.
    pub shallow: bool,
    /// Nest endless chains inside the chains that contain them.
    pub contain: Option<ContainOptions>,
}

impl Default for FindChainsOptions {
    fn default() -> Self {
        Self {
            point_matching_distance: POINT_MATCHING_DISTANCE,
            shallow: false,
            contain: None,
        }
    }
}

/// Options for containment nesting.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainOptions {
    /// Wind outermost chains clockwise and alternate at every nesting level.
    pub alternate_direction: bool,
}

/// One path within a chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainLink {
    /// Route of the source path from the searched model.
    pub route: Route,
    /// Offset of the source path's parent model.
    pub offset: Vector2,
    /// The path moved to absolute coordinates.
    pub path: Path,
    /// `true` when the chain runs through the path from end to start.
    pub reversed: bool,
    /// Absolute endpoints in chain travel order.
    pub endpoints: (Point2, Point2),
    pub path_length: f64,
}

/// Paths joined end to end.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub links: Vec<ChainLink>,
    /// The last link ends where the first begins.
    pub endless: bool,
    /// Sum of the link lengths.
    pub path_length: f64,
    /// Endless chains lying inside this one, when nesting was requested.
    pub contains: Vec<Chain>,
}

impl Chain {
    pub(super) fn new(links: Vec<ChainLink>, endless: bool) -> Self {
        let path_length = links.iter().map(|l| l.path_length).sum();
        Self {
            links,
            endless,
            path_length,
            contains: Vec::new(),
        }
    }

    /// Number of chains in this chain's containment tree, itself included.
    #[must_use]
    pub fn tree_size(&self) -> usize {
        1 + self.contains.iter().map(Chain::tree_size).sum::<usize>()
    }
}

/// Result of a chain search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainSet {
    /// Chains, longest first (top-level chains only when nested).
    pub chains: Vec<Chain>,
    /// Paths that joined nothing, and paths too short to chain.
    pub loose: Vec<ChainLink>,
}
