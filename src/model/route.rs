use std::fmt;
use std::str::FromStr;

use crate::error::{ContourError, ModelError, Result};
use crate::geometry::Path;
use crate::math::Vector2;

use super::Model;

/// One step of a [`Route`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RouteStep {
    /// A child model id.
    Model(String),
    /// A path id. Only valid as the final step.
    Path(String),
}

/// Address of a path or model inside a model tree.
///
/// Formats as `models/outer/models/inner/paths/edge`. The string form only
/// round-trips for ids without `/`, which [`Model::add_path`] and
/// [`Model::add_model`] refuse; ids placed with the `set_*` or `*_unique`
/// methods are not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Route {
    steps: Vec<RouteStep>,
}

impl Route {
    /// The empty route, addressing the root model.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns the steps of this route.
    #[must_use]
    pub fn steps(&self) -> &[RouteStep] {
        &self.steps
    }

    /// Returns a route one model deeper.
    #[must_use]
    pub fn model(&self, id: &str) -> Self {
        let mut steps = self.steps.clone();
        steps.push(RouteStep::Model(id.to_owned()));
        Self { steps }
    }

    /// Returns a route to path `id` under this route.
    #[must_use]
    pub fn path(&self, id: &str) -> Self {
        let mut steps = self.steps.clone();
        steps.push(RouteStep::Path(id.to_owned()));
        Self { steps }
    }

    /// Returns whether the route ends at a path.
    #[must_use]
    pub fn is_path(&self) -> bool {
        matches!(self.steps.last(), Some(RouteStep::Path(_)))
    }

    /// Route to the model that contains the addressed node, with the last id.
    #[must_use]
    pub fn split_last(&self) -> Option<(Self, &RouteStep)> {
        let (last, rest) = self.steps.split_last()?;
        Some((Self { steps: rest.to_vec() }, last))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            match step {
                RouteStep::Model(id) => write!(f, "models/{id}")?,
                RouteStep::Path(id) => write!(f, "paths/{id}")?,
            }
        }
        Ok(())
    }
}

impl FromStr for Route {
    type Err = ContourError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(Self::root());
        }
        let tokens: Vec<&str> = s.split('/').collect();
        if tokens.len() % 2 != 0 {
            return Err(ModelError::InvalidRoute(s.to_owned()).into());
        }
        let mut steps = Vec::with_capacity(tokens.len() / 2);
        for (i, pair) in tokens.chunks(2).enumerate() {
            let id = pair[1];
            if id.is_empty() {
                return Err(ModelError::InvalidRoute(s.to_owned()).into());
            }
            let step = match pair[0] {
                "models" => RouteStep::Model(id.to_owned()),
                "paths" if i == tokens.len() / 2 - 1 => RouteStep::Path(id.to_owned()),
                _ => return Err(ModelError::InvalidRoute(s.to_owned()).into()),
            };
            steps.push(step);
        }
        Ok(Self { steps })
    }
}

/// A node reached by [`Model::travel`].
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Model(&'a Model),
    Path(&'a Path),
}

/// A mutable node reached by [`Model::travel_mut`].
#[derive(Debug)]
pub enum NodeMut<'a> {
    Model(&'a mut Model),
    Path(&'a mut Path),
}

fn not_found(route: &Route) -> ContourError {
    ModelError::RouteNotFound(route.to_string()).into()
}

impl Model {
    /// Resolves `route` to its node and the node's absolute offset.
    ///
    /// The offset is the sum of the origins of every model traversed,
    /// this model included. For a model target its own origin is counted.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::RouteNotFound`] if any step is missing.
    pub fn travel(&self, route: &Route) -> Result<(Node<'_>, Vector2)> {
        let mut current = self;
        let mut offset = self.origin.coords;
        for step in route.steps() {
            match step {
                RouteStep::Model(id) => {
                    current = current.models.get(id).ok_or_else(|| not_found(route))?;
                    offset += current.origin.coords;
                }
                RouteStep::Path(id) => {
                    let path = current.paths.get(id).ok_or_else(|| not_found(route))?;
                    return Ok((Node::Path(path), offset));
                }
            }
        }
        Ok((Node::Model(current), offset))
    }

    /// Mutable counterpart of [`Model::travel`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::RouteNotFound`] if any step is missing.
    pub fn travel_mut(&mut self, route: &Route) -> Result<(NodeMut<'_>, Vector2)> {
        let mut offset = self.origin.coords;
        let mut current = self;
        for step in route.steps() {
            match step {
                RouteStep::Model(id) => {
                    current = current.models.get_mut(id).ok_or_else(|| not_found(route))?;
                    offset += current.origin.coords;
                }
                RouteStep::Path(id) => {
                    let path = current.paths.get_mut(id).ok_or_else(|| not_found(route))?;
                    return Ok((NodeMut::Path(path), offset));
                }
            }
        }
        Ok((NodeMut::Model(current), offset))
    }

    /// The path addressed by `route`.
    ///
    /// # Errors
    ///
    /// Returns an error if the route does not end at an existing path.
    pub fn path_at(&self, route: &Route) -> Result<&Path> {
        match self.travel(route)? {
            (Node::Path(p), _) => Ok(p),
            (Node::Model(_), _) => Err(not_found(route)),
        }
    }

    /// Mutable access to the path addressed by `route`.
    ///
    /// # Errors
    ///
    /// Returns an error if the route does not end at an existing path.
    pub fn path_at_mut(&mut self, route: &Route) -> Result<&mut Path> {
        match self.travel_mut(route)? {
            (NodeMut::Path(p), _) => Ok(p),
            (NodeMut::Model(_), _) => Err(not_found(route)),
        }
    }

    /// The model addressed by `route`.
    ///
    /// # Errors
    ///
    /// Returns an error if the route does not end at an existing model.
    pub fn model_at_mut(&mut self, route: &Route) -> Result<&mut Model> {
        match self.travel_mut(route)? {
            (NodeMut::Model(m), _) => Ok(m),
            (NodeMut::Path(_), _) => Err(not_found(route)),
        }
    }

    /// Detaches and returns the path addressed by `route`.
    ///
    /// # Errors
    ///
    /// Returns an error if the route does not end at an existing path.
    pub fn remove_at(&mut self, route: &Route) -> Result<Path> {
        let Some((parent, RouteStep::Path(id))) = route.split_last() else {
            return Err(not_found(route));
        };
        let id = id.clone();
        self.model_at_mut(&parent)?
            .paths
            .remove(&id)
            .ok_or_else(|| not_found(route))
    }
}
