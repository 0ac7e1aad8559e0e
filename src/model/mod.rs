//! The model tree: named paths and nested child models with local origins.

mod route;
mod units;
mod walk;

use std::collections::BTreeMap;

pub use route::{Node, NodeMut, Route, RouteStep};
pub use units::{conversion_scale, Unit};
pub use walk::{WalkedModel, WalkedPath};

use crate::error::{ModelError, Result};
use crate::geometry::Path;
use crate::math::Point2;

/// A node in the model tree.
///
/// Child ids are unique within each map. Absolute positions of nested
/// geometry are the sum of every ancestor origin plus the geometry itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Local offset applied to everything in this model.
    pub origin: Point2,
    pub paths: BTreeMap<String, Path>,
    pub models: BTreeMap<String, Model>,
    pub units: Option<Unit>,
    pub layer: Option<String>,
    pub notes: Option<String>,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            origin: Point2::origin(),
            paths: BTreeMap::new(),
            models: BTreeMap::new(),
            units: None,
            layer: None,
            notes: None,
        }
    }
}

impl Model {
    /// Creates an empty model at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the origin.
    #[must_use]
    pub fn with_origin(mut self, origin: Point2) -> Self {
        self.origin = origin;
        self
    }

    /// Sets the unit system.
    #[must_use]
    pub fn with_units(mut self, units: Unit) -> Self {
        self.units = Some(units);
        self
    }

    /// Inserts a path under a new id.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidId`] if `id` contains `/`, or
    /// [`ModelError::DuplicateId`] if `id` is taken.
    pub fn add_path(&mut self, id: impl Into<String>, path: Path) -> Result<()> {
        let id = checked_id("path", id.into())?;
        if self.paths.contains_key(&id) {
            return Err(ModelError::DuplicateId { kind: "path", id }.into());
        }
        self.paths.insert(id, path);
        Ok(())
    }

    /// Inserts a path, renaming it with a numeric suffix if `id` is taken.
    /// Returns the id actually used.
    pub fn add_path_unique(&mut self, id: &str, path: Path) -> String {
        let id = unique_id(id, |c| self.paths.contains_key(c));
        self.paths.insert(id.clone(), path);
        id
    }

    /// Inserts or replaces a path, returning the previous one.
    ///
    /// The id is not checked; one containing `/` can still be reached by
    /// [`Route`] steps but not through a route string.
    pub fn set_path(&mut self, id: impl Into<String>, path: Path) -> Option<Path> {
        self.paths.insert(id.into(), path)
    }

    /// Inserts a child model under a new id.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidId`] if `id` contains `/`, or
    /// [`ModelError::DuplicateId`] if `id` is taken.
    pub fn add_model(&mut self, id: impl Into<String>, model: Model) -> Result<()> {
        let id = checked_id("model", id.into())?;
        if self.models.contains_key(&id) {
            return Err(ModelError::DuplicateId { kind: "model", id }.into());
        }
        self.models.insert(id, model);
        Ok(())
    }

    /// Inserts a child model, renaming it if `id` is taken.
    /// Returns the id actually used.
    pub fn add_model_unique(&mut self, id: &str, model: Model) -> String {
        let id = unique_id(id, |c| self.models.contains_key(c));
        self.models.insert(id.clone(), model);
        id
    }

    /// Inserts or replaces a child model, returning the previous one.
    pub fn set_model(&mut self, id: impl Into<String>, model: Model) -> Option<Model> {
        self.models.insert(id.into(), model)
    }

    /// Returns `true` when the tree holds no paths at any depth.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.models.values().all(Model::is_empty)
    }

    /// Number of paths at every depth.
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.paths.len() + self.models.values().map(Model::path_count).sum::<usize>()
    }
}

/// Rejects ids that would split a route string.
fn checked_id(kind: &'static str, id: String) -> Result<String> {
    if id.contains('/') {
        return Err(ModelError::InvalidId { kind, id }.into());
    }
    Ok(id)
}

/// First of `base`, `base_2`, `base_3`, ... not rejected by `taken`.
fn unique_id(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_owned();
    }
    (2..)
        .map(|n| format!("{base}_{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_owned())
}
