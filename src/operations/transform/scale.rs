use crate::error::{OperationError, Result};
use crate::geometry::{Path, PathKind};
use crate::math::Point2;
use crate::model::{conversion_scale, Model, Unit};

/// Scales geometry uniformly about the local origin, in place.
pub struct Scale {
    factor: f64,
    scale_origin: bool,
}

impl Scale {
    /// Creates a new `Scale` operation.
    ///
    /// When `scale_origin` is set, the root model's own origin is scaled too.
    #[must_use]
    pub fn new(factor: f64, scale_origin: bool) -> Self {
        Self {
            factor,
            scale_origin,
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.factor.is_finite() || self.factor <= 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "scale factor must be positive, got {}",
                self.factor
            ))
            .into());
        }
        Ok(())
    }

    /// Scales a path about `(0, 0)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the factor is not strictly positive.
    pub fn apply_path(&self, path: &mut Path) -> Result<()> {
        self.validate()?;
        scale_path(path, self.factor)
    }

    /// Scales every path and every child origin in the tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the factor is not strictly positive.
    pub fn execute(&self, model: &mut Model) -> Result<()> {
        self.validate()?;
        if self.scale_origin {
            model.origin = scaled(&model.origin, self.factor);
        }
        scale_contents(model, self.factor)
    }
}

fn scaled(p: &Point2, factor: f64) -> Point2 {
    Point2::from(p.coords * factor)
}

fn scale_path(path: &mut Path, factor: f64) -> Result<()> {
    match &mut path.kind {
        PathKind::Line(l) => {
            l.origin = scaled(&l.origin, factor);
            l.end = scaled(&l.end, factor);
        }
        PathKind::Circle(c) => {
            c.origin = scaled(&c.origin, factor);
            c.set_radius(c.radius() * factor)?;
        }
        PathKind::Arc(a) => {
            a.origin = scaled(&a.origin, factor);
            a.set_radius(a.radius() * factor)?;
        }
        PathKind::Bezier(b) => {
            b.origin = scaled(&b.origin, factor);
            b.end = scaled(&b.end, factor);
            for c in b.controls_mut() {
                *c = scaled(c, factor);
            }
        }
    }
    Ok(())
}

fn scale_contents(model: &mut Model, factor: f64) -> Result<()> {
    for path in model.paths.values_mut() {
        scale_path(path, factor)?;
    }
    for child in model.models.values_mut() {
        child.origin = scaled(&child.origin, factor);
        scale_contents(child, factor)?;
    }
    Ok(())
}

/// Converts a model tree to another unit system, in place.
///
/// Each model's contents are in its own `units`, or its parent's when unset.
/// The root origin is left alone, since it lives in the caller's space.
pub struct ConvertUnits {
    target: Unit,
}

impl ConvertUnits {
    /// Creates a new `ConvertUnits` operation.
    #[must_use]
    pub fn new(target: Unit) -> Self {
        Self { target }
    }

    /// Executes the conversion.
    ///
    /// # Errors
    ///
    /// Returns an error if the root model carries no unit tag.
    pub fn execute(&self, model: &mut Model) -> Result<()> {
        let Some(from) = model.units else {
            return Err(OperationError::InvalidInput("model has no units to convert from".into()).into());
        };
        convert(model, from, self.target)
    }
}

fn convert(model: &mut Model, inherited: Unit, target: Unit) -> Result<()> {
    let from = model.units.unwrap_or(inherited);
    let ratio = conversion_scale(from, target);
    for path in model.paths.values_mut() {
        scale_path(path, ratio)?;
    }
    for child in model.models.values_mut() {
        child.origin = scaled(&child.origin, ratio);
        convert(child, from, target)?;
    }
    if model.units.is_some() {
        model.units = Some(target);
    }
    Ok(())
}

/// Returns a copy of `path` scaled about `(0, 0)`.
///
/// # Errors
///
/// Returns an error if the factor is not strictly positive.
pub fn scaled_path(path: &Path, factor: f64) -> Result<Path> {
    let mut out = path.clone();
    Scale::new(factor, false).apply_path(&mut out)?;
    Ok(out)
}
