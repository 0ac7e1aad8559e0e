use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::{Path, PathKind};
use crate::math::{Point2, Vector2, POINT_MATCHING_DISTANCE};
use crate::model::{Model, Route, RouteStep};
use crate::operations::modification::RemoveDeadEnds;
use crate::operations::query::Atlas;
use crate::operations::transform::moved_path;

use super::classify::{place_paths, PointClassification, PointContainment};
use super::select::{should_keep_fragment, should_keep_shared, CombineFlags, DeleteReason, KeepDecision, SharedSide};
use super::split::{mark_duplicates, split_paths, Fragment, ModelSource};

/// Options for [`Combine`].
#[derive(Debug, Clone, Copy)]
pub struct CombineOptions<'a> {
    /// Endpoints closer than this are treated as joined.
    pub point_matching_distance: f64,
    /// Strip spurs left behind by splitting.
    pub trim_dead_ends: bool,
    /// Ray target tried first when classifying fragments.
    pub far_point: Option<Point2>,
    /// Pre-measured extents of operand A.
    pub atlas_a: Option<&'a Atlas>,
    /// Pre-measured extents of operand B.
    pub atlas_b: Option<&'a Atlas>,
}

impl Default for CombineOptions<'_> {
    fn default() -> Self {
        Self {
            point_matching_distance: POINT_MATCHING_DISTANCE,
            trim_dead_ends: true,
            far_point: None,
            atlas_a: None,
            atlas_b: None,
        }
    }
}

/// A fragment left out of the result.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedPath {
    /// Route of the original path, starting at the operand's child model.
    pub route: Route,
    /// The fragment, in the coordinates of the route's parent model.
    pub path: Path,
    pub source: ModelSource,
    pub reason: DeleteReason,
}

/// Output of [`Combine::execute`].
#[derive(Debug, Clone)]
pub struct CombineResult {
    /// Holds the surviving fragments of A and B as children `"a"` and `"b"`.
    pub model: Model,
    pub deleted: Vec<DeletedPath>,
}

/// Boolean combination of two models.
///
/// Every path is split at its crossings with the other operand, each piece
/// is classified by its midpoint against the other operand, and the flags
/// decide which pieces survive. Pieces shared by both operands are kept at
/// most once, depending on whether the operands fill the same side of them.
/// Beziers must be converted to arcs first.
pub struct Combine<'a> {
    flags: CombineFlags,
    options: CombineOptions<'a>,
}

impl<'a> Combine<'a> {
    /// Creates a new `Combine` operation.
    #[must_use]
    pub fn new(flags: impl Into<CombineFlags>, options: CombineOptions<'a>) -> Self {
        Self {
            flags: flags.into(),
            options,
        }
    }

    /// Combines `a` with `b`.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Unsupported`] if either model holds a bezier.
    pub fn execute(&self, mut a: Model, mut b: Model) -> Result<CombineResult> {
        let pmd = self.options.point_matching_distance;

        // Step 1: reject curves the solvers cannot split
        reject_beziers(&a, ModelSource::A)?;
        reject_beziers(&b, ModelSource::B)?;

        // Step 2: place both operands in absolute coordinates
        let placed_a = place_paths(&a, self.options.atlas_a);
        let placed_b = place_paths(&b, self.options.atlas_b);
        let bounds = placed_a
            .iter()
            .chain(&placed_b)
            .map(|p| p.extents)
            .reduce(|x, y| x.union(&y));

        // Step 3: split each operand at its crossings with the other
        let mut fragments_a = split_paths(&placed_a, &placed_b, ModelSource::A, pmd);
        let mut fragments_b = split_paths(&placed_b, &placed_a, ModelSource::B, pmd);

        // Step 4: pair up fragments both operands share
        mark_duplicates(&mut fragments_a, &mut fragments_b, pmd);

        // Step 5: classify against the other operand and select
        let inside_a = PointContainment::from_placed(placed_a, bounds, self.options.far_point);
        let inside_b = PointContainment::from_placed(placed_b, bounds, self.options.far_point);
        let decide = |fragment: Fragment| {
            let decision = self.decide(&fragment, &inside_a, &inside_b);
            (fragment, decision)
        };
        let decided_a: Vec<_> = fragments_a.into_iter().map(&decide).collect();
        let decided_b: Vec<_> = fragments_b.into_iter().map(&decide).collect();
        let fragment_count = decided_a.len() + decided_b.len();

        // Step 6: rebuild both operands from the kept fragments
        let mut deleted = Vec::new();
        rebuild(&mut a, decided_a, &mut deleted)?;
        rebuild(&mut b, decided_b, &mut deleted)?;
        let mut model = Model::new();
        model.add_model(ModelSource::A.id(), a)?;
        model.add_model(ModelSource::B.id(), b)?;

        // Step 7: strip spurs
        if self.options.trim_dead_ends {
            for removed in RemoveDeadEnds::new(pmd).execute(&mut model) {
                let source = match removed.route.steps().first() {
                    Some(RouteStep::Model(id)) if id == ModelSource::B.id() => ModelSource::B,
                    _ => ModelSource::A,
                };
                deleted.push(DeletedPath {
                    route: removed.route,
                    path: removed.path,
                    source,
                    reason: DeleteReason::DeadEnd,
                });
            }
        }

        debug!(
            fragments = fragment_count,
            deleted = deleted.len(),
            kept = model.path_count(),
            "combine finished"
        );
        Ok(CombineResult { model, deleted })
    }

    fn decide(&self, fragment: &Fragment, inside_a: &PointContainment, inside_b: &PointContainment) -> KeepDecision {
        let other = match fragment.source {
            ModelSource::A => inside_b,
            ModelSource::B => inside_a,
        };
        let classification = if fragment.duplicate {
            PointClassification::OnBoundary
        } else {
            other.classify(&fragment.path.middle_point())
        };
        match (fragment.source, classification) {
            (ModelSource::A, PointClassification::OnBoundary) => {
                let side = shared_side(&fragment.path, inside_a, inside_b, self.options.point_matching_distance);
                should_keep_shared(fragment.source, side, &self.flags)
            }
            _ => should_keep_fragment(fragment.source, classification, &self.flags),
        }
    }
}

/// Probes just to the left of a shared fragment to see which operands fill it.
fn shared_side(path: &Path, inside_a: &PointContainment, inside_b: &PointContainment, probe: f64) -> SharedSide {
    let tangent = path.tangent(0.5);
    let normal = Vector2::new(-tangent.y, tangent.x);
    let length = normal.norm();
    if length <= f64::EPSILON {
        return SharedSide::Same;
    }
    let left = path.middle_point() + normal * (probe / length);
    let in_a = inside_a.classify(&left) == PointClassification::Inside;
    let in_b = inside_b.classify(&left) == PointClassification::Inside;
    if in_a == in_b {
        SharedSide::Same
    } else {
        SharedSide::Opposite
    }
}

fn reject_beziers(model: &Model, source: ModelSource) -> Result<()> {
    let walked = model.walk_paths(false);
    if let Some(bezier) = walked.iter().find(|w| matches!(w.path.kind, PathKind::Bezier(_))) {
        return Err(OperationError::Unsupported(format!(
            "bezier at {} in model {}; convert it to arcs before combining",
            bezier.route,
            source.id()
        ))
        .into());
    }
    Ok(())
}

/// `route` re-rooted under `prefix`.
fn nested(prefix: &Route, route: &Route) -> Route {
    route.steps().iter().fold(prefix.clone(), |acc, step| match step {
        RouteStep::Model(id) => acc.model(id),
        RouteStep::Path(id) => acc.path(id),
    })
}

/// Replaces every original path of `model` with its kept fragments.
///
/// All originals are removed before any fragment is added, so fragment ids
/// never collide with a path still waiting to be split.
fn rebuild(model: &mut Model, decided: Vec<(Fragment, KeepDecision)>, deleted: &mut Vec<DeletedPath>) -> Result<()> {
    let mut originals: Vec<Route> = decided.iter().map(|(f, _)| f.route.clone()).collect();
    originals.dedup();
    for route in &originals {
        model.remove_at(route)?;
    }

    for (fragment, decision) in decided {
        let local = moved_path(&fragment.path, &-fragment.offset);
        match decision {
            KeepDecision::Keep => {
                if let Some((parent, RouteStep::Path(id))) = fragment.route.split_last() {
                    model.model_at_mut(&parent)?.add_path_unique(id, local);
                }
            }
            KeepDecision::Discard(reason) => deleted.push(DeletedPath {
                route: nested(&Route::root().model(fragment.source.id()), &fragment.route),
                path: local,
                source: fragment.source,
                reason,
            }),
        }
    }
    Ok(())
}
