use crate::geometry::{Path, PathKind};
use crate::math::{Point2, Vector2};
use crate::model::Route;
use crate::operations::intersect::{Intersect, IntersectionOptions, PathRelation};
use crate::operations::modification::break_at_point;
use crate::operations::query::{is_path_equal, is_point_on_path};

use super::classify::PlacedPath;

/// Which operand a fragment originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSource {
    A,
    B,
}

impl ModelSource {
    /// Id of the operand's child model in a combine result.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
        }
    }
}

/// A piece of an operand path, cut at every crossing with the other operand.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub source: ModelSource,
    /// Route of the original path within its operand.
    pub route: Route,
    /// Offset of the original path's parent model.
    pub offset: Vector2,
    /// The piece, in absolute coordinates.
    pub path: Path,
    /// Lies along a path of the other operand.
    pub overlapped: bool,
    /// Matches a fragment of the other operand.
    pub duplicate: bool,
}

/// Splits every path in `own` at its crossings with `foreign`.
///
/// Where two paths overlap, the piece is also cut at the foreign path's
/// endpoints so the shared stretch becomes a fragment of its own.
pub(super) fn split_paths(
    own: &[PlacedPath],
    foreign: &[PlacedPath],
    source: ModelSource,
    point_matching_distance: f64,
) -> Vec<Fragment> {
    let intersect = Intersect::new(IntersectionOptions::default());
    let mut fragments = Vec::new();

    for placed in own {
        let mut cuts: Vec<Point2> = Vec::new();
        let mut overlaps: Vec<&Path> = Vec::new();
        for other in foreign {
            if !placed.extents.overlaps(&other.extents, point_matching_distance) {
                continue;
            }
            match intersect.execute(&placed.path, &other.path) {
                PathRelation::Disjoint => {}
                PathRelation::Crossing(hit) => cuts.extend(hit.points),
                PathRelation::Overlapping => {
                    if let Some((start, end)) = other.path.endpoints() {
                        cuts.push(start);
                        cuts.push(end);
                    }
                    overlaps.push(&other.path);
                }
            }
        }

        for piece in break_at_points(placed.path.clone(), &cuts) {
            let mid = piece.middle_point();
            let overlapped = overlaps
                .iter()
                .any(|other| is_point_on_path(&mid, other, point_matching_distance, false));
            fragments.push(Fragment {
                source,
                route: placed.route.clone(),
                offset: placed.offset,
                path: piece,
                overlapped,
                duplicate: false,
            });
        }
    }
    fragments
}

/// Breaks `path` at each of `points`, returning the pieces in travel order.
fn break_at_points(path: Path, points: &[Point2]) -> Vec<Path> {
    let mut pieces = vec![path];
    for point in points {
        for i in 0..pieces.len() {
            let was_circle = matches!(pieces[i].kind, PathKind::Circle(_));
            if let Some(rest) = break_at_point(&mut pieces[i], point) {
                pieces.insert(i + 1, rest);
                break;
            }
            // A circle opens at the first point on it.
            if was_circle && !matches!(pieces[i].kind, PathKind::Circle(_)) {
                break;
            }
        }
    }
    pieces
}

/// Flags overlapped fragments that appear in both operands.
pub(super) fn mark_duplicates(a: &mut [Fragment], b: &mut [Fragment], point_matching_distance: f64) {
    for fa in a.iter_mut().filter(|f| f.overlapped) {
        for fb in b.iter_mut().filter(|f| f.overlapped) {
            if is_path_equal(&fa.path, &fb.path, point_matching_distance) {
                fa.duplicate = true;
                fb.duplicate = true;
            }
        }
    }
}
