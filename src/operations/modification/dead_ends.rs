use tracing::debug;

use crate::geometry::Path;
use crate::math::point_matcher::PointMatcher;
use crate::model::{Model, Route, WalkedPath};

/// A path taken out of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedPath {
    pub route: Route,
    pub path: Path,
}

/// Repeatedly removes paths with an endpoint that touches no other path.
///
/// Closed paths (circles, full arcs, closed beziers) are never dead ends.
/// Removing one spur can expose another, so the sweep repeats until nothing
/// changes.
pub struct RemoveDeadEnds<'a> {
    point_matching_distance: f64,
    keep: Option<Box<dyn Fn(&WalkedPath<'_>) -> bool + 'a>>,
}

impl<'a> RemoveDeadEnds<'a> {
    /// Creates a new `RemoveDeadEnds` operation.
    #[must_use]
    pub fn new(point_matching_distance: f64) -> Self {
        Self {
            point_matching_distance,
            keep: None,
        }
    }

    /// Protects every path for which `keep` returns `true`.
    #[must_use]
    pub fn with_keep(mut self, keep: impl Fn(&WalkedPath<'_>) -> bool + 'a) -> Self {
        self.keep = Some(Box::new(keep));
        self
    }

    /// Removes the dead ends from `model` and returns them.
    pub fn execute(&self, model: &mut Model) -> Vec<RemovedPath> {
        let mut matcher = PointMatcher::new(self.point_matching_distance);
        let mut candidates: Vec<(Route, usize, usize)> = Vec::new();
        for walked in model.walk_paths(false) {
            if walked.path.is_closed() || self.keep.as_ref().is_some_and(|keep| keep(&walked)) {
                continue;
            }
            let Some((start, end)) = walked.path.endpoints() else {
                continue;
            };
            let a = matcher.insert(start + walked.offset);
            let b = matcher.insert(end + walked.offset);
            candidates.push((walked.route.clone(), a, b));
        }
        // Valence counts every walked path, protected or not.
        let mut valence = vec![0usize; matcher.len()];
        for walked in model.walk_paths(false) {
            if walked.path.is_closed() {
                continue;
            }
            if let Some((start, end)) = walked.path.endpoints() {
                for p in [start + walked.offset, end + walked.offset] {
                    if let Some(node) = matcher.find(&p) {
                        valence[node] += 1;
                    }
                }
            }
        }

        let mut removed = vec![false; candidates.len()];
        loop {
            let mut changed = false;
            for (i, (_, a, b)) in candidates.iter().enumerate() {
                if removed[i] || a == b {
                    continue;
                }
                if valence[*a] < 2 || valence[*b] < 2 {
                    removed[i] = true;
                    valence[*a] -= 1;
                    valence[*b] -= 1;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        let out: Vec<RemovedPath> = candidates
            .into_iter()
            .zip(removed)
            .filter(|(_, gone)| *gone)
            .filter_map(|((route, _, _), _)| {
                let path = model.remove_at(&route).ok()?;
                Some(RemovedPath { route, path })
            })
            .collect();
        debug!(removed = out.len(), "dead ends removed");
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point2, POINT_MATCHING_DISTANCE};

    fn square_with_tail() -> Model {
        let mut m = Model::new();
        let pts = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        for i in 0..4 {
            let (a, b) = (pts[i], pts[(i + 1) % 4]);
            m.add_path(format!("s{i}"), Path::line(Point2::new(a.0, a.1), Point2::new(b.0, b.1)))
                .unwrap();
        }
        m.add_path("t0", Path::line(Point2::new(1.0, 1.0), Point2::new(2.0, 2.0))).unwrap();
        m.add_path("t1", Path::line(Point2::new(2.0, 2.0), Point2::new(3.0, 2.0))).unwrap();
        m.add_path("ring", Path::circle(Point2::new(9.0, 9.0), 1.0).unwrap()).unwrap();
        m
    }

    #[test]
    fn strips_tail_repeatedly() {
        let mut m = square_with_tail();
        let removed = RemoveDeadEnds::new(POINT_MATCHING_DISTANCE).execute(&mut m);
        let mut ids: Vec<String> = removed.iter().map(|r| r.route.to_string()).collect();
        ids.sort();
        assert_eq!(ids, ["paths/t0", "paths/t1"]);
        assert_eq!(m.paths.len(), 5);
        assert!(m.paths.contains_key("ring"));
    }

    #[test]
    fn keep_predicate_protects_paths() {
        let mut m = square_with_tail();
        let removed = RemoveDeadEnds::new(POINT_MATCHING_DISTANCE)
            .with_keep(|w| w.id == "t1")
            .execute(&mut m);
        assert!(removed.is_empty());
        assert_eq!(m.paths.len(), 7);
    }

    #[test]
    fn nested_offsets_join_endpoints() {
        let mut m = Model::new();
        m.add_path("a", Path::line(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0))).unwrap();
        m.add_path("b", Path::line(Point2::new(1.0, 0.0), Point2::new(0.0, 0.0))).unwrap();
        let mut child = Model::new().with_origin(Point2::new(1.0, 0.0));
        child.add_path("c", Path::line(Point2::new(0.0, 0.0), Point2::new(0.0, 1.0))).unwrap();
        m.add_model("child", child).unwrap();
        let removed = RemoveDeadEnds::new(POINT_MATCHING_DISTANCE).execute(&mut m);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].route.to_string(), "models/child/paths/c");
    }
}
