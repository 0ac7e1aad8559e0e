use std::collections::{BTreeMap, HashMap};

use slotmap::SlotMap;
use tracing::debug;

use crate::geometry::Path;
use crate::math::point_matcher::PointMatcher;
use crate::math::polygon_2d::{point_in_polygon, signed_area_2d};
use crate::math::{Point2, Vector2};
use crate::model::{Model, Route, WalkedPath};
use crate::operations::query::path_length;
use crate::operations::transform::moved_path;

use super::points::is_chain_clockwise;
use super::types::{Chain, ChainLink, ChainSet, ContainOptions, FindChainsOptions};

slotmap::new_key_type! {
    /// Identifier of an unchained path during a search.
    struct LinkId;
}

/// A path waiting to be chained.
#[derive(Debug)]
struct Candidate {
    route: Route,
    offset: Vector2,
    path: Path,
    path_length: f64,
    start: usize,
    end: usize,
    visited: bool,
}

impl Candidate {
    fn into_link(self, reversed: bool) -> ChainLink {
        let (s, e) = self.path.endpoints().unwrap_or_else(|| {
            let p = self.path.point_at_ratio(0.0);
            (p, p)
        });
        ChainLink {
            route: self.route,
            offset: self.offset,
            path: self.path,
            reversed,
            endpoints: if reversed { (e, s) } else { (s, e) },
            path_length: self.path_length,
        }
    }
}

/// Finds chains of paths joined end to end.
pub struct FindChains {
    options: FindChainsOptions,
}

impl FindChains {
    /// Creates a new `FindChains` query.
    #[must_use]
    pub fn new(options: FindChainsOptions) -> Self {
        Self { options }
    }

    /// Chains every path in `model`.
    #[must_use]
    pub fn execute(&self, model: &Model) -> ChainSet {
        self.chain(model.walk_paths(self.options.shallow))
    }

    /// Chains each layer separately. Paths without a layer (own or
    /// inherited) are grouped under `None`.
    #[must_use]
    pub fn execute_by_layers(&self, model: &Model) -> BTreeMap<Option<String>, ChainSet> {
        let mut groups: BTreeMap<Option<String>, Vec<WalkedPath<'_>>> = BTreeMap::new();
        for walked in model.walk_paths(self.options.shallow) {
            groups.entry(walked.layer.map(str::to_owned)).or_default().push(walked);
        }
        groups.into_iter().map(|(layer, walked)| (layer, self.chain(walked))).collect()
    }

    fn chain(&self, walked: Vec<WalkedPath<'_>>) -> ChainSet {
        let pmd = self.options.point_matching_distance;
        let mut matcher = PointMatcher::new(pmd);
        let mut store: SlotMap<LinkId, Candidate> = SlotMap::with_key();
        let mut at_node: HashMap<usize, Vec<LinkId>> = HashMap::new();
        let mut set = ChainSet::default();

        for w in walked {
            let path = moved_path(w.path, &w.offset);
            let length = path_length(&path);
            let mut candidate = Candidate {
                route: w.route,
                offset: w.offset,
                path,
                path_length: length,
                start: 0,
                end: 0,
                visited: false,
            };
            if length < pmd / 5.0 {
                set.loose.push(candidate.into_link(false));
                continue;
            }
            if candidate.path.is_closed() {
                set.chains.push(Chain::new(vec![candidate.into_link(false)], true));
                continue;
            }
            let Some((s, e)) = candidate.path.endpoints() else {
                set.loose.push(candidate.into_link(false));
                continue;
            };
            candidate.start = matcher.insert(s);
            candidate.end = matcher.insert(e);
            if candidate.start == candidate.end {
                set.chains.push(Chain::new(vec![candidate.into_link(false)], true));
                continue;
            }
            let (start, end) = (candidate.start, candidate.end);
            let id = store.insert(candidate);
            at_node.entry(start).or_default().push(id);
            at_node.entry(end).or_default().push(id);
        }

        while let Some(first) = store.keys().next() {
            let (links, endless) = trace(&mut store, &at_node, first);
            let links: Vec<ChainLink> = links
                .into_iter()
                .filter_map(|(id, reversed)| store.remove(id).map(|c| c.into_link(reversed)))
                .collect();
            if links.len() == 1 && !endless {
                set.loose.extend(links);
            } else {
                set.chains.push(Chain::new(links, endless));
            }
        }

        set.chains.sort_by(|a, b| b.path_length.total_cmp(&a.path_length));
        if let Some(contain) = self.options.contain {
            set.chains = nest(set.chains, contain);
        }
        debug!(chains = set.chains.len(), loose = set.loose.len(), "chains found");
        set
    }
}

/// Walks from `first` in both directions, marking links visited.
/// Returns the links in travel order with their reversal flags.
fn trace(
    store: &mut SlotMap<LinkId, Candidate>,
    at_node: &HashMap<usize, Vec<LinkId>>,
    first: LinkId,
) -> (Vec<(LinkId, bool)>, bool) {
    store[first].visited = true;
    let start_node = store[first].start;
    let mut node = store[first].end;
    let mut forward = vec![(first, false)];
    let mut endless = false;
    loop {
        if node == start_node {
            endless = true;
            break;
        }
        let Some((next, starts_here)) = unvisited_at(store, at_node, node) else {
            break;
        };
        store[next].visited = true;
        node = if starts_here { store[next].end } else { store[next].start };
        forward.push((next, !starts_here));
    }
    if endless {
        return (forward, true);
    }

    let mut backward = Vec::new();
    let mut node = start_node;
    while let Some((prev, starts_here)) = unvisited_at(store, at_node, node) {
        store[prev].visited = true;
        node = if starts_here { store[prev].end } else { store[prev].start };
        backward.push((prev, starts_here));
    }
    backward.reverse();
    backward.extend(forward);
    (backward, false)
}

/// First unvisited link touching `node`, and whether it starts there.
/// Links already moved into an earlier chain are gone from `store`.
fn unvisited_at(
    store: &SlotMap<LinkId, Candidate>,
    at_node: &HashMap<usize, Vec<LinkId>>,
    node: usize,
) -> Option<(LinkId, bool)> {
    at_node
        .get(&node)?
        .iter()
        .find_map(|id| {
            let candidate = store.get(*id).filter(|c| !c.visited)?;
            Some((*id, candidate.start == node))
        })
}

/// Moves every endless chain under the smallest endless chain enclosing it.
fn nest(chains: Vec<Chain>, options: ContainOptions) -> Vec<Chain> {
    let outlines: Vec<Option<(Vec<Point2>, f64)>> = chains
        .iter()
        .map(|c| {
            c.endless.then(|| {
                let points = c.to_key_points(c.default_facet());
                let area = signed_area_2d(&points).abs();
                (points, area)
            })
        })
        .collect();

    let n = chains.len();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut is_root = vec![true; n];
    for i in 0..n {
        let Some((_, own_area)) = &outlines[i] else {
            continue;
        };
        let probe = chains[i].links[0].path.middle_point();
        let mut best: Option<(usize, f64)> = None;
        for (j, outline) in outlines.iter().enumerate() {
            let Some((points, area)) = outline else {
                continue;
            };
            if i == j || area <= own_area {
                continue;
            }
            if point_in_polygon(&probe, points) && best.is_none_or(|(_, a)| *area < a) {
                best = Some((j, *area));
            }
        }
        if let Some((parent, _)) = best {
            children[parent].push(i);
            is_root[i] = false;
        }
    }

    let mut slots: Vec<Option<Chain>> = chains.into_iter().map(Some).collect();
    (0..n)
        .filter(|i| is_root[*i])
        .filter_map(|i| adopt(i, 0, &mut slots, &children, options))
        .collect()
}

fn adopt(
    index: usize,
    depth: usize,
    slots: &mut [Option<Chain>],
    children: &[Vec<usize>],
    options: ContainOptions,
) -> Option<Chain> {
    let mut chain = slots[index].take()?;
    if options.alternate_direction && chain.endless {
        let clockwise = depth % 2 == 0;
        if is_chain_clockwise(&chain) == Some(!clockwise) {
            chain.reverse();
        }
    }
    for &child in &children[index] {
        if let Some(inner) = adopt(child, depth + 1, slots, children, options) {
            chain.contains.push(inner);
        }
    }
    Some(chain)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::POINT_MATCHING_DISTANCE;

    fn square(model: &mut Model, prefix: &str, x: f64, y: f64, size: f64) {
        let pts = [(x, y), (x + size, y), (x + size, y + size), (x, y + size)];
        for i in 0..4 {
            let (a, b) = (pts[i], pts[(i + 1) % 4]);
            model
                .add_path(format!("{prefix}{i}"), Path::line(Point2::new(a.0, a.1), Point2::new(b.0, b.1)))
                .unwrap();
        }
    }

    #[test]
    fn unit_square_is_one_endless_chain() {
        let mut m = Model::new();
        square(&mut m, "s", 0.0, 0.0, 1.0);
        let set = FindChains::new(FindChainsOptions::default()).execute(&m);
        assert_eq!(set.chains.len(), 1);
        let chain = &set.chains[0];
        assert!(chain.endless);
        assert_eq!(chain.links.len(), 4);
        assert!((chain.path_length - 4.0).abs() < 1e-12);
        for w in chain.links.windows(2) {
            assert!(nalgebra::distance(&w[0].endpoints.1, &w[1].endpoints.0) <= POINT_MATCHING_DISTANCE);
        }
    }

    #[test]
    fn two_half_arcs_close_a_loop() {
        let mut m = Model::new();
        m.add_path("upper", Path::arc(Point2::origin(), 1.0, 0.0, 180.0).unwrap()).unwrap();
        m.add_path("lower", Path::arc(Point2::origin(), 1.0, 180.0, 360.0).unwrap()).unwrap();
        square(&mut m, "s", 5.0, 5.0, 1.0);
        let set = FindChains::new(FindChainsOptions::default()).execute(&m);
        assert_eq!(set.chains.len(), 2);
        assert!(set.loose.is_empty());
        let ring = &set.chains[0];
        assert!(ring.endless);
        assert_eq!(ring.links.len(), 2);
        assert!((ring.path_length - 2.0 * std::f64::consts::PI).abs() < 1e-9);
        assert!(set.chains[1].endless);
        assert_eq!(set.chains[1].links.len(), 4);
    }

    #[test]
    fn reversed_links_are_followed() {
        let mut m = Model::new();
        m.add_path("a", Path::line(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0))).unwrap();
        m.add_path("b", Path::line(Point2::new(2.0, 0.0), Point2::new(1.0, 0.0))).unwrap();
        m.add_path("c", Path::line(Point2::new(2.0, 0.0), Point2::new(3.0, 1.0))).unwrap();
        let set = FindChains::new(FindChainsOptions::default()).execute(&m);
        assert_eq!(set.chains.len(), 1);
        let chain = &set.chains[0];
        assert!(!chain.endless);
        assert_eq!(chain.links.len(), 3);
        assert_eq!(chain.links.iter().filter(|l| l.reversed).count(), 1);
    }

    #[test]
    fn chain_starts_mid_path_and_extends_backwards() {
        let mut m = Model::new();
        // "a" is visited first but sits in the middle of the chain.
        m.add_path("a", Path::line(Point2::new(1.0, 0.0), Point2::new(2.0, 0.0))).unwrap();
        m.add_path("b", Path::line(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0))).unwrap();
        m.add_path("c", Path::line(Point2::new(2.0, 0.0), Point2::new(3.0, 0.0))).unwrap();
        let set = FindChains::new(FindChainsOptions::default()).execute(&m);
        let chain = &set.chains[0];
        assert_eq!(chain.links.len(), 3);
        assert_eq!(chain.links[0].route.to_string(), "paths/b");
        assert!(nalgebra::distance(&chain.links[0].endpoints.0, &Point2::new(0.0, 0.0)) < 1e-12);
    }

    #[test]
    fn circles_and_loose_paths() {
        let mut m = Model::new();
        m.add_path("ring", Path::circle(Point2::new(5.0, 5.0), 1.0).unwrap()).unwrap();
        m.add_path("lonely", Path::line(Point2::new(9.0, 9.0), Point2::new(10.0, 9.0))).unwrap();
        m.add_path("speck", Path::line(Point2::new(20.0, 20.0), Point2::new(20.0, 20.0001))).unwrap();
        let set = FindChains::new(FindChainsOptions::default()).execute(&m);
        assert_eq!(set.chains.len(), 1);
        assert!(set.chains[0].endless);
        assert_eq!(set.loose.len(), 2);
    }

    #[test]
    fn nested_offsets_are_absolute() {
        let mut m = Model::new();
        let mut child = Model::new().with_origin(Point2::new(10.0, 0.0));
        square(&mut child, "s", 0.0, 0.0, 1.0);
        m.add_model("inner", child).unwrap();
        let set = FindChains::new(FindChainsOptions::default()).execute(&m);
        let xs: Vec<f64> = set.chains[0].links.iter().map(|l| l.endpoints.0.x).collect();
        assert!(xs.iter().all(|x| *x >= 10.0 - 1e-12));
        let shallow = FindChains::new(FindChainsOptions {
            shallow: true,
            ..FindChainsOptions::default()
        })
        .execute(&m);
        assert!(shallow.chains.is_empty());
    }

    #[test]
    fn containment_nests_and_alternates() {
        let mut m = Model::new();
        square(&mut m, "outer", 0.0, 0.0, 10.0);
        square(&mut m, "hole", 2.0, 2.0, 2.0);
        square(&mut m, "island", 2.5, 2.5, 1.0);
        square(&mut m, "apart", 20.0, 0.0, 3.0);
        let opts = FindChainsOptions {
            contain: Some(ContainOptions {
                alternate_direction: true,
            }),
            ..FindChainsOptions::default()
        };
        let set = FindChains::new(opts).execute(&m);
        assert_eq!(set.chains.len(), 2);
        let outer = &set.chains[0];
        assert!((outer.path_length - 40.0).abs() < 1e-9);
        assert_eq!(outer.tree_size(), 3);
        assert_eq!(is_chain_clockwise(outer), Some(true));
        let hole = &outer.contains[0];
        assert_eq!(is_chain_clockwise(hole), Some(false));
        assert_eq!(is_chain_clockwise(&hole.contains[0]), Some(true));
    }

    #[test]
    fn layers_are_chained_apart() {
        let mut m = Model::new();
        m.add_path("a", Path::line(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)).with_layer("red")).unwrap();
        m.add_path("b", Path::line(Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)).with_layer("red")).unwrap();
        m.add_path("c", Path::line(Point2::new(1.0, 1.0), Point2::new(0.0, 1.0))).unwrap();
        let by_layer = FindChains::new(FindChainsOptions::default()).execute_by_layers(&m);
        assert_eq!(by_layer[&Some("red".to_owned())].chains[0].links.len(), 2);
        assert_eq!(by_layer[&None].loose.len(), 1);
    }
}
