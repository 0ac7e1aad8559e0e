use std::collections::HashMap;

use super::{Point2, TOLERANCE};

/// Merges points that lie within a matching distance of each other into
/// shared nodes.
///
/// Points are bucketed into a square grid whose cell size equals the
/// matching distance, so a lookup only inspects the 3x3 neighborhood of the
/// query's cell. The first point inserted for a node is its representative.
#[derive(Debug, Clone)]
pub struct PointMatcher {
    distance: f64,
    cell: f64,
    nodes: Vec<Point2>,
    buckets: HashMap<(i64, i64), Vec<usize>>,
}

impl PointMatcher {
    /// Creates an empty matcher joining points closer than `distance`.
    #[must_use]
    pub fn new(distance: f64) -> Self {
        Self {
            distance,
            cell: distance.max(TOLERANCE),
            nodes: Vec::new(),
            buckets: HashMap::new(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell_of(&self, p: &Point2) -> (i64, i64) {
        ((p.x / self.cell).floor() as i64, (p.y / self.cell).floor() as i64)
    }

    /// Returns the node nearest to `p` within the matching distance.
    #[must_use]
    pub fn find(&self, p: &Point2) -> Option<usize> {
        let (cx, cy) = self.cell_of(p);
        let mut best: Option<(usize, f64)> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(ids) = self.buckets.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                for &id in ids {
                    let d = nalgebra::distance(&self.nodes[id], p);
                    if d <= self.distance && best.is_none_or(|(_, bd)| d < bd) {
                        best = Some((id, d));
                    }
                }
            }
        }
        best.map(|(id, _)| id)
    }

    /// Returns the node for `p`, creating a new one if no node is close enough.
    pub fn insert(&mut self, p: Point2) -> usize {
        if let Some(id) = self.find(&p) {
            return id;
        }
        let id = self.nodes.len();
        let key = self.cell_of(&p);
        self.nodes.push(p);
        self.buckets.entry(key).or_default().push(id);
        id
    }

    /// Representative point of a node.
    #[must_use]
    pub fn point(&self, id: usize) -> Point2 {
        self.nodes[id]
    }

    /// Number of distinct nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when no point has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
