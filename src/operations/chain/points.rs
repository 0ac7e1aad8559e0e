use crate::geometry::{Path, PathKind};
use crate::math::polygon_2d::is_clockwise;
use crate::math::{arc_2d::point_on_circle, Point2};
use crate::model::Model;
use crate::operations::bezier::BezierToArcs;

use super::types::{Chain, ChainLink};

/// Facets per full chain used when no facet size is given.
const DEFAULT_FACETS: f64 = 100.0;

/// Points along `path` from its start to its end.
///
/// Lines give their two endpoints. Arcs and circles are split into facets
/// no longer than `max_arc_facet`; circles start and end at 0°. Beziers are
/// flattened through their arc approximation.
#[must_use]
pub fn path_key_points(path: &Path, max_arc_facet: f64) -> Vec<Point2> {
    match &path.kind {
        PathKind::Line(l) => vec![l.origin, l.end],
        PathKind::Circle(c) => facet_points(&c.origin, c.radius(), 0.0, 360.0, max_arc_facet),
        PathKind::Arc(a) => facet_points(&a.origin, a.radius(), a.start_angle, a.span(), max_arc_facet),
        PathKind::Bezier(seed) => {
            let mut points: Vec<Point2> = Vec::new();
            for piece in BezierToArcs::default().pieces(seed) {
                let mut pts = path_key_points(&piece.path, max_arc_facet);
                if piece.reversed {
                    pts.reverse();
                }
                push_all(&mut points, pts);
            }
            points
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn facet_points(center: &Point2, radius: f64, start: f64, span: f64, max_facet: f64) -> Vec<Point2> {
    let length = radius * span.to_radians();
    let count = if max_facet > 0.0 && max_facet.is_finite() {
        (length / max_facet).ceil().clamp(1.0, 3600.0) as usize
    } else {
        1
    };
    (0..=count)
        .map(|i| point_on_circle(center, radius, start + span * i as f64 / count as f64))
        .collect()
}

fn push_all(points: &mut Vec<Point2>, more: Vec<Point2>) {
    for p in more {
        if points.last().is_none_or(|last| nalgebra::distance(last, &p) > f64::EPSILON * 1e3) {
            points.push(p);
        }
    }
}

impl Chain {
    /// Flattens the chain into a polyline in travel order.
    ///
    /// Shared points between links appear once; for endless chains the
    /// closing point is not repeated.
    #[must_use]
    pub fn to_key_points(&self, max_arc_facet: f64) -> Vec<Point2> {
        let mut points: Vec<Point2> = Vec::new();
        for link in &self.links {
            let mut pts = path_key_points(&link.path, max_arc_facet);
            if link.reversed {
                pts.reverse();
            }
            if let (Some(last), Some(first)) = (points.last(), pts.first()) {
                if nalgebra::distance(last, first) <= link.path_length.max(1.0) * 1e-6 {
                    pts.remove(0);
                }
            }
            push_all(&mut points, pts);
        }
        if self.endless && points.len() > 1 {
            if let (Some(first), Some(last)) = (points.first(), points.last()) {
                if nalgebra::distance(first, last) <= self.path_length.max(1.0) * 1e-6 {
                    points.pop();
                }
            }
        }
        points
    }

    /// Reverses the travel direction in place.
    pub fn reverse(&mut self) {
        self.links.reverse();
        for link in &mut self.links {
            link.reversed = !link.reversed;
            link.endpoints = (link.endpoints.1, link.endpoints.0);
        }
    }

    /// The chain's paths in absolute coordinates, keyed `"0"`, `"1"`, ...
    /// in travel order.
    #[must_use]
    pub fn to_model(&self) -> Model {
        let mut model = Model::new();
        for (i, ChainLink { path, .. }) in self.links.iter().enumerate() {
            model.set_path(i.to_string(), path.clone());
        }
        model
    }

    pub(super) fn default_facet(&self) -> f64 {
        self.path_length / DEFAULT_FACETS
    }
}

/// Winding of an endless chain. `None` for open or degenerate chains.
#[must_use]
pub fn is_chain_clockwise(chain: &Chain) -> Option<bool> {
    if !chain.endless {
        return None;
    }
    is_clockwise(&chain.to_key_points(chain.default_facet()))
}
