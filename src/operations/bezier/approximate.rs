use tracing::debug;

use crate::geometry::{Arc, BezierSeed, Curve, Line, Path, PathKind};
use crate::math::{distance_2d, Point2, TOLERANCE};
use crate::model::Model;
use crate::operations::query::path_distance;

/// Sub-curves shorter than this are emitted as-is.
const MIN_SEGMENT_LENGTH: f64 = 1e-4;

/// Subdivision depth cap.
const MAX_DEPTH: u32 = 24;

/// Curve samples per sub-curve used to measure deviation.
const SAMPLES: u32 = 16;

/// Share of the accuracy a fitted piece may use at the samples, leaving
/// headroom for the curve between them.
const SAMPLE_MARGIN: f64 = 0.75;

/// One arc or line approximating a stretch of a bezier seed.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierPiece {
    pub path: Path,
    /// Parameter range `[t0, t1]` on the approximated seed.
    pub range: (f64, f64),
    /// `true` when the arc runs counter-clockwise from the curve's end
    /// towards its start, i.e. opposite to the curve's travel.
    pub reversed: bool,
}

/// Approximates bezier seeds by chains of circular arcs.
///
/// The curve is first cut at its x/y extrema. Each span is then fitted with
/// the arc through its start, middle and end; if any sampled curve point
/// strays further than the accuracy from that arc, the span is halved by de
/// Casteljau subdivision and both halves are fitted again. Spans shorter
/// than a minimum length are accepted regardless.
#[derive(Debug, Clone, Copy, Default)]
pub struct BezierToArcs {
    /// Maximum deviation. Defaults to a hundredth of the curve's length.
    pub accuracy: Option<f64>,
}

impl BezierToArcs {
    /// Creates an approximator with an explicit accuracy.
    #[must_use]
    pub fn new(accuracy: f64) -> Self {
        Self {
            accuracy: Some(accuracy),
        }
    }

    /// Approximates `seed`, in order from its origin to its end.
    #[must_use]
    pub fn pieces(&self, seed: &BezierSeed) -> Vec<BezierPiece> {
        let mut root = seed.clone();
        root.parent_range = Some((0.0, 1.0));

        if root.is_linear() {
            return vec![BezierPiece {
                path: Path::line(root.origin, root.end),
                range: (0.0, 1.0),
                reversed: false,
            }];
        }

        let length = root.length();
        let accuracy = self
            .accuracy
            .filter(|a| a.is_finite() && *a > 0.0)
            .unwrap_or(length / 100.0)
            .max(TOLERANCE);

        let mut out = Vec::new();
        for span in root.extrema().windows(2) {
            let sub = root.segment(span[0], span[1]);
            subdivide(&sub, accuracy, 0, &mut out);
        }
        debug!(pieces = out.len(), accuracy, "bezier approximated");
        out
    }

    /// Approximates `seed` as a model.
    ///
    /// Each extrema span becomes a child model keyed `"0"`, `"1"`, ...,
    /// holding its pieces as paths keyed the same way.
    #[must_use]
    pub fn execute(&self, seed: &BezierSeed) -> Model {
        let mut model = Model::new();
        let extrema = seed.extrema();
        let mut span_index = 0usize;
        let mut span = Model::new();
        for piece in self.pieces(seed) {
            while span_index + 1 < extrema.len() && piece.range.0 >= extrema[span_index + 1] - TOLERANCE {
                flush_span(&mut model, &mut span, span_index);
                span_index += 1;
            }
            let id = span.paths.len().to_string();
            span.set_path(id, piece.path);
        }
        flush_span(&mut model, &mut span, span_index);
        model
    }

    /// Replaces every bezier path directly in `model` (and, recursively, in
    /// its children) with a child model of arcs under the same id. The
    /// path's layer is carried onto the new model.
    pub fn replace_in(&self, model: &mut Model) {
        let ids: Vec<String> = model
            .paths
            .iter()
            .filter(|(_, p)| matches!(p.kind, PathKind::Bezier(_)))
            .map(|(id, _)| id.clone())
            .collect();
        for id in ids {
            let Some(path) = model.paths.remove(&id) else {
                continue;
            };
            let PathKind::Bezier(seed) = &path.kind else {
                continue;
            };
            let mut arcs = self.execute(seed);
            arcs.layer = path.layer;
            model.add_model_unique(&id, arcs);
        }
        for child in model.models.values_mut() {
            self.replace_in(child);
        }
    }
}

fn flush_span(model: &mut Model, span: &mut Model, index: usize) {
    if span.paths.is_empty() {
        return;
    }
    model.set_model(index.to_string(), std::mem::take(span));
}

fn subdivide(sub: &BezierSeed, accuracy: f64, depth: u32, out: &mut Vec<BezierPiece>) {
    let range = sub.parent_range.unwrap_or((0.0, 1.0));
    let (fitted, reversed) = fit(sub);
    let length = sub.length();

    let done = length < MIN_SEGMENT_LENGTH || depth >= MAX_DEPTH || deviation(sub, &fitted) <= accuracy * SAMPLE_MARGIN;
    if done {
        if length >= MIN_SEGMENT_LENGTH || out.is_empty() {
            out.push(BezierPiece {
                path: fitted,
                range,
                reversed,
            });
        } else if let Some(last) = out.last_mut() {
            // Too short to keep; stretch the previous piece's range over it.
            last.range.1 = range.1;
        }
        return;
    }

    let (left, right) = sub.split(0.5);
    subdivide(&left, accuracy, depth + 1, out);
    subdivide(&right, accuracy, depth + 1, out);
}

/// The arc through the sub-curve's start, middle and end, or the chord when
/// those are collinear. The flag tells whether the arc runs end to start.
fn fit(sub: &BezierSeed) -> (Path, bool) {
    let middle = sub.compute(0.5);
    if distance_2d::point_to_segment_dist(&middle, &sub.origin, &sub.end) <= TOLERANCE {
        return (Line::new(sub.origin, sub.end).into(), false);
    }
    match Arc::from_three_points(&sub.origin, &middle, &sub.end) {
        Some(arc) => {
            let reversed = nalgebra::distance(&arc.start_point(), &sub.origin)
                > nalgebra::distance(&arc.end_point(), &sub.origin);
            (arc.into(), reversed)
        }
        None => (Line::new(sub.origin, sub.end).into(), false),
    }
}

/// Largest distance from sampled curve points to `fitted`.
fn deviation(sub: &BezierSeed, fitted: &Path) -> f64 {
    (1..SAMPLES)
        .map(|i| {
            let p: Point2 = sub.compute(f64::from(i) / f64::from(SAMPLES));
            path_distance(&p, fitted)
        })
        .fold(0.0, f64::max)
}
