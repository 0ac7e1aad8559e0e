use crate::error::{GeometryError, Result};
use crate::math::{round, Point2, Vector2, TOLERANCE};

use super::Curve;

/// Abscissae of the 24-point Gauss-Legendre rule on `[-1, 1]`.
const GAUSS_T: [f64; 24] = [
    -0.064_056_892_862_605_626,
    0.064_056_892_862_605_626,
    -0.191_118_867_473_616_31,
    0.191_118_867_473_616_31,
    -0.315_042_679_696_163_37,
    0.315_042_679_696_163_37,
    -0.433_793_507_626_045_14,
    0.433_793_507_626_045_14,
    -0.545_421_471_388_839_54,
    0.545_421_471_388_839_54,
    -0.648_093_651_936_975_57,
    0.648_093_651_936_975_57,
    -0.740_124_191_578_554_36,
    0.740_124_191_578_554_36,
    -0.820_001_985_973_902_92,
    0.820_001_985_973_902_92,
    -0.886_415_527_004_401_03,
    0.886_415_527_004_401_03,
    -0.938_274_552_002_732_76,
    0.938_274_552_002_732_76,
    -0.974_728_555_971_309_5,
    0.974_728_555_971_309_5,
    -0.995_187_219_997_021_36,
    0.995_187_219_997_021_36,
];

/// Weights of the 24-point Gauss-Legendre rule.
const GAUSS_W: [f64; 24] = [
    0.127_938_195_346_752_16,
    0.127_938_195_346_752_16,
    0.125_837_456_346_828_3,
    0.125_837_456_346_828_3,
    0.121_670_472_927_803_39,
    0.121_670_472_927_803_39,
    0.115_505_668_053_725_6,
    0.115_505_668_053_725_6,
    0.107_444_270_115_965_63,
    0.107_444_270_115_965_63,
    0.097_618_652_104_113_89,
    0.097_618_652_104_113_89,
    0.086_190_161_531_953_28,
    0.086_190_161_531_953_28,
    0.073_346_481_411_080_31,
    0.073_346_481_411_080_31,
    0.059_298_584_915_436_78,
    0.059_298_584_915_436_78,
    0.044_277_438_817_419_81,
    0.044_277_438_817_419_81,
    0.028_531_388_628_933_66,
    0.028_531_388_628_933_66,
    0.012_341_229_799_987_2,
    0.012_341_229_799_987_2,
];

/// A quadratic or cubic bezier curve.
///
/// The seed is the line from `origin` to `end` plus one (quadratic) or two
/// (cubic) control points. A seed cut from a larger curve remembers the
/// `[start_t, end_t]` range it covers on that parent.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierSeed {
    /// Start point.
    pub origin: Point2,
    controls: Vec<Point2>,
    /// End point.
    pub end: Point2,
    /// Parameter range on the parent curve this seed was split from.
    pub parent_range: Option<(f64, f64)>,
}

impl BezierSeed {
    /// Creates a new bezier seed.
    ///
    /// # Errors
    ///
    /// Returns an error unless there are one or two control points.
    pub fn new(origin: Point2, controls: Vec<Point2>, end: Point2) -> Result<Self> {
        if controls.is_empty() || controls.len() > 2 {
            return Err(GeometryError::InvalidControlPoints(controls.len()).into());
        }
        Ok(Self {
            origin,
            controls,
            end,
            parent_range: None,
        })
    }

    /// Quadratic seed with a single control point.
    #[must_use]
    pub fn quadratic(origin: Point2, control: Point2, end: Point2) -> Self {
        Self {
            origin,
            controls: vec![control],
            end,
            parent_range: None,
        }
    }

    /// Cubic seed with two control points.
    #[must_use]
    pub fn cubic(origin: Point2, c1: Point2, c2: Point2, end: Point2) -> Self {
        Self {
            origin,
            controls: vec![c1, c2],
            end,
            parent_range: None,
        }
    }

    /// Control points between `origin` and `end`.
    #[must_use]
    pub fn controls(&self) -> &[Point2] {
        &self.controls
    }

    /// Mutable access to the control points. The count cannot change.
    pub fn controls_mut(&mut self) -> &mut [Point2] {
        &mut self.controls
    }

    /// Polynomial degree: 2 or 3.
    #[must_use]
    pub fn order(&self) -> usize {
        self.controls.len() + 1
    }

    /// All defining points, `origin` first and `end` last.
    #[must_use]
    pub fn points(&self) -> Vec<Point2> {
        let mut pts = Vec::with_capacity(self.controls.len() + 2);
        pts.push(self.origin);
        pts.extend_from_slice(&self.controls);
        pts.push(self.end);
        pts
    }

    /// Evaluates the curve at parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn compute(&self, t: f64) -> Point2 {
        let p = self.points();
        let mt = 1.0 - t;
        if p.len() == 3 {
            let (a, b, c) = (mt * mt, 2.0 * mt * t, t * t);
            Point2::from(p[0].coords * a + p[1].coords * b + p[2].coords * c)
        } else {
            let (a, b, c, d) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
            Point2::from(p[0].coords * a + p[1].coords * b + p[2].coords * c + p[3].coords * d)
        }
    }

    /// First derivative at parameter `t`.
    #[must_use]
    pub fn derivative(&self, t: f64) -> Vector2 {
        let p = self.points();
        let mt = 1.0 - t;
        if p.len() == 3 {
            (p[1] - p[0]) * (2.0 * mt) + (p[2] - p[1]) * (2.0 * t)
        } else {
            (p[1] - p[0]) * (3.0 * mt * mt) + (p[2] - p[1]) * (6.0 * mt * t) + (p[3] - p[2]) * (3.0 * t * t)
        }
    }

    /// Returns whether every control point lies on the origin-end line.
    #[must_use]
    pub fn is_linear(&self) -> bool {
        let d = self.end - self.origin;
        let scale = d.norm().max(1.0);
        self.controls.iter().all(|c| {
            let v = c - self.origin;
            ((d.x * v.y - d.y * v.x) / scale).abs() < TOLERANCE
        })
    }

    /// Parameters where the curve reaches an extreme in x or y, always
    /// including `0` and `1`, sorted and deduplicated.
    #[must_use]
    pub fn extrema(&self) -> Vec<f64> {
        let p = self.points();
        let first: Vec<Vector2> = p.windows(2).map(|w| w[1] - w[0]).collect();
        let mut roots = Vec::new();
        for dim in 0..2 {
            let coeffs: Vec<f64> = first.iter().map(|v| v[dim]).collect();
            roots.extend(derivative_roots(&coeffs));
            if first.len() == 3 {
                let second: Vec<f64> = coeffs.windows(2).map(|w| w[1] - w[0]).collect();
                roots.extend(derivative_roots(&second));
            }
        }
        let mut ts: Vec<f64> = roots
            .into_iter()
            .filter(|t| t.is_finite() && *t > 0.0 && *t < 1.0)
            .map(|t| round(t, TOLERANCE))
            .collect();
        ts.push(0.0);
        ts.push(1.0);
        ts.sort_by(f64::total_cmp);
        ts.dedup_by(|a, b| (*a - *b).abs() < TOLERANCE);
        ts
    }

    /// Axis-aligned bounds as `(low, high)`.
    #[must_use]
    pub fn bounds(&self) -> (Point2, Point2) {
        let mut low = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut high = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for t in self.extrema() {
            let p = self.compute(t);
            low = low.inf(&p);
            high = high.sup(&p);
        }
        (low, high)
    }

    /// Splits the curve at `t` by de Casteljau subdivision.
    ///
    /// Both halves carry the range they cover on the outermost parent.
    #[must_use]
    pub fn split(&self, t: f64) -> (Self, Self) {
        let mut level = self.points();
        let mut left = vec![level[0]];
        let mut right = vec![level[level.len() - 1]];
        while level.len() > 1 {
            level = level
                .windows(2)
                .map(|w| Point2::from(w[0].coords * (1.0 - t) + w[1].coords * t))
                .collect();
            left.push(level[0]);
            right.push(level[level.len() - 1]);
        }
        right.reverse();

        let (r0, r1) = self.parent_range.unwrap_or((0.0, 1.0));
        let mid = r0 + (r1 - r0) * t;
        let build = |pts: Vec<Point2>, range: (f64, f64)| Self {
            origin: pts[0],
            controls: pts[1..pts.len() - 1].to_vec(),
            end: pts[pts.len() - 1],
            parent_range: Some(range),
        };
        (build(left, (r0, mid)), build(right, (mid, r1)))
    }

    /// The sub-curve between parameters `t0` and `t1`.
    #[must_use]
    pub fn segment(&self, t0: f64, t1: f64) -> Self {
        if t1 >= 1.0 - TOLERANCE {
            if t0 <= TOLERANCE {
                return self.clone();
            }
            return self.split(t0).1;
        }
        let (head, _) = self.split(t1);
        if t0 <= TOLERANCE {
            return head;
        }
        head.split(t0 / t1).1
    }
}

/// Roots in `t` of the bezier whose coefficients are `p` (linear or quadratic).
fn derivative_roots(p: &[f64]) -> Vec<f64> {
    match *p {
        [a, b, c] => {
            let d = a - 2.0 * b + c;
            if d.abs() > f64::EPSILON {
                let disc = b * b - a * c;
                if disc < 0.0 {
                    return Vec::new();
                }
                let m1 = -disc.sqrt();
                let m2 = b - a;
                vec![-(m1 + m2) / d, -(-m1 + m2) / d]
            } else if (b - c).abs() > f64::EPSILON {
                vec![(2.0 * b - c) / (2.0 * (b - c))]
            } else {
                Vec::new()
            }
        }
        [a, b] if (a - b).abs() > f64::EPSILON => vec![a / (a - b)],
        _ => Vec::new(),
    }
}

impl Curve for BezierSeed {
    fn evaluate(&self, ratio: f64) -> Point2 {
        self.compute(ratio)
    }

    fn tangent(&self, ratio: f64) -> Vector2 {
        self.derivative(ratio)
    }

    fn endpoints(&self) -> Option<(Point2, Point2)> {
        Some((self.origin, self.end))
    }

    fn length(&self) -> f64 {
        let sum: f64 = GAUSS_T
            .iter()
            .zip(GAUSS_W.iter())
            .map(|(x, w)| w * self.derivative(0.5 * x + 0.5).norm())
            .sum();
        0.5 * sum
    }

    fn is_closed(&self) -> bool {
        nalgebra::distance(&self.origin, &self.end) < TOLERANCE
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn control_count_is_validated() {
        assert!(BezierSeed::new(p(0.0, 0.0), vec![], p(1.0, 0.0)).is_err());
        assert!(BezierSeed::new(p(0.0, 0.0), vec![p(0.0, 1.0); 3], p(1.0, 0.0)).is_err());
        assert_eq!(BezierSeed::new(p(0.0, 0.0), vec![p(0.0, 1.0)], p(1.0, 0.0)).unwrap().order(), 2);
    }

    #[test]
    fn quadratic_midpoint() {
        let b = BezierSeed::quadratic(p(0.0, 0.0), p(1.0, 2.0), p(2.0, 0.0));
        let m = b.compute(0.5);
        assert!((m.x - 1.0).abs() < 1e-12);
        assert!((m.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn straight_cubic_length() {
        let b = BezierSeed::cubic(p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(3.0, 0.0));
        assert!(b.is_linear());
        assert!((b.length() - 3.0).abs() < 1e-9, "len={}", b.length());
    }

    #[test]
    fn extrema_of_symmetric_arch() {
        let b = BezierSeed::quadratic(p(0.0, 0.0), p(1.0, 2.0), p(2.0, 0.0));
        let ext = b.extrema();
        assert_eq!(ext.len(), 3);
        assert!((ext[1] - 0.5).abs() < 1e-9);
        let (low, high) = b.bounds();
        assert!((high.y - 1.0).abs() < 1e-9);
        assert!(low.y.abs() < 1e-12);
    }

    #[test]
    fn split_keeps_shape_and_tags_ranges() {
        let b = BezierSeed::cubic(p(0.0, 0.0), p(0.0, 3.0), p(4.0, 3.0), p(4.0, 0.0));
        let (l, r) = b.split(0.25);
        assert_eq!(l.parent_range, Some((0.0, 0.25)));
        assert_eq!(r.parent_range, Some((0.25, 1.0)));
        let expected = b.compute(0.25);
        assert!(nalgebra::distance(&l.end, &expected) < 1e-12);
        assert!(nalgebra::distance(&r.origin, &expected) < 1e-12);
        // A point inside the right half maps back onto the parent.
        let q = r.compute(0.5);
        assert!(nalgebra::distance(&q, &b.compute(0.625)) < 1e-12);

        let (rl, _) = r.split(0.5);
        assert_eq!(rl.parent_range, Some((0.25, 0.625)));
    }

    #[test]
    fn segment_covers_requested_range() {
        let b = BezierSeed::quadratic(p(0.0, 0.0), p(1.0, 2.0), p(2.0, 0.0));
        let s = b.segment(0.2, 0.6);
        assert!(nalgebra::distance(&s.origin, &b.compute(0.2)) < 1e-12);
        assert!(nalgebra::distance(&s.end, &b.compute(0.6)) < 1e-12);
    }
}
